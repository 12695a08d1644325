//! HMAC digest types and dynamic truncation.

use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use ring::hmac::{
    sign, Algorithm, Key as HmacKey, HMAC_SHA1_FOR_LEGACY_USE_ONLY as HMAC_SHA1, HMAC_SHA256,
    HMAC_SHA512,
};

use crate::error::{ConstructionError, OtpError};
use crate::otp::Otp;

/// Hash function underlying the HMAC.
///
/// [RFC 4226][4226] prescribes HMAC-SHA1. [RFC 6238][6238] extends the family to HMAC-SHA256
/// and HMAC-SHA512.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Output size of the hash in bytes, which is also the minimum key length.
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    fn hmac_algorithm(self) -> Algorithm {
        match self {
            HashAlgorithm::Sha1 => HMAC_SHA1,
            HashAlgorithm::Sha256 => HMAC_SHA256,
            HashAlgorithm::Sha512 => HMAC_SHA512,
        }
    }

    /// Computes `HMAC(self, key, message)`.
    ///
    /// Key length is not checked here; see [`OathGenerator`](crate::OathGenerator) for the gate.
    pub fn hmac(self, key: &[u8], message: &[u8]) -> Digest {
        let key = HmacKey::new(self.hmac_algorithm(), key);
        Digest(sign(&key, message).as_ref().to_vec())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "SHA1"),
            HashAlgorithm::Sha256 => write!(f, "SHA256"),
            HashAlgorithm::Sha512 => write!(f, "SHA512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            _ => Err(ConstructionError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Raw HMAC output, before truncation.
///
/// Always one of the supported digest lengths (20, 32 or 64 bytes), so the truncation window
/// can never fall outside of it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Digest(Vec<u8>);

impl Digest {
    /// "Dynamic truncation" (<https://tools.ietf.org/html/rfc4226#section-5.3>).
    ///
    /// The result holds the four selected bytes with the sign bit cleared, tagged with `digits`
    /// for formatting.
    pub fn truncate(&self, digits: u8) -> Otp {
        Otp::new(self.window().to_vec(), digits)
    }

    fn window(&self) -> [u8; 4] {
        let hs = &self.0;
        // Offset from the lowest-order four bits of the final byte
        let o = (hs[hs.len() - 1] & 0xf) as usize;
        // Strip leading bit to remove signed/unsigned ambiguity
        [hs[o] & 0x7f, hs[o + 1], hs[o + 2], hs[o + 3]]
    }

    /// Untruncated result; formats as lowercase hex.
    pub fn into_otp(self) -> Otp {
        Otp::new(self.0, 0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = OtpError;

    fn try_from(raw: &[u8]) -> Result<Self, Self::Error> {
        match raw.len() {
            20 | 32 | 64 => Ok(Self(raw.to_vec())),
            len => Err(OtpError::InvalidInput(format!(
                "digest of {} bytes is not a SHA1, SHA256 or SHA512 HMAC",
                len
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_example_section_5_4() {
        let digest = Digest::try_from(&hex!("1f8698690e02ca16618550ef7f19da8e945b555a")[..])
            .unwrap();
        let otp = digest.truncate(6);
        assert_eq!(otp.value(), &hex!("50ef7f19"));
        assert_eq!(otp.digits(), 6);
        assert_eq!(otp.to_string(), "872921");
    }

    #[test]
    fn truncation_clears_sign_bit() {
        // offset 0, window ff ff ff ff
        let mut raw = [0xffu8; 20];
        raw[19] = 0xf0;
        let otp = Digest::try_from(&raw[..]).unwrap().truncate(8);
        assert_eq!(otp.value(), &[0x7fu8, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn truncation_uses_last_window_at_offset_15() {
        let mut raw = [0u8; 20];
        raw[15..19].copy_from_slice(&[0x81, 0x02, 0x03, 0x04]);
        raw[19] = 0x0f;
        let otp = Digest::try_from(&raw[..]).unwrap().truncate(6);
        assert_eq!(otp.value(), &[0x01u8, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn rejects_odd_digest_lengths() {
        assert!(Digest::try_from(&[0u8; 19][..]).is_err());
        assert!(Digest::try_from(&[0u8; 0][..]).is_err());
        assert!(Digest::try_from(&[0u8; 21][..]).is_err());
        assert!(Digest::try_from(&[0u8; 32][..]).is_ok());
    }

    // echo -n "input" | openssl sha1 -hmac "00000000000000000000"
    #[test]
    fn hmac_sha1_matches_openssl() {
        let digest = HashAlgorithm::Sha1.hmac(b"00000000000000000000", b"input");
        assert_eq!(
            digest.as_ref(),
            &hex!("c92f5492209b3ee52062cfeb6010719c49a98906")
        );
    }

    #[test]
    fn digest_lengths() {
        for algorithm in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha512,
        ] {
            let digest = algorithm.hmac(&[0u8; 64], b"");
            assert_eq!(digest.len(), algorithm.digest_len());
        }
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("SHA1".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha1));
        assert_eq!("sha-256".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha256));
        assert_eq!("Sha512".parse::<HashAlgorithm>(), Ok(HashAlgorithm::Sha512));
        assert_eq!(
            "SHA384".parse::<HashAlgorithm>(),
            Err(ConstructionError::UnsupportedAlgorithm("SHA384".to_string()))
        );
        assert_eq!(HashAlgorithm::Sha256.to_string(), "SHA256");
    }
}
