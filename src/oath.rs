//! The shared OATH engine: HMAC, truncation and result assembly.

use log::{debug, trace};

use crate::digest::{Digest, HashAlgorithm};
use crate::error::{OtpError, Result};
use crate::input::Input;
use crate::otp::Otp;

/// Anything that turns an input and a shared secret into a one-time password.
///
/// Implementations are immutable and may be shared freely between threads.
pub trait Generator {
    /// Generates the OTP for `input` under `key`.
    ///
    /// # Errors
    ///
    /// * [`OtpError::InvalidKeySize`] if `key` is shorter than the hash's digest.
    /// * [`OtpError::UnsupportedInput`] if the generator does not accept `input`'s variant.
    /// * [`OtpError::InvalidInput`] if `input` cannot produce a message.
    fn generate(&self, input: &Input, key: &[u8]) -> Result<Otp>;
}

/// Generic OATH generator over any supported hash and any digit count.
///
/// With `digits == 0` the full digest is returned untruncated, which formats as hex. The HOTP and
/// TOTP generators wrap this type with a validated digit count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OathGenerator {
    algorithm: HashAlgorithm,
    digits: u8,
}

impl OathGenerator {
    pub fn new(algorithm: HashAlgorithm, digits: u8) -> Self {
        Self { algorithm, digits }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// HMACs an arbitrary message, without going through an [`Input`].
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::InvalidKeySize`] if `key` is shorter than the hash's digest.
    pub fn sign(&self, message: &[u8], key: &[u8]) -> Result<Otp> {
        self.check_key(key)?;
        Ok(self.finish(self.algorithm.hmac(key, message)))
    }

    fn check_key(&self, key: &[u8]) -> Result<()> {
        let expected = self.algorithm.digest_len();
        if key.len() < expected {
            debug!(
                "Rejecting {} byte key for {} (minimum {})",
                key.len(),
                self.algorithm,
                expected
            );
            return Err(OtpError::InvalidKeySize {
                expected,
                actual: key.len(),
            });
        }
        Ok(())
    }

    fn finish(&self, digest: Digest) -> Otp {
        trace!(
            "Computed {} digest, truncating to {} digits",
            self.algorithm,
            self.digits
        );
        if self.digits == 0 {
            return digest.into_otp();
        }
        digest.truncate(self.digits)
    }
}

impl Generator for OathGenerator {
    fn generate(&self, input: &Input, key: &[u8]) -> Result<Otp> {
        self.check_key(key)?;
        let message = input.sum()?;
        trace!("Generating from {} input", input.kind());
        Ok(self.finish(self.algorithm.hmac(key, &message)))
    }
}
