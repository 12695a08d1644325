//! Generated one-time passwords and their display format.

use core::fmt;

use chrono::{DateTime, Utc};
use data_encoding::HEXLOWER;

// 10^10 no longer fits in a u32, and a u32 never has more than 10 decimal digits.
const MAX_FORMAT_DIGITS: u8 = 10;

/// A generated one-time password.
///
/// `value` is either a truncated 4-byte window (a non-negative 31-bit integer) or, when
/// `digits == 0`, whatever the generator left untruncated.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Otp {
    value: Vec<u8>,
    digits: u8,
    expiration: Option<DateTime<Utc>>,
}

impl Otp {
    pub fn new(value: Vec<u8>, digits: u8) -> Self {
        Self {
            value,
            digits,
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Raw bytes, big-endian.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Number of decimal digits to display; 0 means untruncated.
    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// The instant at which a time-based code stops being current. Counter-based codes never
    /// expire.
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    fn numeric(&self) -> u32 {
        let mut bytes = [0u8; 4];
        bytes[4 - self.value.len()..].copy_from_slice(&self.value);
        u32::from_be_bytes(bytes)
    }
}

/// Values of up to four bytes are rendered as decimal: unpadded when `digits == 0`, otherwise
/// reduced modulo `10^digits` and zero-padded to exactly `digits` characters. Longer values
/// (untruncated digests) are rendered as lowercase hex.
impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.value.len() > 4 {
            return f.write_str(&HEXLOWER.encode(&self.value));
        }
        let value = self.numeric();
        if self.digits == 0 {
            return write!(f, "{}", value);
        }
        let digits = self.digits.min(MAX_FORMAT_DIGITS);
        let decimal = u64::from(value) % 10_u64.pow(digits.into());
        write!(f, "{:0width$}", decimal, width = digits as usize)
    }
}
