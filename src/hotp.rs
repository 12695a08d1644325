//! Counter-based one-time passwords ([RFC 4226][4226]).
//!
//! The counter is owned by the caller: this module never increments or stores it. After each
//! accepted code the caller must advance and persist the counter itself.
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226

use log::debug;

use crate::digest::HashAlgorithm;
use crate::error::{OtpError, Result};
use crate::input::{Input, InputKind};
use crate::length::Digits;
use crate::oath::{Generator, OathGenerator};
use crate::otp::Otp;

/// Synchronized moving counter.
///
/// [RFC 4226][4226] describes an "8-byte synchronized moving counter." The value is immutable once
/// created; build a new input for the next counter.
///
/// [4226]: https://tools.ietf.org/html/rfc4226
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CounterInput {
    counter: u64,
}

impl CounterInput {
    pub fn new(counter: u64) -> Self {
        Self { counter }
    }

    /// Builds a counter from its raw big-endian bytes.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self::new(u64::from_be_bytes(bytes))
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// The counter as an eight-byte, big-endian, unsigned integer.
    pub fn sum(&self) -> [u8; 8] {
        self.counter.to_be_bytes()
    }
}

impl From<u64> for CounterInput {
    fn from(counter: u64) -> Self {
        Self::new(counter)
    }
}

/// HMAC-SHA1 HOTP generator with 6, 7 or 8 digits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HotpGenerator {
    oath: OathGenerator,
}

impl HotpGenerator {
    /// # Errors
    ///
    /// Fails with [`ConstructionError::InvalidDigits`](crate::ConstructionError::InvalidDigits)
    /// if `!((6..=8).contains(&digits))`.
    pub fn new(digits: u8) -> Result<Self> {
        Ok(Self::with_digits(Digits::new(digits)?))
    }

    pub fn with_digits(digits: Digits) -> Self {
        Self {
            oath: OathGenerator::new(HashAlgorithm::Sha1, digits.get()),
        }
    }

    pub fn digits(&self) -> u8 {
        self.oath.digits()
    }

    /// Shorthand for `generate(&Input::counter(counter), key)`.
    pub fn generate_counter(&self, counter: u64, key: &[u8]) -> Result<Otp> {
        self.generate(&Input::counter(counter), key)
    }
}

impl Generator for HotpGenerator {
    fn generate(&self, input: &Input, key: &[u8]) -> Result<Otp> {
        match input {
            Input::Counter(_) => self.oath.generate(input, key),
            Input::TimeStep(_) => {
                debug!("HOTP generator given a time-step input");
                Err(OtpError::UnsupportedInput {
                    expected: InputKind::Counter,
                    actual: InputKind::TimeStep,
                })
            }
        }
    }
}
