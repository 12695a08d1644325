//! Error types.

use thiserror::Error;

use crate::input::InputKind;

/// Failure to build a generator from its configuration.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ConstructionError {
    /// The requested number of digits was outside of the range [6, 8].
    #[error("invalid digit count {0}: expected 6, 7 or 8")]
    InvalidDigits(u8),
    /// The hash algorithm identifier is not one of SHA1, SHA256 or SHA512.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// OTP generation error type.
///
/// None of these are transient: generation is a pure function of its inputs, so retrying with the
/// same arguments always fails the same way.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum OtpError {
    /// The input could not produce a message (non-positive step, arithmetic overflow, or an
    /// expiration outside the representable calendar range).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The provided key was shorter than the digest of the selected hash.
    #[error("invalid key size - expected at least {expected} bytes, actual {actual}")]
    InvalidKeySize { expected: usize, actual: usize },
    /// The input variant does not match the generator.
    #[error("unsupported input: expected {expected} input, got {actual}")]
    UnsupportedInput {
        expected: InputKind,
        actual: InputKind,
    },
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

pub type Result<T> = std::result::Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_size_message_names_both_sizes() {
        let err = OtpError::InvalidKeySize {
            expected: 20,
            actual: 19,
        };
        assert_eq!(
            err.to_string(),
            "invalid key size - expected at least 20 bytes, actual 19"
        );
    }

    #[test]
    fn construction_errors_are_transparent() {
        let err: OtpError = ConstructionError::InvalidDigits(9).into();
        assert_eq!(err.to_string(), "invalid digit count 9: expected 6, 7 or 8");
        assert_eq!(
            err,
            OtpError::Construction(ConstructionError::InvalidDigits(9))
        );
    }

    #[test]
    fn unsupported_input_names_kinds() {
        let err = OtpError::UnsupportedInput {
            expected: InputKind::TimeStep,
            actual: InputKind::Counter,
        };
        assert_eq!(
            err.to_string(),
            "unsupported input: expected time-step input, got counter"
        );
    }
}
