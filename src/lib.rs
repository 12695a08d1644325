//! OATH one-time password engine.
//!
//! Implements HOTP ([RFC 4226][4226]) and TOTP ([RFC 6238][6238]) on a shared core: an
//! [`Input`] produces an 8-byte message, an [`OathGenerator`] HMACs it under the shared secret,
//! applies dynamic truncation and returns an [`Otp`] whose `Display` is the final code.
//!
//! Keys, counter persistence and clocks belong to the caller. Generators are immutable and can be
//! shared across threads.
//!
//! ```rust
//! use oath_otp::{Generator, HotpGenerator, Input};
//!
//! let generator = HotpGenerator::new(6).unwrap();
//! let otp = generator
//!     .generate(&Input::counter(0), b"12345678901234567890")
//!     .unwrap();
//! assert_eq!(otp.to_string(), "755224");
//! ```
//!
//! Time-based codes also report when they expire:
//!
//! ```rust
//! use oath_otp::{Generator, HashAlgorithm, Input, TimeStepInput, TotpGenerator};
//!
//! let generator = TotpGenerator::new(8, HashAlgorithm::Sha1).unwrap();
//! let input = Input::from(TimeStepInput::at(30, 0, 59));
//! let otp = generator.generate(&input, b"12345678901234567890").unwrap();
//! assert_eq!(otp.to_string(), "94287082");
//! assert_eq!(otp.expiration().map(|at| at.timestamp()), Some(60));
//! ```
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

pub mod digest;
pub mod error;
pub mod hotp;
pub mod input;
pub mod length;
pub mod oath;
pub mod otp;
pub mod totp;

pub use digest::{Digest, HashAlgorithm};
pub use error::{ConstructionError, OtpError, Result};
pub use hotp::{CounterInput, HotpGenerator};
pub use input::{Input, InputKind};
pub use length::Digits;
pub use oath::{Generator, OathGenerator};
pub use otp::Otp;
pub use totp::{Clock, TimeStepInput, TotpGenerator};
