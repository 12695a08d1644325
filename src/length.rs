//! Validated OTP code lengths.

use core::convert::TryFrom;
use core::fmt;

use log::debug;

use crate::error::ConstructionError;

mod private {
    /// Marks a trait as being for crate-internal use only.
    pub trait Sealed {}

    impl<const N: u8> Sealed for super::Length<N> {}
}

/// Uninhabited type parameterized by a `const u8` for selective trait implementations.
///
/// This type exists as a target for [the `TokenLength` trait][TokenLength], which encodes
/// allowed code lengths in the type system.
pub enum Length<const N: u8> {}

/// Marker trait for allowable code lengths.
///
/// Per [RFC 4226][4226], HOTP values MUST be at least 6 digits and possibly 7 or 8.
/// [RFC 6238][6238] keeps the same range, so only `Length<6>`, `Length<7>` and `Length<8>`
/// implement this trait.
///
/// ```rust,compile_fail
/// # use oath_otp::Digits;
/// let digits = Digits::fixed::<9>();
/// ```
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238
pub trait TokenLength: private::Sealed {}

impl TokenLength for Length<6> {}
impl TokenLength for Length<7> {}
impl TokenLength for Length<8> {}

/// Number of decimal digits in a generated code.
///
/// Always in `MIN..=MAX`; use [`Digits::new`] for runtime values and [`Digits::fixed`] when
/// the count is known at compile time.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Digits(u8);

impl Digits {
    pub const MIN: u8 = 6;
    pub const MAX: u8 = 8;

    /// Validates a runtime digit count.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidDigits`] if `!((6..=8).contains(&digits))`.
    pub fn new(digits: u8) -> Result<Self, ConstructionError> {
        if !(Self::MIN..=Self::MAX).contains(&digits) {
            debug!("Rejecting digit count {}", digits);
            return Err(ConstructionError::InvalidDigits(digits));
        }
        Ok(Self(digits))
    }

    /// A digit count checked at compile time.
    pub const fn fixed<const N: u8>() -> Self
    where
        Length<N>: TokenLength,
    {
        Self(N)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Digits {
    fn default() -> Self {
        Self::fixed::<6>()
    }
}

impl TryFrom<u8> for Digits {
    type Error = ConstructionError;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Digits> for u8 {
    fn from(digits: Digits) -> Self {
        digits.0
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
