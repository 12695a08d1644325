//! Message producers for the OATH generators.

use core::fmt;

use crate::error::Result;
use crate::hotp::CounterInput;
use crate::totp::TimeStepInput;

/// Discriminant of [`Input`], used in error reports.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InputKind {
    Counter,
    TimeStep,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputKind::Counter => write!(f, "counter"),
            InputKind::TimeStep => write!(f, "time-step"),
        }
    }
}

/// Source of the 8-byte moving factor that is fed to the HMAC.
///
/// HOTP generators accept only [`Input::Counter`], TOTP generators only [`Input::TimeStep`];
/// the generic [`OathGenerator`](crate::OathGenerator) accepts both.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Input {
    Counter(CounterInput),
    TimeStep(TimeStepInput),
}

impl Input {
    pub fn counter(counter: u64) -> Self {
        Input::Counter(CounterInput::new(counter))
    }

    pub fn kind(&self) -> InputKind {
        match self {
            Input::Counter(_) => InputKind::Counter,
            Input::TimeStep(_) => InputKind::TimeStep,
        }
    }

    /// The message: an 8-byte big-endian integer.
    ///
    /// # Errors
    ///
    /// Only time-step inputs can fail, see [`TimeStepInput::sum`].
    pub fn sum(&self) -> Result<[u8; 8]> {
        match self {
            Input::Counter(input) => Ok(input.sum()),
            Input::TimeStep(input) => input.sum(),
        }
    }
}

impl From<CounterInput> for Input {
    fn from(input: CounterInput) -> Self {
        Input::Counter(input)
    }
}

impl From<TimeStepInput> for Input {
    fn from(input: TimeStepInput) -> Self {
        Input::TimeStep(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Input::counter(0).kind(), InputKind::Counter);
        assert_eq!(
            Input::from(TimeStepInput::at(30, 0, 31)).kind(),
            InputKind::TimeStep
        );
    }

    #[test]
    fn sums_delegate_to_variant() {
        assert_eq!(Input::counter(1).sum(), Ok([0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(
            Input::from(TimeStepInput::at(30, 0, 90)).sum(),
            Ok([0, 0, 0, 0, 0, 0, 0, 3])
        );
    }
}
