//! Time-based one-time passwords ([RFC 6238][6238]).
//!
//! A [`TimeStepInput`] derives the HOTP counter `T = floor((now - T0) / step)` from a [`Clock`].
//! [`TotpGenerator`] samples that clock exactly once per call: it freezes the input at the
//! sampled instant and derives both the message and the expiration from the frozen copy, so a
//! step boundary crossed mid-call cannot split the code and its expiration across two steps.
//!
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, trace};

use crate::digest::HashAlgorithm;
use crate::error::{OtpError, Result};
use crate::input::{Input, InputKind};
use crate::length::Digits;
use crate::oath::{Generator, OathGenerator};
use crate::otp::Otp;

pub const DEFAULT_STEP: i64 = 30;
pub const DEFAULT_START: i64 = 0;

/// Source of Unix time in seconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// Always the given instant.
    Fixed(i64),
    /// Caller-provided time source.
    Function(fn() -> i64),
}

impl Clock {
    pub fn sample(&self) -> i64 {
        match self {
            Clock::System => Utc::now().timestamp(),
            Clock::Fixed(instant) => *instant,
            Clock::Function(now) => now(),
        }
    }
}

/// Time-step moving factor.
///
/// Each of [`counter`](Self::counter), [`expiration`](Self::expiration) and
/// [`sum`](Self::sum) samples the clock on its own. Call [`freeze`](Self::freeze) first when
/// several of them must agree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimeStepInput {
    step: i64,
    start: i64,
    clock: Clock,
}

impl Default for TimeStepInput {
    fn default() -> Self {
        Self::with_step_start(DEFAULT_STEP, DEFAULT_START)
    }
}

impl TimeStepInput {
    /// 30 second steps counted from the Unix epoch, on the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_start(step: i64, start: i64) -> Self {
        Self::with_clock(step, start, Clock::System)
    }

    pub fn with_clock(step: i64, start: i64, clock: Clock) -> Self {
        Self { step, start, clock }
    }

    /// An input pinned to `instant`.
    pub fn at(step: i64, start: i64, instant: i64) -> Self {
        Self::with_clock(step, start, Clock::Fixed(instant))
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// A copy of this input with the clock sampled once and fixed at that instant.
    pub fn freeze(&self) -> Self {
        Self::at(self.step, self.start, self.clock.sample())
    }

    /// The HOTP counter for the current step, `floor((now - T0) / step)`.
    ///
    /// # Errors
    ///
    /// [`OtpError::InvalidInput`] if the step is not positive or `now - T0` overflows.
    pub fn counter(&self) -> Result<i64> {
        let step = self.checked_step()?;
        let sample = self.clock.sample();
        let elapsed = sample.checked_sub(self.start).ok_or_else(|| {
            OtpError::InvalidInput(format!(
                "time {} minus start {} overflows",
                sample, self.start
            ))
        })?;
        Ok(elapsed.div_euclid(step))
    }

    /// Start of the next step, `(floor(now / step) + 1) * step`.
    ///
    /// The boundary is computed from the raw sample, not from `now - T0`; the two only agree when
    /// T0 is a multiple of the step.
    ///
    /// # Errors
    ///
    /// [`OtpError::InvalidInput`] if the step is not positive or the boundary is not a
    /// representable timestamp.
    pub fn expiration(&self) -> Result<DateTime<Utc>> {
        let step = self.checked_step()?;
        let sample = self.clock.sample();
        let overflow = || OtpError::InvalidInput(format!("expiration after {} overflows", sample));
        let boundary = sample
            .div_euclid(step)
            .checked_add(1)
            .and_then(|next| next.checked_mul(step))
            .ok_or_else(overflow)?;
        Utc.timestamp_opt(boundary, 0).single().ok_or_else(overflow)
    }

    /// The counter as an eight-byte, big-endian, two's complement integer.
    pub fn sum(&self) -> Result<[u8; 8]> {
        Ok(self.counter()?.to_be_bytes())
    }

    fn checked_step(&self) -> Result<i64> {
        if self.step <= 0 {
            return Err(OtpError::InvalidInput(format!(
                "time step must be positive, got {}",
                self.step
            )));
        }
        Ok(self.step)
    }
}

/// TOTP generator over HMAC-SHA1, HMAC-SHA256 or HMAC-SHA512 with 6, 7 or 8 digits.
///
/// Every generated [`Otp`] carries an expiration.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TotpGenerator {
    oath: OathGenerator,
}

impl TotpGenerator {
    /// # Errors
    ///
    /// Fails with [`ConstructionError::InvalidDigits`](crate::ConstructionError::InvalidDigits)
    /// if `!((6..=8).contains(&digits))`.
    pub fn new(digits: u8, algorithm: HashAlgorithm) -> Result<Self> {
        Ok(Self::with_digits(Digits::new(digits)?, algorithm))
    }

    /// Like [`new`](Self::new), with the hash given by name (`"SHA1"`, `"SHA-256"`, ...).
    ///
    /// # Errors
    ///
    /// Also fails with
    /// [`ConstructionError::UnsupportedAlgorithm`](crate::ConstructionError::UnsupportedAlgorithm)
    /// for any other name.
    pub fn with_algorithm_name(digits: u8, algorithm: &str) -> Result<Self> {
        let algorithm = algorithm.parse::<HashAlgorithm>().map_err(|err| {
            debug!("Rejecting hash algorithm {:?}", algorithm);
            err
        })?;
        Self::new(digits, algorithm)
    }

    pub fn with_digits(digits: Digits, algorithm: HashAlgorithm) -> Self {
        Self {
            oath: OathGenerator::new(algorithm, digits.get()),
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.oath.algorithm()
    }

    pub fn digits(&self) -> u8 {
        self.oath.digits()
    }

    fn generate_frozen(&self, input: &TimeStepInput, key: &[u8]) -> Result<Otp> {
        let frozen = input.freeze();
        let otp = self.oath.generate(&Input::TimeStep(frozen), key)?;
        let expiration = frozen.expiration()?;
        trace!("TOTP code expires at {}", expiration);
        Ok(otp.with_expiration(expiration))
    }
}

impl Generator for TotpGenerator {
    fn generate(&self, input: &Input, key: &[u8]) -> Result<Otp> {
        match input {
            Input::TimeStep(input) => self.generate_frozen(input, key),
            Input::Counter(_) => {
                debug!("TOTP generator given a counter input");
                Err(OtpError::UnsupportedInput {
                    expected: InputKind::TimeStep,
                    actual: InputKind::Counter,
                })
            }
        }
    }
}
