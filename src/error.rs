//! Errors that can occur when decoding register blocks or configuring a search.
//!
//! Compensation itself is total and never fails. The only accuracy failure, an inverse
//! search that ends outside its tolerance, is reported through
//! [`SearchOutcome`](crate::inverse::SearchOutcome) and only becomes an error when the
//! caller asks for it with [`SearchOutcome::into_result`](crate::inverse::SearchOutcome::into_result).

use thiserror_no_std::Error;

/// Type alias used to simplify return types throughout the crate
pub type Bmp390Result<T> = Result<T, Bmp390Error>;

/// This represents all possible errors that can occur in this crate.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Bmp390Error {
    /// A register block had the wrong number of bytes.
    #[error("register 0x{register:02X}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Start address of the register block
        register: u8,
        /// Number of bytes the block occupies on the device
        expected: usize,
        /// Number of bytes that were supplied
        actual: usize,
    },

    /// The lower search bound is above the upper one.
    #[error("invalid search interval [{low}, {high}]")]
    InvalidSearchInterval { low: u32, high: u32 },

    /// The search tolerance is zero, negative or not a number.
    #[error("invalid search tolerance {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    /// An inverse search narrowed its interval without reaching the requested tolerance.
    #[error("search did not converge: raw {raw} gives {achieved}, target {target}")]
    NotConverged {
        /// Last raw value the search evaluated
        raw: u32,
        /// Requested physical value
        target: f64,
        /// Physical value produced by `raw`
        achieved: f64,
    },

    /// Altitude is undefined for a pressure that is not strictly positive.
    #[error("pressure must be positive, got {pressure_pa} Pa")]
    NonPositivePressure { pressure_pa: f64 },
}

#[cfg(feature = "defmt")]
impl defmt::Format for Bmp390Error {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidLength { register, expected, actual } =>
                defmt::write!(fmt, "Register {=u8:#x}: expected {} bytes, got {}", register, expected, actual),
            Self::InvalidSearchInterval { low, high } =>
                defmt::write!(fmt, "Invalid search interval [{}, {}]", low, high),
            Self::InvalidTolerance { tolerance } =>
                defmt::write!(fmt, "Invalid tolerance {}", tolerance),
            Self::NotConverged { raw, target, achieved } =>
                defmt::write!(fmt, "Not converged: raw {} gives {}, target {}", raw, achieved, target),
            Self::NonPositivePressure { pressure_pa } =>
                defmt::write!(fmt, "Non-positive pressure {} Pa", pressure_pa),
        }
    }
}
