//! Calibration decoding and compensation for the Bosch BMP390 barometric pressure sensor.
//!
//! The crate turns the 21-byte factory calibration block and raw ADC readings into degrees
//! Celsius, pascal and meters of altitude, and inverts the compensation to generate raw
//! readings for a desired temperature and pressure. It does no I/O: bytes come from
//! whatever bus driver or fixture the caller uses.
//!
//! ```
//! use bmp390_compensation::{CalibrationData, RawSample, STANDARD_SEA_LEVEL_PA};
//!
//! let calibration = CalibrationData::from_bytes(&[
//!     0xCB, 0x68, 0x68, 0x66, 0x03, 0xE9, 0xBE, 0x71, 0xD5, 0x07, 0x05,
//!     0xFF, 0x9F, 0xFF, 0x9F, 0x0F, 0xFE, 0x00, 0xE0, 0xE0, 0xEB,
//! ])?;
//!
//! let measurement = calibration.compensate(RawSample::new(8_388_608, 8_388_608));
//! let altitude = measurement.altitude_meters(STANDARD_SEA_LEVEL_PA);
//! # assert!(altitude.is_finite());
//! # Ok::<(), bmp390_compensation::Bmp390Error>(())
//! ```
#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod altitude;
pub mod calibration;
pub mod config;
pub mod error;
pub mod inverse;
mod math;
pub mod measurement;
pub mod reference;
pub mod register;
pub mod units;

#[cfg(test)]
mod testing;

pub use crate::altitude::STANDARD_SEA_LEVEL_PA;
pub use crate::calibration::{CalibrationData, LinearizedTemperature};
pub use crate::config::{Configuration, Preset};
pub use crate::error::{Bmp390Error, Bmp390Result};
pub use crate::inverse::{InverseSample, Monotonicity, SearchConfig, SearchOutcome};
pub use crate::measurement::Measurement;
pub use crate::register::data::RawSample;
