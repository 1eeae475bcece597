//! Inverse compensation: find the raw ADC value that compensates to a target reading.
//!
//! The forward formulas have no closed-form inverse, so the raw value is found by
//! bisection over an integer interval, evaluating the forward compensation at each
//! midpoint. This is intended for generating test data and for validating a
//! compensation implementation.
//!
//! Bisection is only correct if the forward function is monotonic over the interval.
//! This is a precondition and is not proven at runtime. Every search therefore records
//! the forward value of the raw result and its distance from the target, so the caller can
//! verify the achieved accuracy. A search that runs out of interval is not an error in
//! itself, see [`SearchOutcome::into_result`].

use crate::calibration::{CalibrationData, LinearizedTemperature};
use crate::config::Configuration;
use crate::error::{Bmp390Error, Bmp390Result};
use crate::register::data::RawSample;

/// Largest raw value of a 24-bit ADC reading.
pub const ADC_MAX: u32 = 0x00FF_FFFF;

/// Default tolerance of a temperature search, in degrees Celsius.
pub const DEFAULT_TEMPERATURE_TOLERANCE: f64 = 0.01;

/// Default tolerance of a pressure search, in pascal.
pub const DEFAULT_PRESSURE_TOLERANCE: f64 = 10.0;

/// Halving a 24-bit interval takes 24 steps, so this cap is never reached by default.
pub const DEFAULT_MAX_ITERATIONS: u32 = 32;

/// Direction in which the forward function is assumed to move with the raw value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Monotonicity {
    /// Larger raw values compensate to larger physical values.
    Increasing,
    /// Larger raw values compensate to smaller physical values.
    Decreasing,
    /// Evaluate both interval bounds and pick the direction from them.
    Detect,
}

/// Parameters of one bisection search.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub(crate) tolerance: f64,
    pub(crate) low: u32,
    pub(crate) high: u32,
    pub(crate) max_iterations: u32,
    pub(crate) monotonicity: Monotonicity,
}

impl SearchConfig {
    fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            low: 0,
            high: ADC_MAX,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            monotonicity: Monotonicity::Increasing,
        }
    }

    /// Temperature search: 0.01 °C over the full 24-bit range.
    pub fn temperature() -> Self {
        Self::with_tolerance(DEFAULT_TEMPERATURE_TOLERANCE)
    }

    /// Pressure search: 10 Pa over the full 24-bit range.
    pub fn pressure() -> Self {
        Self::with_tolerance(DEFAULT_PRESSURE_TOLERANCE)
    }

    /// Largest accepted distance between the achieved and the target value.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;

        self
    }

    /// Closed interval of raw values to search.
    pub fn interval(mut self, low: u32, high: u32) -> Self {
        self.low = low;
        self.high = high;

        self
    }

    /// Upper bound on the number of forward evaluations made by bisection.
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;

        self
    }

    pub fn monotonicity(mut self, monotonicity: Monotonicity) -> Self {
        self.monotonicity = monotonicity;

        self
    }

    pub fn validate(&self) -> Bmp390Result<()> {
        if self.low > self.high {
            return Err(Bmp390Error::InvalidSearchInterval { low: self.low, high: self.high });
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(Bmp390Error::InvalidTolerance { tolerance: self.tolerance });
        }

        Ok(())
    }
}

/// Result of a search, including the verification of the returned raw value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Raw value the search settled on
    pub raw: u32,
    pub target: f64,
    /// Forward compensation of `raw`
    pub achieved: f64,
    /// `|achieved - target|`
    pub error: f64,
    pub tolerance: f64,
    /// Number of bisection steps taken
    pub iterations: u32,
}

impl SearchOutcome {
    /// True if the achieved value lies within tolerance of the target.
    pub fn converged(&self) -> bool {
        self.error < self.tolerance
    }

    /// Returns the raw value, or [`Bmp390Error::NotConverged`] if it is outside tolerance.
    pub fn into_result(self) -> Bmp390Result<u32> {
        if self.converged() {
            Ok(self.raw)
        } else {
            Err(Bmp390Error::NotConverged {
                raw: self.raw,
                target: self.target,
                achieved: self.achieved,
            })
        }
    }
}

/// Bisects `config`'s interval for a raw value whose `forward` image is within tolerance
/// of `target`.
///
/// Returns the first midpoint that matches. Otherwise the search stops when the interval
/// is down to two adjacent values (or the iteration cap is hit) and returns the last
/// midpoint it evaluated.
pub fn bisect<F>(target: f64, config: &SearchConfig, mut forward: F) -> Bmp390Result<SearchOutcome>
where
    F: FnMut(u32) -> f64,
{
    config.validate()?;

    let increasing = match config.monotonicity {
        Monotonicity::Increasing => true,
        Monotonicity::Decreasing => false,
        Monotonicity::Detect => {
            let at_low = forward(config.low);
            let at_high = forward(config.high);
            log::debug!(
                "forward({}) = {}, forward({}) = {}, searching {}",
                config.low, at_low, config.high, at_high,
                if at_high >= at_low { "increasing" } else { "decreasing" }
            );
            at_high >= at_low
        }
    };

    let mut low = config.low;
    let mut high = config.high;
    let mut mid = low;
    let mut iterations = 0;

    while high - low > 1 && iterations < config.max_iterations {
        mid = low + (high - low) / 2;
        let value = forward(mid);
        iterations += 1;
        log::trace!("step {}: [{}, {}] forward({}) = {}", iterations, low, high, mid, value);

        if libm::fabs(value - target) < config.tolerance {
            return Ok(SearchOutcome {
                raw: mid,
                target,
                achieved: value,
                error: libm::fabs(value - target),
                tolerance: config.tolerance,
                iterations,
            });
        }

        if (value < target) == increasing {
            low = mid;
        } else {
            high = mid;
        }
    }

    let achieved = forward(mid);
    let outcome = SearchOutcome {
        raw: mid,
        target,
        achieved,
        error: libm::fabs(achieved - target),
        tolerance: config.tolerance,
        iterations,
    };
    if !outcome.converged() {
        log::warn!(
            "search for {} ended at raw {} giving {} (error {}, tolerance {})",
            target, mid, achieved, outcome.error, config.tolerance
        );
    }

    Ok(outcome)
}

/// Targets and outcomes of inverting a temperature and pressure pair.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InverseSample {
    pub temperature: SearchOutcome,
    pub pressure: SearchOutcome,
}

impl InverseSample {
    pub fn sample(&self) -> RawSample {
        RawSample::new(self.pressure.raw, self.temperature.raw)
    }

    pub fn converged(&self) -> bool {
        self.temperature.converged() && self.pressure.converged()
    }
}

impl CalibrationData {
    /// Finds a raw temperature value that compensates to `target_c`.
    pub fn inverse_temperature(&self, target_c: f64, config: &SearchConfig) -> Bmp390Result<SearchOutcome> {
        bisect(target_c, config, |raw| self.compensate_temperature(raw).0)
    }

    /// Finds a raw pressure value that compensates to `target_pa` at the given linearized
    /// temperature.
    pub fn inverse_pressure(
        &self,
        target_pa: f64,
        t_lin: LinearizedTemperature,
        config: &SearchConfig,
    ) -> Bmp390Result<SearchOutcome> {
        bisect(target_pa, config, |raw| self.compensate_pressure(raw, t_lin))
    }

    /// Inverts a temperature and pressure pair.
    ///
    /// Pressure is searched at the linearized temperature of the raw temperature value that
    /// was found, so feeding [`InverseSample::sample`] back through
    /// [`compensate`](CalibrationData::compensate) reproduces both achieved values.
    pub fn inverse_sample(
        &self,
        target_c: f64,
        target_pa: f64,
        config: &Configuration,
    ) -> Bmp390Result<InverseSample> {
        let temperature = self.inverse_temperature(target_c, &config.temperature_search)?;
        let (_, t_lin) = self.compensate_temperature(temperature.raw);
        let pressure = self.inverse_pressure(target_pa, t_lin, &config.pressure_search)?;

        Ok(InverseSample { temperature, pressure })
    }
}
