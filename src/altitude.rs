//! Barometric altitude from compensated pressure.
//!
//! Uses the international barometric formula in the form given by the datasheet:
//! `h = 44330 * (1 - (p / p0) ^ 0.1903)`.

use crate::error::{Bmp390Error, Bmp390Result};

/// Standard atmosphere at mean sea level, in pascal.
pub const STANDARD_SEA_LEVEL_PA: f64 = 101_325.0;

const ALTITUDE_SCALE_M: f64 = 44_330.0;
const ALTITUDE_EXPONENT: f64 = 0.1903;

/// Altitude in meters for a pressure measured against a sea-level reference.
///
/// Returns `NaN` if either pressure is not strictly positive. The formula itself would
/// report a finite 44 330 m for zero pressure, which is not a valid altitude.
pub fn altitude(pressure_pa: f64, sea_level_pa: f64) -> f64 {
    if !(pressure_pa > 0.0 && sea_level_pa > 0.0) {
        return f64::NAN;
    }

    ALTITUDE_SCALE_M * (1.0 - libm::pow(pressure_pa / sea_level_pa, ALTITUDE_EXPONENT))
}

/// Like [`altitude`], but reports a non-positive pressure as an error.
pub fn try_altitude(pressure_pa: f64, sea_level_pa: f64) -> Bmp390Result<f64> {
    if !(pressure_pa > 0.0) {
        return Err(Bmp390Error::NonPositivePressure { pressure_pa });
    }
    if !(sea_level_pa > 0.0) {
        return Err(Bmp390Error::NonPositivePressure { pressure_pa: sea_level_pa });
    }

    Ok(altitude(pressure_pa, sea_level_pa))
}

/// Sea-level equivalent of a pressure measured at a known altitude. Inverse of [`altitude`].
///
/// Returns `NaN` at or above 44 330 m where the formula has no solution.
pub fn sea_level_pressure(pressure_pa: f64, altitude_m: f64) -> f64 {
    let ratio = 1.0 - altitude_m / ALTITUDE_SCALE_M;
    if !(ratio > 0.0) {
        return f64::NAN;
    }

    pressure_pa / libm::pow(ratio, 1.0 / ALTITUDE_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_close;

    #[test]
    fn zero_at_reference_pressure() {
        assert_eq!(altitude(STANDARD_SEA_LEVEL_PA, STANDARD_SEA_LEVEL_PA), 0.0);
        assert_eq!(altitude(100_000.0, 100_000.0), 0.0);
    }

    #[test]
    fn zero_and_negative_pressure_are_not_finite() {
        assert!(altitude(0.0, STANDARD_SEA_LEVEL_PA).is_nan());
        assert!(altitude(-5.0, STANDARD_SEA_LEVEL_PA).is_nan());
        assert!(altitude(90_000.0, 0.0).is_nan());
        assert!(altitude(f64::NAN, STANDARD_SEA_LEVEL_PA).is_nan());
    }

    #[test]
    fn try_altitude_reports_non_positive_pressure() {
        assert_eq!(
            try_altitude(0.0, STANDARD_SEA_LEVEL_PA),
            Err(Bmp390Error::NonPositivePressure { pressure_pa: 0.0 })
        );
        assert!(try_altitude(90_000.0, STANDARD_SEA_LEVEL_PA).is_ok());
    }

    #[test]
    fn altitude_of_mid_scale_pressure() {
        assert_close(altitude(68669.59847672377, STANDARD_SEA_LEVEL_PA), 3163.291345779334, 1e-6);
    }

    #[test]
    fn lower_pressure_is_higher_up() {
        let low = altitude(100_000.0, STANDARD_SEA_LEVEL_PA);
        let high = altitude(84_000.0, STANDARD_SEA_LEVEL_PA);

        assert!(low > 0.0);
        assert!(high > low);
        assert!(altitude(102_500.0, STANDARD_SEA_LEVEL_PA) < 0.0);
    }

    #[test]
    fn sea_level_pressure_inverts_altitude() {
        let pressure = 84_000.0;
        let h = altitude(pressure, STANDARD_SEA_LEVEL_PA);

        assert_close(sea_level_pressure(pressure, h), STANDARD_SEA_LEVEL_PA, 1e-6);
        assert_eq!(sea_level_pressure(pressure, 0.0), pressure);
        assert!(sea_level_pressure(pressure, 44_330.0).is_nan());
    }
}
