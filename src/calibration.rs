//! Calibration coefficients and the forward compensation formulas.
//!
//! The raw NVM integers are quantized into floating point coefficients and then fed into
//! the temperature and pressure polynomials from the BMP3 sensor API (floating point
//! variant). Temperature compensation produces a [`LinearizedTemperature`]
//! which pressure compensation takes as an explicit argument, so a pressure reading can
//! only be compensated against the temperature of the same sample.

use crate::error::Bmp390Result;
use crate::math::pow_n;
use crate::measurement::Measurement;
use crate::register::calibration::{
    Calibration, CalibrationNvm, PAR_P1, PAR_P10, PAR_P11, PAR_P2, PAR_P3, PAR_P4, PAR_P5,
    PAR_P6, PAR_P7, PAR_P8, PAR_P9, PAR_T1, PAR_T2, PAR_T3,
};
use crate::register::data::RawSample;
use crate::register::read;

// Quantization divisors from the BMP3 sensor API `parse_calib_data`.
// They must stay exact literals: reference output depends on every bit.
const PAR_T1_DIVISOR: f64 = 0.00390625; // 2^-8
const PAR_T2_DIVISOR: f64 = 1073741824.0; // 2^30
const PAR_T3_DIVISOR: f64 = 281474976710656.0; // 2^48
const PAR_P1_DIVISOR: f64 = 1048576.0; // 2^20
const PAR_P2_DIVISOR: f64 = 536870912.0; // 2^29
const PAR_P3_DIVISOR: f64 = 4294967296.0; // 2^32
const PAR_P4_DIVISOR: f64 = 137438953472.0; // 2^37
const PAR_P5_DIVISOR: f64 = 0.125; // 2^-3
const PAR_P6_DIVISOR: f64 = 64.0; // 2^6
const PAR_P7_DIVISOR: f64 = 256.0; // 2^8
const PAR_P8_DIVISOR: f64 = 32768.0; // 2^15
const PAR_P9_DIVISOR: f64 = 281474976710656.0; // 2^48
const PAR_P10_DIVISOR: f64 = 281474976710656.0; // 2^48
const PAR_P11_DIVISOR: f64 = 36893488147419103232.0; // 2^65

/// Offset removed from par_p1 and par_p2 before scaling (2^14).
const PAR_P1_P2_BIAS: f64 = 16384.0;

/// How a raw NVM field is turned into a working coefficient: `(raw - bias) / divisor`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quantization {
    pub bias: f64,
    pub divisor: f64,
}

impl Quantization {
    const fn scaled(divisor: f64) -> Self {
        Self { bias: 0.0, divisor }
    }

    const fn biased(bias: f64, divisor: f64) -> Self {
        Self { bias, divisor }
    }

    pub fn apply(&self, raw: i32) -> f64 {
        // Subtracting a zero bias leaves the value bit-identical.
        (raw as f64 - self.bias) / self.divisor
    }
}

/// Quantization of each NVM field, in register order.
pub const QUANTIZATION: [Quantization; 14] = [
    Quantization::scaled(PAR_T1_DIVISOR),
    Quantization::scaled(PAR_T2_DIVISOR),
    Quantization::scaled(PAR_T3_DIVISOR),
    Quantization::biased(PAR_P1_P2_BIAS, PAR_P1_DIVISOR),
    Quantization::biased(PAR_P1_P2_BIAS, PAR_P2_DIVISOR),
    Quantization::scaled(PAR_P3_DIVISOR),
    Quantization::scaled(PAR_P4_DIVISOR),
    Quantization::scaled(PAR_P5_DIVISOR),
    Quantization::scaled(PAR_P6_DIVISOR),
    Quantization::scaled(PAR_P7_DIVISOR),
    Quantization::scaled(PAR_P8_DIVISOR),
    Quantization::scaled(PAR_P9_DIVISOR),
    Quantization::scaled(PAR_P10_DIVISOR),
    Quantization::scaled(PAR_P11_DIVISOR),
];

/// Intermediate result of temperature compensation, required to compensate pressure.
///
/// Only [`CalibrationData::compensate_temperature`] produces this value, which ties each
/// pressure compensation to a preceding temperature compensation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearizedTemperature(f64);

impl LinearizedTemperature {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Quantized calibration coefficients of one device.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationData {
    pub par_t1: f64,
    pub par_t2: f64,
    pub par_t3: f64,
    pub par_p1: f64,
    pub par_p2: f64,
    pub par_p3: f64,
    pub par_p4: f64,
    pub par_p5: f64,
    pub par_p6: f64,
    pub par_p7: f64,
    pub par_p8: f64,
    pub par_p9: f64,
    pub par_p10: f64,
    pub par_p11: f64,
}

impl CalibrationData {
    /// Decodes and quantizes a 21-byte calibration block read from registers 0x31 - 0x45.
    ///
    /// Returns [`Bmp390Error::InvalidLength`](crate::Bmp390Error::InvalidLength) if the
    /// block is not exactly 21 bytes long.
    pub fn from_bytes(b: &[u8]) -> Bmp390Result<Self> {
        let nvm = read::<Calibration>(b)?;

        Ok(Self::from_nvm(&nvm))
    }

    pub fn from_nvm(nvm: &CalibrationNvm) -> Self {
        let raw = nvm.fields();
        let q = |field: usize| QUANTIZATION[field].apply(raw[field]);

        let data = Self {
            par_t1: q(PAR_T1),
            par_t2: q(PAR_T2),
            par_t3: q(PAR_T3),
            par_p1: q(PAR_P1),
            par_p2: q(PAR_P2),
            par_p3: q(PAR_P3),
            par_p4: q(PAR_P4),
            par_p5: q(PAR_P5),
            par_p6: q(PAR_P6),
            par_p7: q(PAR_P7),
            par_p8: q(PAR_P8),
            par_p9: q(PAR_P9),
            par_p10: q(PAR_P10),
            par_p11: q(PAR_P11),
        };
        log::debug!("quantized calibration coefficients: {:?}", data);

        data
    }

    /// Compensates a raw temperature reading.
    ///
    /// Returns the temperature in degrees Celsius together with the linearized temperature
    /// needed by [`compensate_pressure`](Self::compensate_pressure). Both carry the same
    /// number.
    pub fn compensate_temperature(&self, temperature: u32) -> (f64, LinearizedTemperature) {
        let partial_data1 = temperature as f64 - self.par_t1;
        let partial_data2 = partial_data1 * self.par_t2;

        let t_lin = partial_data2 + (partial_data1 * partial_data1) * self.par_t3;

        (t_lin, LinearizedTemperature(t_lin))
    }

    /// Compensates a raw pressure reading against the linearized temperature of the same
    /// sample. Returns pascal.
    ///
    /// Never fails. Raw values outside the rated range give meaningless (possibly negative)
    /// pressures.
    pub fn compensate_pressure(&self, pressure: u32, t_lin: LinearizedTemperature) -> f64 {
        let pressure = pressure as f64;
        let t_lin = t_lin.0;

        // Offset
        let partial_data1 = self.par_p6 * t_lin;
        let partial_data2 = self.par_p7 * pow_n(t_lin, 2);
        let partial_data3 = self.par_p8 * pow_n(t_lin, 3);
        let partial_out1 = self.par_p5 + partial_data1 + partial_data2 + partial_data3;

        // Sensitivity
        let partial_data1 = self.par_p2 * t_lin;
        let partial_data2 = self.par_p3 * pow_n(t_lin, 2);
        let partial_data3 = self.par_p4 * pow_n(t_lin, 3);
        let partial_out2 = pressure * (self.par_p1 + partial_data1 + partial_data2 + partial_data3);

        let partial_data1 = pow_n(pressure, 2);
        let partial_data2 = self.par_p9 + self.par_p10 * t_lin;
        let partial_data3 = partial_data1 * partial_data2;
        let partial_data4 = partial_data3 + pow_n(pressure, 3) * self.par_p11;

        partial_out1 + partial_out2 + partial_data4
    }

    /// Compensates a full sample: temperature first, then pressure against it.
    pub fn compensate(&self, sample: RawSample) -> Measurement {
        let (temperature_c, t_lin) = self.compensate_temperature(sample.temperature());
        let pressure_pa = self.compensate_pressure(sample.pressure(), t_lin);

        Measurement::new(temperature_c, pressure_pa)
    }
}

impl From<CalibrationNvm> for CalibrationData {
    fn from(nvm: CalibrationNvm) -> Self {
        Self::from_nvm(&nvm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Bmp390Error;
    use crate::testing::{assert_close, pow2, MID_SCALE, REFERENCE_CALIBRATION};
    use proptest::prelude::*;

    fn reference() -> CalibrationData {
        CalibrationData::from_bytes(&REFERENCE_CALIBRATION).unwrap()
    }

    #[test]
    fn divisors_are_exact_powers_of_two() {
        assert_eq!(PAR_T1_DIVISOR, pow2(-8));
        assert_eq!(PAR_T2_DIVISOR, pow2(30));
        assert_eq!(PAR_T3_DIVISOR, pow2(48));
        assert_eq!(PAR_P1_DIVISOR, pow2(20));
        assert_eq!(PAR_P2_DIVISOR, pow2(29));
        assert_eq!(PAR_P3_DIVISOR, pow2(32));
        assert_eq!(PAR_P4_DIVISOR, pow2(37));
        assert_eq!(PAR_P5_DIVISOR, pow2(-3));
        assert_eq!(PAR_P6_DIVISOR, pow2(6));
        assert_eq!(PAR_P7_DIVISOR, pow2(8));
        assert_eq!(PAR_P8_DIVISOR, pow2(15));
        assert_eq!(PAR_P9_DIVISOR, pow2(48));
        assert_eq!(PAR_P10_DIVISOR, pow2(48));
        assert_eq!(PAR_P11_DIVISOR, pow2(65));
        assert_eq!(PAR_P1_P2_BIAS, pow2(14));
    }

    #[test]
    fn test_load_calibration() {
        let cb = reference();

        assert_eq!(cb.par_t1, 6867712.0);
        assert_eq!(cb.par_t2, 2.4415552616119385e-05);
        assert_eq!(cb.par_t3, 1.0658141036401503e-14);
        assert_eq!(cb.par_p1, -0.031516075134277344);
        assert_eq!(cb.par_p2, -5.081109702587128e-05);
        assert_eq!(cb.par_p3, 1.6298145055770874e-09);
        assert_eq!(cb.par_p4, 3.637978807091713e-11);
        assert_eq!(cb.par_p5, 327672.0);
        assert_eq!(cb.par_p6, 639.984375);
        assert_eq!(cb.par_p7, 0.05859375);
        assert_eq!(cb.par_p8, -6.103515625e-05);
        assert_eq!(cb.par_p9, -2.9103830456733704e-11);
        assert_eq!(cb.par_p10, -1.1368683772161603e-13);
        assert_eq!(cb.par_p11, -5.692061405548898e-19);
    }

    #[test]
    fn truncated_block_is_rejected() {
        let result = CalibrationData::from_bytes(&REFERENCE_CALIBRATION[..20]);

        assert_eq!(
            result,
            Err(Bmp390Error::InvalidLength { register: 0x31, expected: 21, actual: 20 })
        );
    }

    #[test]
    fn compensate_at_mid_scale() {
        let cb = reference();
        let m = cb.compensate(RawSample::new(MID_SCALE, MID_SCALE));

        assert_close(m.temperature_celsius(), 37.15816992032342, 1e-9);
        assert_close(m.pressure_pascal(), 68669.59847672377, 1e-6);
    }

    #[test]
    fn compensate_second_simulator_sample() {
        let cb = reference();
        let m = cb.compensate(RawSample::new(8_200_000, 8_500_000));

        assert_close(m.temperature_celsius(), 39.88161071716968, 1e-9);
        assert_close(m.pressure_pascal(), 75700.93214086356, 1e-6);
    }

    #[test]
    fn temperature_is_zero_at_par_t1() {
        let cb = reference();
        let (celsius, t_lin) = cb.compensate_temperature(6_867_712);

        assert_eq!(celsius, 0.0);
        assert_eq!(t_lin.value(), 0.0);
        // With t_lin == 0 and raw pressure 0 only the offset term remains
        assert_eq!(cb.compensate_pressure(0, t_lin), cb.par_p5);
    }

    #[test]
    fn celsius_and_t_lin_are_identical() {
        let cb = reference();
        let (celsius, t_lin) = cb.compensate_temperature(7_000_000);

        assert_eq!(celsius.to_bits(), t_lin.value().to_bits());
    }

    #[test]
    fn interleaved_samples_do_not_interfere() {
        let cb = reference();
        let a = RawSample::new(8_200_000, 8_500_000);
        let b = RawSample::new(MID_SCALE, MID_SCALE);

        let (_, t_lin_a) = cb.compensate_temperature(a.temperature());
        let (_, t_lin_b) = cb.compensate_temperature(b.temperature());
        let pressure_b = cb.compensate_pressure(b.pressure(), t_lin_b);
        let pressure_a = cb.compensate_pressure(a.pressure(), t_lin_a);

        assert_eq!(pressure_a, cb.compensate(a).pressure_pascal());
        assert_eq!(pressure_b, cb.compensate(b).pressure_pascal());
    }

    #[test]
    fn out_of_range_input_still_produces_a_value() {
        let cb = reference();
        let m = cb.compensate(RawSample::new(u32::MAX, u32::MAX));

        assert!(m.temperature_celsius().is_finite());
        assert!(m.pressure_pascal().is_finite());
    }

    proptest! {
        #[test]
        fn decode_is_deterministic(block in proptest::array::uniform21(any::<u8>())) {
            let first = CalibrationData::from_bytes(&block).unwrap();
            let second = CalibrationData::from_bytes(&block).unwrap();

            prop_assert_eq!(first, second);
        }

        #[test]
        fn temperature_increases_with_raw_value(raw in 0u32..16_777_215) {
            let cb = reference();
            let (lower, _) = cb.compensate_temperature(raw);
            let (upper, _) = cb.compensate_temperature(raw + 1);

            prop_assert!(upper > lower);
        }

        // The reference device has a negative par_p1, so pressure falls as the raw value rises.
        #[test]
        fn pressure_is_strictly_monotonic_in_raw_value(raw in 0u32..16_777_215) {
            let cb = reference();
            let (_, t_lin) = cb.compensate_temperature(MID_SCALE);
            let lower = cb.compensate_pressure(raw, t_lin);
            let upper = cb.compensate_pressure(raw + 1, t_lin);

            prop_assert!(upper < lower);
        }
    }
}
