//! Shared fixtures for unit tests.

/// Calibration block used by the reference simulator (registers 0x31 - 0x45).
pub const REFERENCE_CALIBRATION: [u8; 21] = [
    0xCB, 0x68, 0x68, 0x66, 0x03,
    0xE9, 0xBE, 0x71, 0xD5, 0x07, 0x05,
    0xFF, 0x9F, 0xFF, 0x9F, 0x0F, 0xFE,
    0x00, 0xE0, 0xE0, 0xEB,
];

/// Mid-scale raw reading used for the pinned forward values.
pub const MID_SCALE: u32 = 8_388_608;

/// Exact power of two as an `f64`, built from its bit pattern.
pub const fn pow2(e: i32) -> f64 {
    match e {
        // Normal numbers: exponent E = e + 1023, mantissa = 0
        -1022..=1023 => f64::from_bits(((e + 1023) as u64) << 52),

        // Subnormals: exponent bits = 0, value = F * 2^-1074
        -1074..=-1023 => f64::from_bits(1u64 << (e + 1074)),

        // Underflow / overflow
        e if e < -1074 => 0.0,
        _ => f64::INFINITY,
    }
}

/// Asserts `|actual - expected| <= tolerance` with a readable message.
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn pow2_covers_normal_and_subnormal_range() {
    assert_eq!(pow2(0), 1.0);
    assert_eq!(pow2(-8), 0.00390625);
    assert_eq!(pow2(65), 36893488147419103232.0);
    assert_eq!(pow2(-1074), f64::from_bits(1));
    assert_eq!(pow2(-1075), 0.0);
    assert_eq!(pow2(1024), f64::INFINITY);
}
