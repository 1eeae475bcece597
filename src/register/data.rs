use crate::register::{Readable, Reg};

/// Marker struct for the DATA_0 - DATA_5 (0x04 - 0x09) registers.
/// The BMP390 auto-increments on multiple reads, so 6 bytes starting at 0x04 hold
/// pressure and temperature from the same conversion.
///
/// - **Length:** 6 bytes
/// - **Access:** Read-only
pub struct Data;
impl Reg for Data { const ADDR: u8 = 0x04; }

/// A pair of uncompensated ADC readings.
///
/// The sensor produces 24-bit values, but any `u32` is accepted. Values outside the
/// rated range simply compensate to physically meaningless results.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    pressure: u32,
    temperature: u32,
}

impl RawSample {
    pub fn new(pressure: u32, temperature: u32) -> Self {
        Self { pressure, temperature }
    }

    /// Returns the raw uncalibrated pressure data from the DATA_0, DATA_1 and DATA_2 registers
    pub fn pressure(&self) -> u32 { self.pressure }

    /// Returns the raw uncalibrated temperature data from the DATA_3, DATA_4 and DATA_5 registers
    pub fn temperature(&self) -> u32 { self.temperature }
}

impl Readable for Data {
    type Out = RawSample;

    const N: usize = 6;

    fn decode(b: &[u8]) -> Self::Out {
        RawSample {
            pressure: u32::from_le_bytes([b[0], b[1], b[2], 0]),
            temperature: u32::from_le_bytes([b[3], b[4], b[5], 0]),
        }
    }
}
