//! Published BMP390 readings and test-vector generation from them.
//!
//! The readings are final compensated values reported by community projects; their raw
//! ADC values were never published. [`CalibrationData::reference_vectors`] recovers raw
//! samples that reproduce them on a given device, which is useful for driving a
//! compensation implementation with realistic data.

use crate::calibration::CalibrationData;
use crate::config::Configuration;
use crate::error::Bmp390Result;
use crate::inverse::InverseSample;
use crate::measurement::Measurement;

/// A compensated reading and where it was published.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceReading {
    pub source: &'static str,
    pub url: &'static str,
    pub temperature_c: f64,
    pub pressure_pa: f64,
    pub notes: &'static str,
}

pub const REFERENCE_READINGS: [ReferenceReading; 8] = [
    ReferenceReading {
        source: "Arduino Learning",
        url: "arduinolearning.com",
        temperature_c: 23.45,
        pressure_pa: 98273.95,
        notes: "Indoor reading, touching sensor test",
    },
    ReferenceReading {
        source: "Arduino Learning",
        url: "arduinolearning.com",
        temperature_c: 23.35,
        pressure_pa: 98273.63,
        notes: "Indoor reading, stable",
    },
    ReferenceReading {
        source: "Arduino Learning",
        url: "arduinolearning.com",
        temperature_c: 23.26,
        pressure_pa: 98268.98,
        notes: "Indoor reading, cooling",
    },
    ReferenceReading {
        source: "Waveshare Example",
        url: "waveshare.com/wiki",
        temperature_c: 25.0,
        pressure_pa: 101325.0,
        notes: "Typical sea level reading",
    },
    ReferenceReading {
        source: "Adafruit Example",
        url: "learn.adafruit.com",
        temperature_c: 22.0,
        pressure_pa: 100734.0,
        notes: "Sea level, example from tutorial",
    },
    ReferenceReading {
        source: "DFRobot Example",
        url: "wiki.dfrobot.com",
        temperature_c: 24.5,
        pressure_pa: 101200.0,
        notes: "Normal room conditions",
    },
    ReferenceReading {
        source: "High Altitude Test",
        url: "Community forum",
        temperature_c: 15.0,
        pressure_pa: 84000.0,
        notes: "~1500m elevation",
    },
    ReferenceReading {
        source: "Low Altitude Test",
        url: "Community forum",
        temperature_c: 28.0,
        pressure_pa: 102500.0,
        notes: "Below sea level location",
    },
];

/// Raw sample generated for one reference reading, with its verification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TestVector {
    pub reading: &'static ReferenceReading,
    pub inverse: InverseSample,
    /// Forward compensation of the generated raw sample
    pub measurement: Measurement,
    /// Altitude of `measurement` against the configured sea-level pressure
    pub altitude_m: f64,
}

impl CalibrationData {
    /// Generates a raw sample for each entry of [`REFERENCE_READINGS`].
    pub fn reference_vectors<'a>(
        &'a self,
        config: &'a Configuration,
    ) -> impl Iterator<Item = Bmp390Result<TestVector>> + 'a {
        REFERENCE_READINGS.iter().map(move |reading| {
            let inverse = self.inverse_sample(reading.temperature_c, reading.pressure_pa, config)?;
            let measurement = self.compensate(inverse.sample());

            Ok(TestVector {
                reading,
                inverse,
                measurement,
                altitude_m: measurement.altitude_meters(config.sea_level_pa()),
            })
        })
    }
}
