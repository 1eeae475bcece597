use crate::altitude;
use crate::units;
use core::fmt::{Debug, Formatter};

/// A compensated temperature and pressure pair.
#[derive(Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    temperature_c: f64,
    pressure_pa: f64,
}

impl Measurement {
    pub fn new(temperature_c: f64, pressure_pa: f64) -> Self {
        Self { temperature_c, pressure_pa }
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_c
    }

    pub fn temperature_fahrenheit(&self) -> f64 {
        units::celsius_to_fahrenheit(self.temperature_c)
    }

    pub fn pressure_pascal(&self) -> f64 {
        self.pressure_pa
    }

    pub fn pressure_hectopascal(&self) -> f64 {
        units::pascal_to_hectopascal(self.pressure_pa)
    }

    /// Altitude in meters relative to the given sea-level pressure. `NaN` for a
    /// non-positive pressure, see [`altitude::altitude`].
    pub fn altitude_meters(&self, sea_level_pa: f64) -> f64 {
        altitude::altitude(self.pressure_pa, sea_level_pa)
    }

    pub fn altitude_feet(&self, sea_level_pa: f64) -> f64 {
        units::meters_to_feet(self.altitude_meters(sea_level_pa))
    }
}

impl Debug for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurement")
            .field("temperature_c", &self.temperature_c)
            .field("pressure_pa", &self.pressure_pa)
            .finish()
    }
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn pressure_uom(&self) -> uom::si::f64::Pressure {
        uom::si::pressure::Pressure::new::<uom::si::pressure::pascal>(self.pressure_pa)
    }

    pub fn temperature_uom(&self) -> uom::si::f64::ThermodynamicTemperature {
        uom::si::thermodynamic_temperature::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(self.temperature_c)
    }

    pub fn altitude_uom(&self, sea_level_pa: f64) -> uom::si::f64::Length {
        uom::si::length::Length::new::<uom::si::length::meter>(self.altitude_meters(sea_level_pa))
    }
}
