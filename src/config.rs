use crate::altitude::STANDARD_SEA_LEVEL_PA;
use crate::inverse::{Monotonicity, SearchConfig};

/// Settings for altitude derivation and inverse searches.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    pub(crate) sea_level_pa: f64,
    pub(crate) temperature_search: SearchConfig,
    pub(crate) pressure_search: SearchConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            sea_level_pa: STANDARD_SEA_LEVEL_PA,
            temperature_search: SearchConfig::temperature(),
            pressure_search: SearchConfig::pressure(),
        }
    }
}

impl Configuration {
    /// Reference pressure used for altitude, in pascal. Defaults to 101 325 Pa.
    pub fn sea_level_pressure(mut self, sea_level_pa: f64) -> Self {
        self.sea_level_pa = sea_level_pa;

        self
    }

    pub fn temperature_search(mut self, search: SearchConfig) -> Self {
        self.temperature_search = search;

        self
    }

    /// Search used for pressure. Pressure is always searched at the linearized
    /// temperature of the sample it is paired with.
    pub fn pressure_search(mut self, search: SearchConfig) -> Self {
        self.pressure_search = search;

        self
    }

    pub fn sea_level_pa(&self) -> f64 {
        self.sea_level_pa
    }

    pub fn temperature_search_config(&self) -> &SearchConfig {
        &self.temperature_search
    }

    pub fn pressure_search_config(&self) -> &SearchConfig {
        &self.pressure_search
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::Reference => Configuration::default(),
            Preset::Hardened => Configuration::default()
                .temperature_search(SearchConfig::temperature().monotonicity(Monotonicity::Detect))
                .pressure_search(SearchConfig::pressure().monotonicity(Monotonicity::Detect)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Bisection assumes the forward function increases with the raw value, exactly as
    /// the reference simulator does.
    Reference,
    /// Bisection first probes the interval bounds to find the direction of the forward
    /// function. Needed for devices whose pressure falls as the raw value rises.
    Hardened,
}
