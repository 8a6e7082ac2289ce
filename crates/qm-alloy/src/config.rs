//! Simulation configuration: derived temperatures plus run parameters.

use serde::{Deserialize, Serialize};

use crate::composition::AlloyComposition;
use crate::error::{ConfigResult, ConfigurationError};
use crate::model::KineticsModel;
use crate::temperatures::DerivedTemperatures;

pub const DEFAULT_GRAIN_SIZE: f64 = 8.0;
pub const DEFAULT_NUCLEATION_START: f64 = 0.01;
pub const DEFAULT_NUCLEATION_FINISH: f64 = 0.99;
pub const DEFAULT_PEAK_TEMPERATURE: f64 = 900.0;
pub const DEFAULT_COOLING_RATE: f64 = 10.0;

/// Validated, read-only parameters of one simulation.
///
/// Temperatures in degC, cooling rate in degC/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub model: KineticsModel,
    pub ms_temp: f64,
    pub ms_rate_param: f64,
    pub bs_temp: f64,
    pub ae1_temp: f64,
    pub ae3_temp: f64,
    /// ASTM grain size number
    pub grain_size: f64,
    pub nucleation_start_fraction: f64,
    pub nucleation_finish_fraction: f64,
    /// Xfe
    pub equilibrium_ferrite_fraction: f64,
    pub peak_temperature: f64,
    pub cooling_rate: f64,
}

/// Optional replacements for derived or default values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms_rate_param: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bs_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ae1_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ae3_temp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nucleation_start_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nucleation_finish_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equilibrium_ferrite_fraction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooling_rate: Option<f64>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl SimulationConfig {
    /// Derive a configuration from a composition, apply overrides and validate.
    pub fn from_composition(
        comp: &AlloyComposition,
        model: KineticsModel,
        overrides: &ConfigOverrides,
    ) -> ConfigResult<Self> {
        let derived = DerivedTemperatures::compute(comp, model);
        let config = Self::from_derived(&derived).with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Configuration built from derived values and the run defaults, unvalidated.
    pub fn from_derived(derived: &DerivedTemperatures) -> Self {
        Self {
            model: derived.model,
            ms_temp: derived.ms,
            ms_rate_param: derived.ms_rate_param,
            bs_temp: derived.bs,
            ae1_temp: derived.ae1,
            ae3_temp: derived.ae3,
            grain_size: DEFAULT_GRAIN_SIZE,
            nucleation_start_fraction: DEFAULT_NUCLEATION_START,
            nucleation_finish_fraction: DEFAULT_NUCLEATION_FINISH,
            equilibrium_ferrite_fraction: derived.ferrite_fraction,
            peak_temperature: DEFAULT_PEAK_TEMPERATURE,
            cooling_rate: DEFAULT_COOLING_RATE,
        }
    }

    pub fn with_overrides(mut self, o: &ConfigOverrides) -> Self {
        let apply = |slot: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        apply(&mut self.ms_temp, o.ms_temp);
        apply(&mut self.ms_rate_param, o.ms_rate_param);
        apply(&mut self.bs_temp, o.bs_temp);
        apply(&mut self.ae1_temp, o.ae1_temp);
        apply(&mut self.ae3_temp, o.ae3_temp);
        apply(&mut self.grain_size, o.grain_size);
        apply(&mut self.nucleation_start_fraction, o.nucleation_start_fraction);
        apply(&mut self.nucleation_finish_fraction, o.nucleation_finish_fraction);
        apply(
            &mut self.equilibrium_ferrite_fraction,
            o.equilibrium_ferrite_fraction,
        );
        apply(&mut self.peak_temperature, o.peak_temperature);
        apply(&mut self.cooling_rate, o.cooling_rate);
        self
    }

    /// Check every invariant the kinetics rely on.
    pub fn validate(&self) -> ConfigResult<()> {
        let xfe = self.equilibrium_ferrite_fraction;
        if !(xfe > 0.0 && xfe < 1.0) {
            return Err(ConfigurationError::FerriteFraction { value: xfe });
        }

        let (start, finish) = (
            self.nucleation_start_fraction,
            self.nucleation_finish_fraction,
        );
        if !(start > 0.0 && start < finish && finish <= 1.0) {
            return Err(ConfigurationError::NucleationFractions { start, finish });
        }

        for (name, value) in [
            ("Ae1", self.ae1_temp),
            ("Ae3", self.ae3_temp),
            ("Ms", self.ms_temp),
            ("Bs", self.bs_temp),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::CriticalTemperature { name, value });
            }
        }

        if self.ae1_temp >= self.ae3_temp {
            return Err(ConfigurationError::TemperatureOrdering {
                lower: "Ae1",
                lower_value: self.ae1_temp,
                upper: "Ae3",
                upper_value: self.ae3_temp,
            });
        }

        if self.ms_temp >= self.bs_temp {
            return Err(ConfigurationError::TemperatureOrdering {
                lower: "Ms",
                lower_value: self.ms_temp,
                upper: "Bs",
                upper_value: self.bs_temp,
            });
        }

        if !(self.cooling_rate >= 0.0) || !self.cooling_rate.is_finite() {
            return Err(ConfigurationError::NegativeCoolingRate {
                value: self.cooling_rate,
            });
        }

        qm_core::ensure_finite(self.grain_size, "grain_size")?;
        if self.grain_size < 0.0 {
            return Err(ConfigurationError::InvalidValue {
                what: "grain_size",
                value: self.grain_size,
            });
        }
        if !(self.ms_rate_param.is_finite() && self.ms_rate_param > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                what: "ms_rate_param",
                value: self.ms_rate_param,
            });
        }
        if !(self.peak_temperature.is_finite() && self.peak_temperature > 0.0) {
            return Err(ConfigurationError::InvalidValue {
                what: "peak_temperature",
                value: self.peak_temperature,
            });
        }
        Ok(())
    }
}
