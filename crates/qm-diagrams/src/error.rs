//! Error types for diagram builds.

use qm_alloy::ConfigurationError;
use qm_kinetics::KineticsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("No simulation configuration supplied")]
    MissingConfig,

    #[error("No alloy composition supplied")]
    MissingComposition,

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Kinetics error: {0}")]
    Kinetics(KineticsError),

    #[error("No phase has a transformation window")]
    NoTransformationWindow,

    #[error("Cooling rate must be positive, got {value}")]
    NonPositiveCoolingRate { value: f64 },

    #[error("Invalid option {what}: {value}")]
    InvalidOption { what: &'static str, value: f64 },

    #[error("Step limit {limit} exceeded at t = {time} s")]
    StepLimit { limit: usize, time: f64 },

    #[error("Scheduler error: {what}")]
    Scheduler { what: String },
}

impl From<KineticsError> for SimulationError {
    fn from(e: KineticsError) -> Self {
        match e {
            KineticsError::Configuration(c) => SimulationError::Configuration(c),
            other => SimulationError::Kinetics(other),
        }
    }
}

impl SimulationError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimulationError::Configuration(_))
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;
