//! Error types for kinetics setup.

use qm_alloy::ConfigurationError;
use thiserror::Error;

use crate::phase::{Milestone, Phase};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KineticsError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Kernel integral for {phase} {milestone} is not finite: {value}")]
    NonFiniteIntegral {
        phase: Phase,
        milestone: Milestone,
        value: f64,
    },
}

pub type KineticsResult<T> = Result<T, KineticsError>;
