//! Error types for the qm-app service layer.

use std::path::PathBuf;

/// Application error shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read request file: {path}")]
    RequestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write request file: {path}")]
    RequestWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse request: {0}")]
    Parse(String),

    #[error("Request validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<qm_alloy::ConfigurationError> for AppError {
    fn from(err: qm_alloy::ConfigurationError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<qm_diagrams::SimulationError> for AppError {
    fn from(err: qm_diagrams::SimulationError) -> Self {
        match err {
            qm_diagrams::SimulationError::Configuration(c) => c.into(),
            other => AppError::Simulation(other.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}
