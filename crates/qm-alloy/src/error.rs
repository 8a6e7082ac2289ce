//! Composition and configuration errors.

use qm_core::QmError;
use thiserror::Error;

/// Result type for composition handling.
pub type AlloyResult<T> = Result<T, AlloyError>;

/// Result type for configuration derivation and validation.
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Errors in an alloy composition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlloyError {
    #[error("Composition is missing required element {symbol}")]
    MissingElement { symbol: &'static str },

    #[error("Element {symbol} is listed more than once")]
    DuplicateElement { symbol: &'static str },

    #[error("Unknown element symbol: {symbol}")]
    UnknownElement { symbol: String },

    #[error("Invalid weight percent for {symbol}: {value}")]
    InvalidWeight { symbol: &'static str, value: f64 },

    #[error("Alloying additions exceed 100 wt% (total {total})")]
    BalanceExceeded { total: f64 },
}

/// Rejected simulation configuration.
///
/// Always raised before any curve computation starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Equilibrium ferrite fraction must lie in (0, 1), got {value}")]
    FerriteFraction { value: f64 },

    #[error(
        "Nucleation fractions must satisfy 0 < start < finish <= 1 (start={start}, finish={finish})"
    )]
    NucleationFractions { start: f64, finish: f64 },

    #[error("Critical temperature {name} must be positive and finite, got {value}")]
    CriticalTemperature { name: &'static str, value: f64 },

    #[error("{lower} ({lower_value}) must lie below {upper} ({upper_value})")]
    TemperatureOrdering {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },

    #[error("Cooling rate must be non-negative, got {value}")]
    NegativeCoolingRate { value: f64 },

    #[error("Invalid value for {what}: {value}")]
    InvalidValue { what: &'static str, value: f64 },

    #[error("Composition error: {0}")]
    Composition(#[from] AlloyError),
}

impl From<QmError> for ConfigurationError {
    fn from(err: QmError) -> Self {
        match err {
            QmError::NonFinite { what, value } => ConfigurationError::InvalidValue { what, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AlloyError::MissingElement { symbol: "C" };
        assert!(err.to_string().contains("C"));

        let err = ConfigurationError::FerriteFraction { value: 1.0 };
        assert!(err.to_string().contains("(0, 1)"));
    }

    #[test]
    fn composition_error_wraps() {
        let err: ConfigurationError = AlloyError::BalanceExceeded { total: 120.0 }.into();
        assert!(matches!(err, ConfigurationError::Composition(_)));
    }

    #[test]
    fn core_error_maps_to_invalid_value() {
        let err: ConfigurationError = QmError::NonFinite {
            what: "grain size",
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(
            err,
            ConfigurationError::InvalidValue {
                what: "grain size",
                ..
            }
        ));
    }
}
