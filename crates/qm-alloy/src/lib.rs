//! qm-alloy: steel chemistry and derived transformation temperatures.
//!
//! Contains:
//! - element (supported alloying elements)
//! - composition (weight percent, mole fractions)
//! - ae3 (ortho-equilibrium Ae3 solver, carbon sweep)
//! - temperatures (Ms, Bs, Ae1, Xfe regressions)
//! - config (simulation configuration and overrides)
//! - model (kinetics model selection)

pub mod ae3;
pub mod composition;
pub mod config;
pub mod element;
pub mod error;
pub mod model;
pub mod temperatures;

mod thermo_tables;

pub use ae3::{
    Ae3Options, Ae3Solution, ae3_carbon_sweep, ae3_temperature, eutectoid_carbon,
    eutectoid_carbon_in_sweep, solve_ae3,
};
pub use composition::{AlloyComposition, MoleFractions};
pub use config::{ConfigOverrides, SimulationConfig};
pub use element::Element;
pub use error::{AlloyError, AlloyResult, ConfigResult, ConfigurationError};
pub use model::KineticsModel;
pub use temperatures::{DerivedTemperatures, derive_temperatures};
