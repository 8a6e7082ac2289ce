//! qm-kinetics: transformation-time kinetics for steel.
//!
//! Contains:
//! - integrator (double-exponential quadrature and the kinetics kernels)
//! - phase (phases and milestones)
//! - integral_table (per-phase kernel integrals, built once per simulation)
//! - torr (time to reach a milestone at constant temperature)

pub mod error;
pub mod integral_table;
pub mod integrator;
pub mod phase;
pub mod torr;

pub use error::{KineticsError, KineticsResult};
pub use integral_table::PhaseIntegralTable;
pub use integrator::{Kernel, Quadrature, integrate, integrate_kernel};
pub use phase::{Milestone, Phase};
pub use torr::TorrEvaluator;
