//! qm-diagrams: TTT and CCT diagrams and continuous-cooling phase fractions.
//!
//! Contains:
//! - scheduler (fan-out of independent sub-computations, inline or rayon)
//! - simulation (validated composition + configuration + kinetics)
//! - curve (curve buffers and diagram results)
//! - ttt, ccr, cct (diagram builders)
//! - cooling (phase-fraction integrator along a cooling path)

pub mod ccr;
pub mod cct;
pub mod cooling;
pub mod curve;
pub mod error;
pub mod scheduler;
pub mod simulation;
pub mod ttt;

pub use ccr::CriticalCoolingRates;
pub use cct::CctOptions;
pub use cooling::{
    ConstantRate, CoolingOptions, CoolingPath, CoolingResult, PhaseFractionData,
    PhaseFractionTrace, PhaseState, TraceRow,
};
pub use curve::{Curve, CurveBuffer, DiagramResult};
pub use error::{SimulationError, SimulationResult};
pub use scheduler::{Executor, InlineScheduler, RayonScheduler, Scheduler};
pub use simulation::{Simulation, SimulationBuilder};
