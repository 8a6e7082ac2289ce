//! Shared application service layer for quenchmap.
//!
//! Loads simulation requests, builds the simulation they describe and runs
//! the diagram builders for the CLI.

pub mod error;
pub mod presentation;
pub mod request_service;
pub mod run_service;
pub mod schema;

pub use error::{AppError, AppResult};
pub use request_service::{
    build_simulation, executor, load_request, parse_request, save_request, validate_request,
    RequestFormat,
};
pub use run_service::{run, CcrReport, RunKind, RunOutput, SweepCurve, TemperatureReport};
pub use schema::{ExecutionDef, SimulationRequest};
