//! Run execution: dispatches a request to the diagram builders.

use std::collections::BTreeMap;

use qm_alloy::{KineticsModel, ae3::SWEEP_STEP, ae3_carbon_sweep, eutectoid_carbon_in_sweep};
use qm_core::Timer;
use qm_diagrams::{CctOptions, CoolingOptions, CoolingResult, DiagramResult};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::presentation;
use crate::request_service::{build_simulation, executor};
use crate::schema::SimulationRequest;

/// What to compute for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Temperatures,
    Ttt,
    Ccr,
    Cct,
    Cool,
}

impl RunKind {
    pub fn key(&self) -> &'static str {
        match self {
            RunKind::Temperatures => "temperatures",
            RunKind::Ttt => "ttt",
            RunKind::Ccr => "ccr",
            RunKind::Cct => "cct",
            RunKind::Cool => "cool",
        }
    }
}

/// Ae3 against carbon content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepCurve {
    pub carbon: Vec<f64>,
    pub temp: Vec<f64>,
}

/// Transformation temperatures used by a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReport {
    pub model: KineticsModel,
    pub ms_temp: f64,
    pub ms_rate_param: f64,
    pub bs_temp: f64,
    pub ae1_temp: f64,
    pub ae3_temp: f64,
    pub eutectoid_carbon: f64,
    pub equilibrium_ferrite_fraction: f64,
    pub ae3_sweep: SweepCurve,
}

/// Critical cooling rates keyed by curve name, plus the ascending list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CcrReport {
    pub rates: BTreeMap<String, f64>,
    pub sorted: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunOutput {
    Temperatures(TemperatureReport),
    Diagram(DiagramResult),
    Ccr(CcrReport),
    Cooling(CoolingResult),
}

/// Build the request's simulation, run `kind` and round the output.
pub fn run(request: &SimulationRequest, kind: RunKind) -> AppResult<RunOutput> {
    let timer = Timer::start("run");
    tracing::info!(name = %request.name, model = %request.model, kind = kind.key(), "starting run");

    let sim = build_simulation(request)?;
    let scheduler = executor(request)?;

    let output = match kind {
        RunKind::Temperatures => {
            let config = sim.config();
            let sweep = ae3_carbon_sweep(sim.composition(), SWEEP_STEP);
            // follows the configured Ae1, overrides included
            let eutectoid_carbon = eutectoid_carbon_in_sweep(&sweep, config.ae1_temp);
            let (carbon, temp) = sweep.into_iter().unzip();
            RunOutput::Temperatures(TemperatureReport {
                model: config.model,
                ms_temp: config.ms_temp,
                ms_rate_param: config.ms_rate_param,
                bs_temp: config.bs_temp,
                ae1_temp: config.ae1_temp,
                ae3_temp: config.ae3_temp,
                eutectoid_carbon,
                equilibrium_ferrite_fraction: config.equilibrium_ferrite_fraction,
                ae3_sweep: SweepCurve { carbon, temp },
            })
        }
        RunKind::Ttt => RunOutput::Diagram(sim.ttt(&scheduler)?),
        RunKind::Ccr => {
            let rates = sim.critical_cooling_rates(&scheduler)?;
            RunOutput::Ccr(CcrReport {
                rates: rates
                    .iter()
                    .map(|(phase, m, rate)| (DiagramResult::curve_name(phase, m), rate))
                    .collect(),
                sorted: rates.sorted(),
            })
        }
        RunKind::Cct => RunOutput::Diagram(sim.cct(&scheduler, &CctOptions::default())?),
        RunKind::Cool => RunOutput::Cooling(sim.cool(&CoolingOptions::default())?),
    };

    let elapsed = timer.stop();
    tracing::info!(kind = kind.key(), elapsed_s = elapsed, "run finished");
    Ok(presentation::present(output))
}
