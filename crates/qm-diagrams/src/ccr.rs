//! Critical cooling rates by Scheil additivity.
//!
//! Along a 1 degC/s path through a phase window each degree takes 1 s, so the
//! Scheil sum `S = sum(1 / tau)` reaches one after `elapsed / S` seconds. A
//! path at rate `r` scales every step by `1 / r`, so the rate that just reaches
//! the milestone at the window's lower bound is `span / (elapsed / S)`. Span
//! and elapsed time are equal on that path, which leaves `S` itself.

use qm_core::Timer;
use qm_kinetics::{Milestone, Phase};
use serde::{Deserialize, Serialize};

use crate::error::SimulationResult;
use crate::scheduler::Scheduler;
use crate::simulation::Simulation;

/// Temperature step of the 1 degC/s reference path [degC], one second each.
const STEP: f64 = 1.0;

/// Critical cooling rates [degC/s] per phase and milestone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalCoolingRates {
    /// Rows ferrite, pearlite, bainite; columns start, finish
    pub rates: [[f64; 2]; 3],
}

impl CriticalCoolingRates {
    pub fn get(&self, phase: Phase, milestone: Milestone) -> Option<f64> {
        match phase {
            Phase::Ferrite | Phase::Pearlite | Phase::Bainite => phase
                .kinetics_row()
                .map(|row| self.rates[row][milestone.index()]),
            Phase::Austenite | Phase::Martensite => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, Milestone, f64)> + '_ {
        Phase::DIFFUSIONAL.into_iter().flat_map(move |phase| {
            Milestone::ALL.into_iter().filter_map(move |m| {
                self.get(phase, m).map(|rate| (phase, m, rate))
            })
        })
    }

    /// All six rates in ascending order.
    pub fn sorted(&self) -> Vec<f64> {
        let mut rates: Vec<f64> = self.rates.iter().flatten().copied().collect();
        rates.sort_by(f64::total_cmp);
        rates
    }

    /// Ascending positive finite rates; phases without a window drop out.
    pub fn tiers(&self) -> Vec<f64> {
        self.sorted()
            .into_iter()
            .filter(|r| r.is_finite() && *r > 0.0)
            .collect()
    }
}

/// Critical rate for one phase and milestone, 0 when the window is empty.
pub fn critical_rate(sim: &Simulation, phase: Phase, milestone: Milestone) -> f64 {
    let Some((lower, upper)) = sim.window(phase) else {
        return 0.0;
    };

    let mut sum = 0.0;
    let mut steps = 0usize;
    loop {
        let temp = upper - STEP * (steps + 1) as f64;
        if temp < lower {
            break;
        }
        sum += 1.0 / sim.torr(phase, milestone, temp);
        steps += 1;
    }

    if steps == 0 || !(sum > 0.0) {
        return 0.0;
    }
    sum
}

/// All six critical rates, computed through `scheduler`.
pub fn critical_cooling_rates<S: Scheduler>(
    sim: &Simulation,
    scheduler: &S,
) -> SimulationResult<CriticalCoolingRates> {
    let timer = Timer::start("ccr");
    sim.config().validate()?;

    let keys: Vec<(Phase, Milestone)> = Phase::DIFFUSIONAL
        .into_iter()
        .flat_map(|p| Milestone::ALL.into_iter().map(move |m| (p, m)))
        .collect();
    let tasks: Vec<_> = keys
        .iter()
        .map(|&(phase, milestone)| move || critical_rate(sim, phase, milestone))
        .collect();
    let values = scheduler.run_all(tasks);

    let mut rates = [[0.0; 2]; 3];
    for ((phase, milestone), rate) in keys.into_iter().zip(values) {
        if let Some(row) = phase.kinetics_row() {
            rates[row][milestone.index()] = rate;
        }
    }

    tracing::debug!(?rates, "critical cooling rates");
    timer.stop();
    Ok(CriticalCoolingRates { rates })
}
