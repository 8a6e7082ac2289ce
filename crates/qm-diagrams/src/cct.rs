//! Continuous-cooling (CCT) diagram builder.
//!
//! A geometric schedule of constant cooling rates is derived from the
//! critical rates. Every candidate rate is cooled from the peak temperature
//! to Ms while six Scheil sums run side by side; each sum marks its curve the
//! first time it reaches one.

use qm_core::Timer;
use qm_kinetics::{Milestone, Phase};

use crate::ccr::critical_cooling_rates;
use crate::curve::{Curve, CurveBuffer, DiagramResult, MARTENSITE_CURVE, MARTENSITE_START_TIME};
use crate::error::{SimulationError, SimulationResult};
use crate::scheduler::Scheduler;
use crate::simulation::Simulation;

/// Finest accepted temperature decrement [degC].
pub const MIN_TEMPERATURE_STEP: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct CctOptions {
    /// Number of candidate rates
    pub max_iterations: usize,
    /// Rate divisor while slower critical-rate tiers remain
    pub initial_speedup: f64,
    /// Rate divisor once every tier has been passed
    pub coarse_speedup: f64,
    /// Temperature decrement per step [degC]
    pub temperature_step: f64,
}

impl Default for CctOptions {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            initial_speedup: 1.2,
            coarse_speedup: 2.0,
            temperature_step: 1.0,
        }
    }
}

impl CctOptions {
    pub fn validate(&self) -> SimulationResult<()> {
        let checks = [
            ("max_iterations", self.max_iterations as f64, self.max_iterations > 0),
            ("initial_speedup", self.initial_speedup, self.initial_speedup > 1.0),
            ("coarse_speedup", self.coarse_speedup, self.coarse_speedup > 1.0),
            (
                "temperature_step",
                self.temperature_step,
                self.temperature_step >= MIN_TEMPERATURE_STEP
                    && self.temperature_step.is_finite(),
            ),
        ];
        for (what, value, ok) in checks {
            if !ok {
                return Err(SimulationError::InvalidOption { what, value });
            }
        }
        Ok(())
    }
}

/// Candidate cooling rates [degC/s], fastest first.
///
/// `tiers` are the positive critical rates in ascending order.
pub fn cooling_schedule(tiers: &[f64], options: &CctOptions) -> Vec<f64> {
    let Some(&fastest) = tiers.last() else {
        return Vec::new();
    };

    let mut speedup = options.initial_speedup;
    let mut remaining = tiers.len();
    let mut rate = 2.0 * speedup * fastest;
    let mut schedule = Vec::with_capacity(options.max_iterations);

    for _ in 0..options.max_iterations {
        rate /= speedup;
        while remaining > 0 && rate < tiers[remaining - 1] {
            remaining -= 1;
        }
        if remaining == 0 {
            speedup = options.coarse_speedup;
        }
        if !(rate > 0.0 && rate.is_finite()) {
            break;
        }
        schedule.push(rate);
    }
    schedule
}

/// Milestone crossings of one candidate rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOutcome {
    pub rate: f64,
    /// `(time, temperature)` per phase row and milestone, if reached
    pub crossings: [[Option<(f64, f64)>; 2]; 3],
    /// Time at which the path reached Ms [s]
    pub ms_time: f64,
}

/// Cool at `rate` from the peak temperature to Ms, tracking six Scheil sums.
pub fn simulate_candidate(sim: &Simulation, rate: f64, step: f64) -> CandidateOutcome {
    let config = sim.config();
    let (ae3, ms) = (config.ae3_temp, config.ms_temp);

    // above Ae3 nothing transforms
    let mut time = (config.peak_temperature - ae3).max(0.0) / rate;
    let mut temp = config.peak_temperature.min(ae3);
    let dt = step / rate;

    let mut sums = [[0.0; 2]; 3];
    let mut crossings = [[None; 2]; 3];

    while temp > ms {
        temp -= step;
        time += dt;
        for phase in Phase::DIFFUSIONAL {
            let (Some((lower, upper)), Some(row)) = (sim.window(phase), phase.kinetics_row())
            else {
                continue;
            };
            if temp >= upper || temp < lower {
                continue;
            }
            for milestone in Milestone::ALL {
                let col = milestone.index();
                if crossings[row][col].is_some() {
                    continue;
                }
                sums[row][col] += dt / sim.torr(phase, milestone, temp);
                if sums[row][col] >= 1.0 {
                    crossings[row][col] = Some((time, temp));
                }
            }
        }
    }

    CandidateOutcome {
        rate,
        crossings,
        ms_time: time,
    }
}

/// Build the seven CCT curves.
pub fn build_cct<S: Scheduler>(
    sim: &Simulation,
    scheduler: &S,
    options: &CctOptions,
) -> SimulationResult<DiagramResult> {
    sim.config().validate()?;
    options.validate()?;
    let timer = Timer::start("cct");

    let tiers = critical_cooling_rates(sim, scheduler)?.tiers();
    if tiers.is_empty() {
        return Err(SimulationError::NoTransformationWindow);
    }
    let schedule = cooling_schedule(&tiers, options);
    tracing::debug!(
        candidates = schedule.len(),
        fastest = schedule.first().copied(),
        "CCT cooling schedule"
    );

    let step = options.temperature_step;
    let tasks: Vec<_> = schedule
        .iter()
        .map(|&rate| move || simulate_candidate(sim, rate, step))
        .collect();
    let outcomes = scheduler.run_all(tasks);

    let mut buffers: [[CurveBuffer; 2]; 3] = Default::default();
    for outcome in &outcomes {
        for (row, pair) in outcome.crossings.iter().enumerate() {
            for (col, crossing) in pair.iter().enumerate() {
                if let Some((t, temp)) = crossing {
                    buffers[row][col].push(*t, *temp);
                }
            }
        }
    }

    let bainite_row = Phase::Bainite.kinetics_row().unwrap_or(2);
    let ms = sim.config().ms_temp;
    let martensite_end = buffers[bainite_row][Milestone::Finish.index()]
        .first()
        .map(|(t, _)| t)
        .or_else(|| outcomes.first().map(|o| o.ms_time))
        .unwrap_or(MARTENSITE_START_TIME);

    let mut result = DiagramResult::new();
    for (phase, pair) in Phase::DIFFUSIONAL.into_iter().zip(buffers) {
        for (milestone, buffer) in Milestone::ALL.into_iter().zip(pair) {
            result.insert_phase(phase, milestone, buffer.into_curve());
        }
    }
    result.insert(
        MARTENSITE_CURVE,
        Curve::from_points([(MARTENSITE_START_TIME, ms), (martensite_end, ms)]),
    );

    timer.stop();
    Ok(result)
}
