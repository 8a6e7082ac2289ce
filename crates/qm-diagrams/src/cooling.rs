//! Phase fractions along a continuous cooling path.
//!
//! Stepping forward in time, the diffusional phases accumulate Scheil sums
//! for their start and finish times and grow in competition for the
//! remaining austenite. Below Ms the austenite left over converts to
//! martensite by the Koistinen-Marburger law. Each row depends on the one
//! before it, so the integration is strictly sequential.

use qm_core::round_to;
use qm_kinetics::{Milestone, Phase};
use serde::{Deserialize, Serialize};

use crate::curve::{Curve, CurveBuffer};
use crate::error::{SimulationError, SimulationResult};
use crate::simulation::Simulation;

/// Temperature as a function of time along a monotone cooling path.
pub trait CoolingPath: Send + Sync {
    /// Temperature [degC] at time `t` [s].
    fn temperature(&self, t: f64) -> f64;

    /// Preferred time step [s], if the path has a natural one.
    fn suggested_step(&self) -> Option<f64> {
        None
    }
}

/// Linear cooling from `start` [degC] at `rate` [degC/s].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRate {
    pub start: f64,
    pub rate: f64,
}

impl ConstantRate {
    pub fn new(start: f64, rate: f64) -> SimulationResult<Self> {
        if !(rate > 0.0 && rate.is_finite()) {
            return Err(SimulationError::NonPositiveCoolingRate { value: rate });
        }
        Ok(Self { start, rate })
    }
}

impl CoolingPath for ConstantRate {
    fn temperature(&self, t: f64) -> f64 {
        self.start - self.rate * t
    }

    /// Time for a 1 degC drop.
    fn suggested_step(&self) -> Option<f64> {
        Some(1.0 / self.rate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoolingOptions {
    /// Fixed time step [s]; defaults to the path's suggestion, else 1 s
    pub time_step: Option<f64>,
    pub max_steps: usize,
    /// Integration ends this far below Ms [degC]
    pub quench_margin: f64,
}

impl Default for CoolingOptions {
    fn default() -> Self {
        Self {
            time_step: None,
            max_steps: 1_000_000,
            quench_margin: 20.0,
        }
    }
}

/// Progress of one phase at one time step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    /// Scheil sum towards the start time
    pub nucleation: f64,
    /// Scheil sum towards the finish time
    pub completion: f64,
    /// Transformed fraction of the phase's own equilibrium share
    pub fraction: f64,
    /// Volume fraction of the whole specimen
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub time: f64,
    pub temperature: f64,
    /// Indexed in [`Phase::ALL`] order
    pub phases: [PhaseState; 5],
}

impl TraceRow {
    pub fn phase(&self, phase: Phase) -> &PhaseState {
        &self.phases[phase_slot(phase)]
    }

    pub fn total_volume(&self) -> f64 {
        self.phases.iter().map(|p| p.volume).sum()
    }
}

fn phase_slot(phase: Phase) -> usize {
    match phase {
        Phase::Austenite => 0,
        Phase::Ferrite => 1,
        Phase::Pearlite => 2,
        Phase::Bainite => 3,
        Phase::Martensite => 4,
    }
}

/// Append-only rows in increasing time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseFractionTrace {
    rows: Vec<TraceRow>,
}

impl PhaseFractionTrace {
    fn push(&mut self, row: TraceRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TraceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&TraceRow> {
        self.rows.last()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Growth {
    nucleation: f64,
    completion: f64,
    volume: f64,
    finished: bool,
}

impl Growth {
    fn is_growing(&self) -> bool {
        self.nucleation >= 1.0 && !self.finished
    }
}

/// Integrate phase fractions along `path` from t = 0 to `Ms - quench_margin`.
pub fn integrate_phase_fractions<P: CoolingPath + ?Sized>(
    sim: &Simulation,
    path: &P,
    options: &CoolingOptions,
) -> SimulationResult<PhaseFractionTrace> {
    sim.config().validate()?;
    let config = sim.config();
    let (ae3, ms) = (config.ae3_temp, config.ms_temp);
    let xfe = config.equilibrium_ferrite_fraction;
    let alpha = config.ms_rate_param;
    let stop = ms - options.quench_margin;

    let dt = options
        .time_step
        .or_else(|| path.suggested_step())
        .unwrap_or(1.0);
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(SimulationError::InvalidOption {
            what: "time_step",
            value: dt,
        });
    }

    let ceilings = [xfe, 1.0 - xfe, 1.0];
    let mut growth = [Growth::default(); 3];
    let mut austenite = 1.0;
    let mut martensite = 0.0;
    let mut km_fraction = 0.0;
    let mut austenite_at_ms: Option<f64> = None;
    let mut trace = PhaseFractionTrace::default();

    let mut step = 0usize;
    loop {
        let time = dt * step as f64;
        let temp = path.temperature(time);

        if temp > ae3 {
            // fully austenitic
        } else if temp > ms {
            for (i, phase) in Phase::DIFFUSIONAL.into_iter().enumerate() {
                let Some((_, upper)) = sim.window(phase) else {
                    continue;
                };
                if growth[i].finished || temp >= upper {
                    continue;
                }
                let sibling_growing = growth
                    .iter()
                    .enumerate()
                    .any(|(j, g)| j != i && g.is_growing());
                if sibling_growing && growth[i].nucleation < 1.0 {
                    continue;
                }

                let g = &mut growth[i];
                g.nucleation += dt / sim.torr(phase, Milestone::Start, temp);
                g.completion += dt / sim.torr(phase, Milestone::Finish, temp);
                if g.nucleation >= 1.0 {
                    let target = g.completion.min(1.0) * ceilings[i];
                    let volume = g.volume.max(target.min(g.volume + austenite));
                    austenite -= volume - g.volume;
                    g.volume = volume;
                    if g.completion >= 1.0 {
                        g.finished = true;
                    }
                }
            }
        } else {
            let retained = *austenite_at_ms.get_or_insert(austenite);
            km_fraction = 1.0 - (-alpha * (ms - temp)).exp();
            martensite = retained * km_fraction;
            austenite = retained - martensite;
        }

        let mut phases = [PhaseState::default(); 5];
        phases[phase_slot(Phase::Austenite)] = PhaseState {
            fraction: austenite,
            volume: austenite,
            ..Default::default()
        };
        for (i, phase) in Phase::DIFFUSIONAL.into_iter().enumerate() {
            let g = &growth[i];
            phases[phase_slot(phase)] = PhaseState {
                nucleation: g.nucleation,
                completion: g.completion,
                fraction: g.completion.min(1.0),
                volume: g.volume,
            };
        }
        phases[phase_slot(Phase::Martensite)] = PhaseState {
            fraction: km_fraction,
            volume: martensite,
            ..Default::default()
        };
        trace.push(TraceRow {
            time,
            temperature: temp,
            phases,
        });

        if temp <= stop {
            break;
        }
        step += 1;
        if step >= options.max_steps {
            return Err(SimulationError::StepLimit {
                limit: options.max_steps,
                time,
            });
        }
    }

    tracing::debug!(rows = trace.len(), dt, "integrated phase fractions");
    Ok(trace)
}

/// Phase volume columns of a cooling result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseFractionData {
    pub austenite: Vec<f64>,
    pub ferrite: Vec<f64>,
    pub pearlite: Vec<f64>,
    pub bainite: Vec<f64>,
    pub martensite: Vec<f64>,
}

/// Output of a continuous-cooling run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoolingResult {
    pub user_cooling_curve: Curve,
    pub user_phase_fraction_data: PhaseFractionData,
    /// Time of the last row [s]
    pub slider_time_field: f64,
    /// Temperature of the last row [degC]
    pub slider_temp_field: f64,
    /// Number of rows
    pub slider_max: usize,
}

impl CoolingResult {
    pub fn from_trace(trace: &PhaseFractionTrace) -> Self {
        let mut curve = CurveBuffer::new();
        let mut data = PhaseFractionData::default();
        for row in trace.rows() {
            curve.push(row.time, row.temperature);
            data.austenite.push(row.phase(Phase::Austenite).volume);
            data.ferrite.push(row.phase(Phase::Ferrite).volume);
            data.pearlite.push(row.phase(Phase::Pearlite).volume);
            data.bainite.push(row.phase(Phase::Bainite).volume);
            data.martensite.push(row.phase(Phase::Martensite).volume);
        }
        let (time, temp) = trace
            .last()
            .map(|r| (r.time, r.temperature))
            .unwrap_or_default();
        Self {
            user_cooling_curve: curve.into_curve(),
            user_phase_fraction_data: data,
            slider_time_field: time,
            slider_temp_field: temp,
            slider_max: trace.len(),
        }
    }

    pub fn rounded(&self, decimals: u32) -> Self {
        let d = &self.user_phase_fraction_data;
        Self {
            user_cooling_curve: self.user_cooling_curve.rounded(decimals),
            user_phase_fraction_data: PhaseFractionData {
                austenite: round_all(&d.austenite, decimals),
                ferrite: round_all(&d.ferrite, decimals),
                pearlite: round_all(&d.pearlite, decimals),
                bainite: round_all(&d.bainite, decimals),
                martensite: round_all(&d.martensite, decimals),
            },
            slider_time_field: round_to(self.slider_time_field, decimals),
            slider_temp_field: round_to(self.slider_temp_field, decimals),
            slider_max: self.slider_max,
        }
    }
}

fn round_all(values: &[f64], decimals: u32) -> Vec<f64> {
    values.iter().map(|v| round_to(*v, decimals)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_alloy::{AlloyComposition, ConfigOverrides, KineticsModel};

    fn sim() -> Simulation {
        let comp =
            AlloyComposition::from_symbols([("C", 0.2), ("Mn", 1.2), ("Si", 0.3), ("Fe", 98.3)])
                .unwrap();
        Simulation::from_composition(comp, KineticsModel::Li98, &ConfigOverrides::default())
            .unwrap()
    }

    #[test]
    fn constant_rate_rejects_non_positive() {
        assert!(matches!(
            ConstantRate::new(900.0, 0.0),
            Err(SimulationError::NonPositiveCoolingRate { .. })
        ));
        assert!(ConstantRate::new(900.0, -5.0).is_err());
        let p = ConstantRate::new(900.0, 4.0).unwrap();
        assert_eq!(p.temperature(10.0), 860.0);
        assert_eq!(p.suggested_step(), Some(0.25));
    }

    #[test]
    fn ends_below_ms() {
        let sim = sim();
        let path = ConstantRate::new(900.0, 10.0).unwrap();
        let trace = integrate_phase_fractions(&sim, &path, &CoolingOptions::default()).unwrap();
        let last = trace.last().unwrap();
        assert!(last.temperature <= sim.config().ms_temp - 20.0);
        let first = &trace.rows()[0];
        assert_eq!(first.time, 0.0);
        assert_eq!(first.phase(Phase::Austenite).volume, 1.0);
    }

    #[test]
    fn step_limit() {
        let sim = sim();
        let path = ConstantRate::new(900.0, 10.0).unwrap();
        let opts = CoolingOptions {
            max_steps: 50,
            ..Default::default()
        };
        assert!(matches!(
            integrate_phase_fractions(&sim, &path, &opts),
            Err(SimulationError::StepLimit { limit: 50, .. })
        ));
    }

    #[test]
    fn quench_gives_martensite() {
        let sim = sim();
        let path = ConstantRate::new(900.0, 1000.0).unwrap();
        let trace = integrate_phase_fractions(&sim, &path, &CoolingOptions::default()).unwrap();
        let last = trace.last().unwrap();
        assert!(last.phase(Phase::Martensite).volume > 0.2);
        assert!(last.phase(Phase::Pearlite).volume < 1e-9);
    }

    #[test]
    fn result_slider_fields() {
        let sim = sim();
        let result = sim.cool(&CoolingOptions::default()).unwrap();
        assert_eq!(result.slider_max, result.user_cooling_curve.len());
        assert_eq!(
            result.slider_temp_field,
            *result.user_cooling_curve.temp.last().unwrap()
        );
        assert_eq!(result.user_phase_fraction_data.austenite.len(), result.slider_max);
    }
}
