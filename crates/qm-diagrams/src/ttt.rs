//! Isothermal (TTT) diagram builder.

use qm_core::Timer;
use qm_kinetics::{Milestone, Phase};

use crate::curve::{Curve, CurveBuffer, DiagramResult, MARTENSITE_CURVE, MARTENSITE_START_TIME};
use crate::error::SimulationResult;
use crate::scheduler::Scheduler;
use crate::simulation::Simulation;

/// Temperature increment of the window scans [degC].
pub const TTT_STEP: f64 = 1.0;

/// Start and finish curves of one phase.
#[derive(Debug, Clone, Default)]
pub struct PhaseScan {
    pub nucleation: CurveBuffer,
    pub completion: CurveBuffer,
}

/// Scan the phase window upward, recording start and finish times.
///
/// Temperatures where a time is not finite are skipped.
pub fn scan_phase(sim: &Simulation, phase: Phase) -> PhaseScan {
    let mut scan = PhaseScan::default();
    let Some((lower, upper)) = sim.window(phase) else {
        return scan;
    };

    let mut i = 0usize;
    loop {
        let temp = lower + TTT_STEP * i as f64;
        if temp >= upper {
            break;
        }
        let start = sim.torr(phase, Milestone::Start, temp);
        if start.is_finite() {
            scan.nucleation.push(start, temp);
        }
        let finish = sim.torr(phase, Milestone::Finish, temp);
        if finish.is_finite() {
            scan.completion.push(finish, temp);
        }
        i += 1;
    }
    tracing::debug!(%phase, lower, upper, points = scan.nucleation.len(), "scanned TTT window");
    scan
}

/// Build the seven TTT curves.
///
/// The three phase scans are independent and run through `scheduler`.
pub fn build_ttt<S: Scheduler>(sim: &Simulation, scheduler: &S) -> SimulationResult<DiagramResult> {
    let timer = Timer::start("ttt");
    sim.config().validate()?;

    let tasks: Vec<_> = Phase::DIFFUSIONAL
        .iter()
        .map(|&phase| move || (phase, scan_phase(sim, phase)))
        .collect();
    let scans = scheduler.run_all(tasks);

    let mut result = DiagramResult::new();
    for (phase, scan) in scans {
        result.insert_phase(phase, Milestone::Start, scan.nucleation.into_curve());
        result.insert_phase(phase, Milestone::Finish, scan.completion.into_curve());
    }

    let ms = sim.config().ms_temp;
    let bainite_finish = sim.torr(Phase::Bainite, Milestone::Finish, ms);
    result.insert(
        MARTENSITE_CURVE,
        Curve::from_points([(MARTENSITE_START_TIME, ms), (bainite_finish, ms)]),
    );

    timer.stop();
    Ok(result)
}
