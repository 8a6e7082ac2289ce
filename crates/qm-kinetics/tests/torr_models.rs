use qm_alloy::{AlloyComposition, ConfigOverrides, KineticsModel, SimulationConfig};
use qm_kinetics::{Milestone, Phase, PhaseIntegralTable, TorrEvaluator};

fn build(model: KineticsModel, grain_size: f64) -> TorrEvaluator {
    let comp = AlloyComposition::from_symbols([
        ("C", 0.4),
        ("Mn", 0.85),
        ("Si", 0.25),
        ("Cr", 1.0),
        ("Mo", 0.2),
        ("Fe", 97.3),
    ])
    .unwrap();
    let overrides = ConfigOverrides {
        grain_size: Some(grain_size),
        ..Default::default()
    };
    let config = SimulationConfig::from_composition(&comp, model, &overrides).unwrap();
    let table = PhaseIntegralTable::build(&comp, &config).unwrap();
    TorrEvaluator::new(&comp, &config, &table)
}

#[test]
fn finer_grains_transform_faster() {
    for model in KineticsModel::ALL {
        let coarse = build(model, 4.0);
        let fine = build(model, 10.0);
        for phase in Phase::DIFFUSIONAL {
            let (lo, hi) = coarse.window(phase).unwrap();
            let t = 0.5 * (lo + hi);
            let slow = coarse.torr(phase, Milestone::Start, t);
            let fast = fine.torr(phase, Milestone::Start, t);
            assert!(fast <= slow, "{model} {phase}: {fast} > {slow}");
        }
    }
}

#[test]
fn models_disagree() {
    let li = build(KineticsModel::Li98, 8.0);
    let kv = build(KineticsModel::Kirkaldy83, 8.0);
    let (lo, hi) = li.window(Phase::Pearlite).unwrap();
    let t = 0.5 * (lo + hi);
    assert_ne!(
        li.torr(Phase::Pearlite, Milestone::Start, t),
        kv.torr(Phase::Pearlite, Milestone::Start, t)
    );
}

#[test]
fn times_finite_inside_every_window() {
    let ev = build(KineticsModel::Kirkaldy83, 8.0);
    for phase in Phase::DIFFUSIONAL {
        let (lo, hi) = ev.window(phase).unwrap();
        let mut t = lo;
        while t < hi {
            for m in Milestone::ALL {
                let tau = ev.torr(phase, m, t);
                assert!(tau.is_finite() && tau > 0.0, "{phase} {m} at {t}");
            }
            t += 1.0;
        }
    }
}
