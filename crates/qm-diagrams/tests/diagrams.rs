//! End-to-end diagram builds for a plain C-Mn steel.

use proptest::prelude::*;
use qm_alloy::{AlloyComposition, ConfigOverrides, KineticsModel, SimulationConfig};
use qm_diagrams::{
    CctOptions, ConstantRate, CoolingOptions, InlineScheduler, RayonScheduler, Simulation,
    SimulationError, cct::cooling_schedule, cooling::integrate_phase_fractions,
};
use qm_kinetics::{Milestone, Phase};

fn scenario() -> AlloyComposition {
    AlloyComposition::from_symbols([("C", 0.2), ("Mn", 1.2), ("Si", 0.3), ("Fe", 98.3)]).unwrap()
}

fn simulation(model: KineticsModel) -> Simulation {
    Simulation::from_composition(scenario(), model, &ConfigOverrides::default()).unwrap()
}

#[test]
fn ttt_has_seven_curves() {
    for model in KineticsModel::ALL {
        let sim = simulation(model);
        let ttt = sim.ttt(&InlineScheduler).unwrap();
        assert_eq!(ttt.len(), 7);
        for (name, curve) in ttt.iter() {
            assert!(!curve.is_empty(), "{model}: {name} is empty");
            assert!(curve.time.iter().all(|t| t.is_finite() && *t > 0.0));
        }
        for phase in Phase::DIFFUSIONAL {
            for m in Milestone::ALL {
                let c = ttt.phase(phase, m).unwrap();
                assert!(c.temp.windows(2).all(|w| w[1] > w[0]), "{phase} {m}");
            }
        }
        assert_eq!(ttt.martensite().unwrap().len(), 2);
    }
}

#[test]
fn pearlite_and_martensite_times_increase() {
    for model in KineticsModel::ALL {
        let ttt = simulation(model).ttt(&InlineScheduler).unwrap();
        for m in Milestone::ALL {
            let pearlite = ttt.phase(Phase::Pearlite, m).unwrap();
            assert!(
                pearlite.time.windows(2).all(|w| w[1] > w[0]),
                "{model} pearlite {m}"
            );
        }
        let martensite = ttt.martensite().unwrap();
        assert!(martensite.time[1] > martensite.time[0]);
    }
}

#[test]
fn completion_lags_nucleation() {
    let sim = simulation(KineticsModel::Li98);
    let ttt = sim.ttt(&InlineScheduler).unwrap();
    let start = ttt.phase(Phase::Ferrite, Milestone::Start).unwrap();
    let finish = ttt.phase(Phase::Ferrite, Milestone::Finish).unwrap();
    for ((ts, ys), (tf, yf)) in start.points().zip(finish.points()) {
        assert_eq!(ys, yf);
        assert!(tf >= ts);
    }
}

#[test]
fn parallel_builds_are_bit_identical() {
    let sim = simulation(KineticsModel::Kirkaldy83);
    let pool = RayonScheduler::with_threads(3).unwrap();

    assert_eq!(sim.ttt(&InlineScheduler).unwrap(), sim.ttt(&pool).unwrap());
    assert_eq!(
        sim.critical_cooling_rates(&InlineScheduler).unwrap(),
        sim.critical_cooling_rates(&RayonScheduler::new()).unwrap()
    );
    let opts = CctOptions::default();
    assert_eq!(
        sim.cct(&InlineScheduler, &opts).unwrap(),
        sim.cct(&pool, &opts).unwrap()
    );
}

#[test]
fn critical_rates_positive_and_finite() {
    for model in KineticsModel::ALL {
        let rates = simulation(model)
            .critical_cooling_rates(&InlineScheduler)
            .unwrap();
        for (phase, m, rate) in rates.iter() {
            assert!(rate.is_finite() && rate > 0.0, "{model} {phase} {m}: {rate}");
        }
        let sorted = rates.sorted();
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn cct_curves_populated() {
    for model in KineticsModel::ALL {
        let sim = simulation(model);
        let cct = sim.cct(&InlineScheduler, &CctOptions::default()).unwrap();
        assert_eq!(cct.len(), 7);
        for phase in Phase::DIFFUSIONAL {
            for m in Milestone::ALL {
                assert!(!cct.phase(phase, m).unwrap().is_empty(), "{model} {phase} {m}");
            }
        }
        let martensite = cct.martensite().unwrap();
        assert_eq!(martensite.len(), 2);
        assert_eq!(martensite.time[0], 0.001);
    }
}

#[test]
fn cct_runs_every_candidate_rate() {
    let sim = simulation(KineticsModel::Li98);
    let opts = CctOptions::default();
    let tiers = sim.critical_cooling_rates(&InlineScheduler).unwrap().tiers();
    let schedule = cooling_schedule(&tiers, &opts);
    assert_eq!(schedule.len(), opts.max_iterations);

    // slow candidates all nucleate ferrite, so the curve gains one point each
    let cct = sim.cct(&InlineScheduler, &opts).unwrap();
    let ferrite = cct.phase(Phase::Ferrite, Milestone::Start).unwrap();
    assert!(ferrite.len() > 60, "{} ferrite points", ferrite.len());
    assert!(ferrite.points().all(|(t, y)| t.is_finite() && y.is_finite()));
}

#[test]
fn cct_rejects_unit_ferrite_fraction() {
    let mut config = SimulationConfig::from_composition(
        &scenario(),
        KineticsModel::Li98,
        &ConfigOverrides::default(),
    )
    .unwrap();
    config.equilibrium_ferrite_fraction = 1.0;

    let err = Simulation::builder()
        .composition(scenario())
        .config(config)
        .build()
        .unwrap_err();
    assert!(err.is_configuration(), "{err}");
}

#[test]
fn zero_cooling_rate_cannot_cool() {
    let overrides = ConfigOverrides {
        cooling_rate: Some(0.0),
        ..Default::default()
    };
    let sim = Simulation::from_composition(scenario(), KineticsModel::Li98, &overrides).unwrap();
    assert!(matches!(
        sim.cool(&CoolingOptions::default()),
        Err(SimulationError::NonPositiveCoolingRate { .. })
    ));
}

#[test]
fn slow_cooling_gives_ferrite_and_pearlite() {
    let sim = simulation(KineticsModel::Li98);
    let xfe = sim.config().equilibrium_ferrite_fraction;
    let result = sim.cool(&CoolingOptions::default()).unwrap();
    let data = &result.user_phase_fraction_data;
    let last = data.ferrite.len() - 1;
    assert!((data.ferrite[last] - xfe).abs() < 0.02);
    assert!(data.pearlite[last] > 0.2);
    assert!(data.martensite[last] < 1e-6);
}

#[test]
fn growing_ferrite_freezes_unnucleated_phases() {
    let sim = simulation(KineticsModel::Li98);
    let xfe = sim.config().equilibrium_ferrite_fraction;
    let path = ConstantRate::new(900.0, 30.0).unwrap();
    let trace = integrate_phase_fractions(&sim, &path, &CoolingOptions::default()).unwrap();

    let mut rows_with_ferrite_growing = 0;
    for pair in trace.rows().windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let ferrite = cur.phase(Phase::Ferrite);

        assert!(ferrite.volume <= xfe + 1e-12);
        assert!(cur.phase(Phase::Austenite).volume >= -1e-12);
        for phase in Phase::DIFFUSIONAL {
            assert!(cur.phase(phase).volume >= prev.phase(phase).volume, "{phase} shrank");
        }

        if ferrite.nucleation >= 1.0 && ferrite.completion < 1.0 {
            rows_with_ferrite_growing += 1;
            for phase in [Phase::Pearlite, Phase::Bainite] {
                let before = prev.phase(phase);
                if before.nucleation < 1.0 {
                    let after = cur.phase(phase);
                    assert_eq!(after.nucleation, before.nucleation, "{phase} advanced");
                    assert_eq!(after.completion, before.completion, "{phase} advanced");
                    assert_eq!(after.volume, 0.0);
                }
            }
        }
    }
    assert!(rows_with_ferrite_growing > 0);

    // ferrite grows first and takes most of its share, the rest quenches
    let last = trace.last().unwrap();
    let ferrite = last.phase(Phase::Ferrite).volume;
    assert!(ferrite > 0.5 && ferrite <= xfe, "ferrite {ferrite}");
    assert!(last.phase(Phase::Martensite).volume > 0.05);
    assert_eq!(last.phase(Phase::Bainite).nucleation, 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn volumes_conserved(rate in 0.5f64..800.0) {
        let sim = simulation(KineticsModel::Li98);
        let xfe = sim.config().equilibrium_ferrite_fraction;
        let path = ConstantRate::new(900.0, rate).unwrap();
        let trace = integrate_phase_fractions(&sim, &path, &CoolingOptions::default()).unwrap();
        for row in trace.rows() {
            prop_assert!((row.total_volume() - 1.0).abs() < 1e-9);
            for state in &row.phases {
                prop_assert!(state.volume >= -1e-12);
            }
            prop_assert!(row.phase(Phase::Ferrite).volume <= xfe + 1e-12);
            prop_assert!(row.phase(Phase::Pearlite).volume <= 1.0 - xfe + 1e-12);
        }
        prop_assert!(trace.rows().windows(2).all(|w| w[1].time > w[0].time));
    }
}
