//! Isothermal transformation time ("torr") per phase and milestone.
//!
//! Both kinetics families share the form
//!
//! ```text
//! tau(T) = F(C) / (grain(G) * dT^m * exp(-Q / (R Tk))) * S
//! ```
//!
//! with `dT` the undercooling below the phase's upper bound and `S` the kernel
//! integral from the [`PhaseIntegralTable`].

use qm_alloy::{AlloyComposition, Element, KineticsModel, SimulationConfig};
use qm_core::units::{celsius_to_kelvin, constants::R_CAL_PER_MOL_K};

use crate::integral_table::PhaseIntegralTable;
use crate::phase::{Milestone, Phase};

/// Shortest transformation time returned [s].
pub const TORR_FLOOR: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
struct RateLaw {
    /// Composition factor divided by the grain-size term
    prefactor: f64,
    /// Activation energy [cal/mol]
    activation: f64,
    undercooling_exponent: i32,
}

/// Precomputed torr model for one composition and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TorrEvaluator {
    model: KineticsModel,
    laws: [RateLaw; 3],
    integrals: [[f64; 2]; 3],
    ae3: f64,
    ae1: f64,
    bs: f64,
    ms: f64,
}

impl TorrEvaluator {
    pub fn new(
        comp: &AlloyComposition,
        config: &SimulationConfig,
        table: &PhaseIntegralTable,
    ) -> Self {
        let w = |e| comp.weight(e);
        let (c, mn, si, ni, cr, mo) = (
            w(Element::C),
            w(Element::Mn),
            w(Element::Si),
            w(Element::Ni),
            w(Element::Cr),
            w(Element::Mo),
        );
        let g = config.grain_size;

        let laws = match config.model {
            KineticsModel::Li98 => {
                let q = 27_500.0;
                [
                    RateLaw {
                        prefactor: (1.0 + 6.31 * c + 1.78 * mn + 0.31 * si + 1.12 * ni
                            + 2.7 * cr
                            + 4.06 * mo)
                            .exp()
                            / 2f64.powf(0.41 * g),
                        activation: q,
                        undercooling_exponent: 3,
                    },
                    RateLaw {
                        prefactor: (-4.25 + 4.12 * c + 4.36 * mn + 0.44 * si + 1.71 * ni
                            + 3.33 * cr
                            + 5.19 * mo.sqrt())
                        .exp()
                            / 2f64.powf(0.32 * g),
                        activation: q,
                        undercooling_exponent: 3,
                    },
                    RateLaw {
                        prefactor: (-10.23 + 10.18 * c + 0.85 * mn + 0.55 * ni + 0.9 * cr
                            + 0.36 * mo)
                            .exp()
                            / 2f64.powf(0.29 * g),
                        activation: q,
                        undercooling_exponent: 2,
                    },
                ]
            }
            KineticsModel::Kirkaldy83 => {
                let grain = 2f64.powf((g - 1.0) / 2.0);
                [
                    RateLaw {
                        prefactor: (59.6 * mn + 1.45 * ni + 67.7 * cr + 244.0 * mo) / grain,
                        activation: 23_500.0,
                        undercooling_exponent: 3,
                    },
                    RateLaw {
                        prefactor: (1.79 + 5.42 * (cr + mo + 4.0 * mo * ni)) / grain,
                        activation: 27_500.0,
                        undercooling_exponent: 3,
                    },
                    RateLaw {
                        prefactor: (2.34 + 10.1 * c + 3.8 * cr + 19.0 * mo) * 1e-4 / grain,
                        activation: 27_500.0,
                        undercooling_exponent: 2,
                    },
                ]
            }
        };

        Self {
            model: config.model,
            laws,
            integrals: *table.values(),
            ae3: config.ae3_temp,
            ae1: config.ae1_temp,
            bs: config.bs_temp,
            ms: config.ms_temp,
        }
    }

    pub fn model(&self) -> KineticsModel {
        self.model
    }

    /// Temperature [degC] below which `phase` has a driving force.
    pub fn upper_bound(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Austenite => f64::INFINITY,
            Phase::Ferrite => self.ae3,
            Phase::Pearlite => self.ae1,
            Phase::Bainite | Phase::Martensite => self.bs,
        }
    }

    /// Temperature window `[lower, upper)` [degC] in which `phase` forms.
    ///
    /// Ferrite and pearlite end at Bs, bainite at Ms. `None` for austenite and
    /// martensite, which have no isothermal window.
    pub fn window(&self, phase: Phase) -> Option<(f64, f64)> {
        match phase {
            Phase::Ferrite => Some((self.bs, self.ae3)),
            Phase::Pearlite => Some((self.bs, self.ae1)),
            Phase::Bainite => Some((self.ms, self.bs)),
            Phase::Austenite | Phase::Martensite => None,
        }
    }

    /// Time [s] to reach `milestone` of `phase` at constant `temp_c`.
    ///
    /// `+inf` for austenite and at or above the phase's upper bound.
    pub fn torr(&self, phase: Phase, milestone: Milestone, temp_c: f64) -> f64 {
        let Some(row) = phase.kinetics_row() else {
            return f64::INFINITY;
        };
        let upper = self.upper_bound(phase);
        if temp_c >= upper {
            return f64::INFINITY;
        }

        let law = &self.laws[row];
        let undercooling = (upper - temp_c).powi(law.undercooling_exponent);
        let boltzmann = (-law.activation / (R_CAL_PER_MOL_K * celsius_to_kelvin(temp_c))).exp();
        let integral = self.integrals[row][milestone.index()];
        let tau = law.prefactor / (undercooling * boltzmann) * integral;
        tau.max(TORR_FLOOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qm_alloy::ConfigOverrides;

    fn evaluator(model: KineticsModel) -> TorrEvaluator {
        let comp =
            AlloyComposition::from_symbols([("C", 0.2), ("Mn", 1.2), ("Si", 0.3), ("Fe", 98.3)])
                .unwrap();
        let config =
            SimulationConfig::from_composition(&comp, model, &ConfigOverrides::default()).unwrap();
        let table = PhaseIntegralTable::build(&comp, &config).unwrap();
        TorrEvaluator::new(&comp, &config, &table)
    }

    #[test]
    fn no_driving_force_above_upper_bound() {
        let ev = evaluator(KineticsModel::Li98);
        let ae3 = ev.upper_bound(Phase::Ferrite);
        assert!(ev.torr(Phase::Ferrite, Milestone::Start, ae3).is_infinite());
        assert!(ev.torr(Phase::Ferrite, Milestone::Start, ae3 + 10.0).is_infinite());
        assert!(ev.torr(Phase::Austenite, Milestone::Start, 500.0).is_infinite());
    }

    #[test]
    fn finish_after_start() {
        for model in KineticsModel::ALL {
            let ev = evaluator(model);
            for phase in Phase::DIFFUSIONAL {
                let (lo, hi) = ev.window(phase).unwrap();
                let t = 0.5 * (lo + hi);
                let s = ev.torr(phase, Milestone::Start, t);
                let f = ev.torr(phase, Milestone::Finish, t);
                assert!(s.is_finite() && f >= s, "{model} {phase} at {t}: {s} {f}");
            }
        }
    }

    #[test]
    fn martensite_reads_bainite() {
        let ev = evaluator(KineticsModel::Li98);
        let t = ev.window(Phase::Bainite).unwrap().0 + 5.0;
        assert_eq!(
            ev.torr(Phase::Martensite, Milestone::Finish, t),
            ev.torr(Phase::Bainite, Milestone::Finish, t)
        );
    }

    #[test]
    fn floor_applies() {
        let ev = evaluator(KineticsModel::Li98);
        for phase in Phase::DIFFUSIONAL {
            let (lo, hi) = ev.window(phase).unwrap();
            let mut t = lo;
            while t < hi {
                assert!(ev.torr(phase, Milestone::Start, t) >= TORR_FLOOR);
                t += 7.0;
            }
        }
    }

    #[test]
    fn nose_lies_inside_ferrite_window() {
        let ev = evaluator(KineticsModel::Li98);
        let (lo, hi) = ev.window(Phase::Ferrite).unwrap();
        let near_top = ev.torr(Phase::Ferrite, Milestone::Start, hi - 0.5);
        let middle = ev.torr(Phase::Ferrite, Milestone::Start, 0.5 * (lo + hi));
        assert!(middle < near_top);
    }
}
