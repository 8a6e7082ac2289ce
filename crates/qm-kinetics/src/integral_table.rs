//! Per-phase kernel integrals.
//!
//! The kernel integral up to the normalized milestone fraction is a constant
//! factor of every torr evaluation, so it is computed once per simulation.

use qm_alloy::{AlloyComposition, KineticsModel, SimulationConfig};

use crate::error::{KineticsError, KineticsResult};
use crate::integrator::{BOUND_CLAMP, KERNEL_TOLERANCE, Kernel, integrate_kernel};
use crate::phase::{Milestone, Phase};

/// Kernel integrals for {ferrite, pearlite, bainite} x {start, finish}.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseIntegralTable {
    model: KineticsModel,
    values: [[f64; 2]; 3],
    bounds: [[f64; 2]; 3],
}

impl PhaseIntegralTable {
    /// Integrate every (phase, milestone) kernel for `config`.
    ///
    /// Milestone fractions are normalized by the phase's equilibrium share:
    /// ferrite by Xfe, pearlite by 1 - Xfe, bainite not at all.
    pub fn build(comp: &AlloyComposition, config: &SimulationConfig) -> KineticsResult<Self> {
        config.validate()?;

        let xfe = config.equilibrium_ferrite_fraction;
        let fractions = [
            config.nucleation_start_fraction,
            config.nucleation_finish_fraction,
        ];
        let mut values = [[0.0; 2]; 3];
        let mut bounds = [[0.0; 2]; 3];

        for phase in Phase::DIFFUSIONAL {
            let Some(row) = phase.kinetics_row() else {
                continue;
            };
            let share = match phase {
                Phase::Ferrite => xfe,
                Phase::Pearlite => 1.0 - xfe,
                _ => 1.0,
            };
            let kernel = Kernel::for_phase(config.model, phase, comp);
            for milestone in Milestone::ALL {
                let bound = (fractions[milestone.index()] / share).min(BOUND_CLAMP);
                let value = integrate_kernel(kernel, bound, KERNEL_TOLERANCE);
                if !value.is_finite() {
                    return Err(KineticsError::NonFiniteIntegral {
                        phase,
                        milestone,
                        value,
                    });
                }
                bounds[row][milestone.index()] = bound;
                values[row][milestone.index()] = value;
            }
        }

        tracing::debug!(model = %config.model, ?values, "built phase integral table");
        Ok(Self {
            model: config.model,
            values,
            bounds,
        })
    }

    pub fn model(&self) -> KineticsModel {
        self.model
    }

    /// Integral for `phase` and `milestone`; martensite reads the bainite row.
    ///
    /// `None` for austenite.
    pub fn get(&self, phase: Phase, milestone: Milestone) -> Option<f64> {
        phase
            .kinetics_row()
            .map(|row| self.values[row][milestone.index()])
    }

    /// Normalized upper integration bound used for `phase` and `milestone`.
    pub fn bound(&self, phase: Phase, milestone: Milestone) -> Option<f64> {
        phase
            .kinetics_row()
            .map(|row| self.bounds[row][milestone.index()])
    }

    pub fn values(&self) -> &[[f64; 2]; 3] {
        &self.values
    }
}
