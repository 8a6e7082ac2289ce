//! Ortho-equilibrium Ae3 solver.
//!
//! The austenite/ferrite boundary of a dilute Fe-C-X alloy is where iron has
//! the same chemical potential in both phases:
//!
//! ```text
//! dG(T) = R T ln[(1 - sum k_i x_i) / (1 - sum x_i)]
//! ```
//!
//! `dG` is the alpha -> gamma free energy of pure iron, `x_i` the austenite
//! mole fractions and `k_i` the alpha/gamma partition ratios. Carbon's ratio
//! is shifted by its interaction with the substitutional solutes. The balance
//! is solved with Newton corrections using tabulated `dG` and `dH`.

use qm_core::units::{constants::R_J_PER_MOL_K, kelvin_to_celsius};

use crate::composition::AlloyComposition;
use crate::element::Element;
use crate::thermo_tables::{
    CARBON_PARTITION, carbon_interaction, enthalpy_alpha_gamma, gibbs_alpha_gamma,
    partition_coefficient,
};

/// alpha/gamma transition of pure iron [K].
pub const PURE_IRON_A3_K: f64 = 1185.0;

/// Upper end of the carbon sweep [wt%].
pub const SWEEP_MAX_CARBON: f64 = 0.97;

/// Default carbon increment of the sweep [wt%].
pub const SWEEP_STEP: f64 = 0.01;

/// Ae3 solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct Ae3Options {
    /// Convergence threshold on the temperature correction [K]
    pub tolerance_k: f64,
    /// Iteration cap before falling back to the averaged estimate
    pub max_iterations: usize,
}

impl Default for Ae3Options {
    fn default() -> Self {
        Self {
            tolerance_k: 0.5,
            max_iterations: 100,
        }
    }
}

/// Ae3 solver result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ae3Solution {
    /// Ae3 temperature [degC]
    pub temperature: f64,
    /// Newton iterations used
    pub iterations: usize,
    /// False when the iteration cap was hit and the last two estimates were averaged
    pub converged: bool,
}

/// Ae3 [degC] of `comp` with its carbon replaced by `carbon_wt`.
pub fn ae3_temperature(comp: &AlloyComposition, carbon_wt: f64) -> f64 {
    solve_ae3(comp, carbon_wt, &Ae3Options::default()).temperature
}

/// Solve the Ae3 balance for one carbon content.
///
/// Never fails: non-convergence averages the last two estimates and logs a warning.
pub fn solve_ae3(comp: &AlloyComposition, carbon_wt: f64, options: &Ae3Options) -> Ae3Solution {
    let carbon_wt = carbon_wt.max(0.0);
    let log_ratio = partition_log_ratio(&comp.with_carbon(carbon_wt));

    let mut t = PURE_IRON_A3_K - 200.0 * carbon_wt.sqrt();
    let mut previous = t;

    for iteration in 1..=options.max_iterations {
        let g = gibbs_alpha_gamma(t);
        let h = enthalpy_alpha_gamma(t);
        let residual = g - R_J_PER_MOL_K * t * log_ratio;
        // d(dG)/dT = (dG - dH) / T
        let slope = (g - h) / t - R_J_PER_MOL_K * log_ratio;
        if slope == 0.0 || !slope.is_finite() {
            tracing::warn!(carbon_wt, t_k = t, "Ae3 balance has a flat slope");
            break;
        }

        let correction = -residual / slope;
        let next = t + correction;
        if correction.abs() < options.tolerance_k {
            tracing::debug!(carbon_wt, iterations = iteration, "Ae3 converged");
            return Ae3Solution {
                temperature: kelvin_to_celsius(next),
                iterations: iteration,
                converged: true,
            };
        }
        previous = t;
        t = next;
    }

    let averaged = 0.5 * (t + previous);
    tracing::warn!(
        carbon_wt,
        ae3_k = averaged,
        "Ae3 did not converge, averaging last two estimates"
    );
    Ae3Solution {
        temperature: kelvin_to_celsius(averaged),
        iterations: options.max_iterations,
        converged: false,
    }
}

/// `ln[(1 - sum k_i x_i) / (1 - sum x_i)]` for the composition.
fn partition_log_ratio(comp: &AlloyComposition) -> f64 {
    let x = comp.mole_fractions();
    let x_c = x.get(Element::C);

    let interaction: f64 = x.solutes().map(|(e, xi)| carbon_interaction(e) * xi).sum();
    let k_c = CARBON_PARTITION * interaction.exp();

    let mut solute_total = x_c;
    let mut partitioned_total = k_c * x_c;
    for (element, xi) in x.solutes() {
        solute_total += xi;
        partitioned_total += partition_coefficient(element) * xi;
    }

    ((1.0 - partitioned_total) / (1.0 - solute_total)).ln()
}

/// Ae3 [degC] against carbon from 0 to 0.97 wt%.
///
/// Returns `(carbon_wt, ae3)` pairs in increasing carbon order.
pub fn ae3_carbon_sweep(comp: &AlloyComposition, step: f64) -> Vec<(f64, f64)> {
    let step = if step > 0.0 { step } else { SWEEP_STEP };
    let count = (SWEEP_MAX_CARBON / step).round() as usize + 1;
    (0..count)
        .map(|i| {
            let carbon = step * i as f64;
            (carbon, ae3_temperature(comp, carbon))
        })
        .collect()
}

/// Carbon content [wt%] at which the Ae3 sweep meets `ae1` [degC].
pub fn eutectoid_carbon(comp: &AlloyComposition, ae1: f64) -> f64 {
    eutectoid_carbon_in_sweep(&ae3_carbon_sweep(comp, SWEEP_STEP), ae1)
}

/// Carbon content [wt%] at which an existing `(carbon_wt, ae3)` sweep meets `ae1`.
///
/// Interpolates linearly between sweep points. When the sweep never reaches
/// Ae1 the last two points are extrapolated. A sweep shorter than two points
/// yields NaN.
pub fn eutectoid_carbon_in_sweep(sweep: &[(f64, f64)], ae1: f64) -> f64 {
    for pair in sweep.windows(2) {
        let (c0, t0) = pair[0];
        let (c1, t1) = pair[1];
        if t1 <= ae1 && ae1 <= t0 {
            return c0 + (c1 - c0) * (t0 - ae1) / (t0 - t1);
        }
    }

    let &[.., (c0, t0), (c1, t1)] = sweep else {
        return f64::NAN;
    };
    let extrapolated = c1 + (c1 - c0) * (ae1 - t1) / (t1 - t0);
    tracing::warn!(
        ae1,
        carbon_wt = extrapolated,
        "Ae3 sweep does not cross Ae1, extrapolating eutectoid carbon"
    );
    extrapolated
}
