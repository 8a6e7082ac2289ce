//! Double-exponential (tanh-sinh) quadrature and the kinetics kernels.
//!
//! The substitution `x = a + (b - a) / (1 + exp(-pi/2 sinh t))` pushes both
//! endpoints to infinity, so integrable endpoint singularities like the
//! `x^-0.4` of the Li98 kernel converge without special handling. Each pass
//! halves the step and reuses every previous sample.

use std::f64::consts::FRAC_PI_2;

use qm_alloy::{AlloyComposition, Element, KineticsModel};

use crate::phase::Phase;

/// Largest upper bound of a kernel integral; the kernels diverge at 1.
pub const BOUND_CLAMP: f64 = 0.999_999_9;

/// Step halvings stop once the sample multiplier reaches this value.
pub const MAX_REFINEMENT: usize = 256;

/// Default relative error target for kernel integrals.
pub const KERNEL_TOLERANCE: f64 = 1e-6;

const EFS: f64 = 0.1;
const HOFF: f64 = 8.5;

/// Result of one quadrature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,
    /// Difference estimate of the last refinement, on the scale of `value`
    pub error: f64,
    pub converged: bool,
    /// Number of step halvings performed
    pub refinements: usize,
}

/// Integrate `f` over `[a, b]` to relative error `eps`.
///
/// Never fails; check `converged` when the refinement cap matters.
pub fn integrate<F>(f: F, a: f64, b: f64, eps: f64) -> Quadrature
where
    F: Fn(f64) -> f64,
{
    let epsln = 1.0 - (EFS * eps).ln();
    let epsh = (EFS * eps).sqrt();
    let h0 = HOFF / epsln;
    let ehp = h0.exp();
    let ehm = 1.0 / ehp;
    let epst = (-ehm * epsln).exp();
    let ba = b - a;

    let mut ir = f(0.5 * (a + b)) * (0.25 * ba);
    let mut i = ir * (2.0 * FRAC_PI_2);
    let mut err = i.abs() * epst;
    let mut h = 2.0 * h0;
    let mut m = 1usize;
    let mut errh = 0.0;
    let mut errd;
    let mut refinements = 0;

    loop {
        let iback = i;
        let irback = ir;
        let mut t = 0.5 * h;
        loop {
            let e = t.exp();
            let mut ep = FRAC_PI_2 * e;
            let mut em = FRAC_PI_2 / e;
            loop {
                let xw = 1.0 / (1.0 + (ep - em).exp());
                let xa = ba * xw;
                let wg = xa * (1.0 - xw);
                let fa = f(a + xa) * wg;
                let fb = f(b - xa) * wg;
                ir += fa + fb;
                i += (fa + fb) * (ep + em);
                let errt = (fa.abs() + fb.abs()) * (ep + em);
                if m == 1 {
                    err += errt * epst;
                }
                ep *= ehp;
                em *= ehm;
                if !(errt > err || xa > epsh) {
                    break;
                }
            }
            t += h;
            if t >= h0 {
                break;
            }
        }

        if m == 1 {
            errh = (err / epst) * epsh * h0;
            errd = 1.0 + 2.0 * errh;
        } else {
            errd = h * ((i - 2.0 * iback).abs() + 4.0 * (ir - 2.0 * irback).abs());
        }
        h *= 0.5;
        m *= 2;
        refinements += 1;
        if !(errd > errh && m < MAX_REFINEMENT) {
            break;
        }
    }

    Quadrature {
        value: i * h,
        error: errd,
        converged: errd <= errh,
        refinements,
    }
}

/// Integrand of the sigmoidal rate law, `S(X)` / `I(X)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// `1 / (x^(0.4(1-x)) (1-x)^(0.4x))`
    Li98,
    /// `1 / (x^(2(1-x)/3) (1-x)^(2x/3))`
    Kirkaldy83,
    /// Kirkaldy83 kernel with bainite retardation `exp(B x^2)`.
    Kirkaldy83Bainite { retardation: f64 },
}

impl Kernel {
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Kernel::Li98 => 1.0 / (x.powf(0.4 * (1.0 - x)) * (1.0 - x).powf(0.4 * x)),
            Kernel::Kirkaldy83 => kirkaldy(x),
            Kernel::Kirkaldy83Bainite { retardation } => (retardation * x * x).exp() * kirkaldy(x),
        }
    }

    /// Kernel used for `phase` under `model`.
    ///
    /// Kirkaldy83 bainite carries the composition-dependent retardation.
    pub fn for_phase(model: KineticsModel, phase: Phase, comp: &AlloyComposition) -> Self {
        match (model, phase) {
            (KineticsModel::Li98, _) => Kernel::Li98,
            (KineticsModel::Kirkaldy83, Phase::Bainite | Phase::Martensite) => {
                Kernel::Kirkaldy83Bainite {
                    retardation: bainite_retardation(comp),
                }
            }
            (KineticsModel::Kirkaldy83, _) => Kernel::Kirkaldy83,
        }
    }
}

fn kirkaldy(x: f64) -> f64 {
    1.0 / (x.powf(2.0 * (1.0 - x) / 3.0) * (1.0 - x).powf(2.0 * x / 3.0))
}

/// Kirkaldy83 bainite retardation coefficient.
pub fn bainite_retardation(comp: &AlloyComposition) -> f64 {
    let w = |e| comp.weight(e);
    1.9 * w(Element::C) + 2.5 * w(Element::Mn) + 0.9 * w(Element::Ni) + 1.7 * w(Element::Cr)
        + 4.0 * w(Element::Mo)
        - 2.6
}

/// `integral_0^upper kernel(x) dx`, with `upper` clamped below 1.
///
/// Non-positive bounds yield 0.
pub fn integrate_kernel(kernel: Kernel, upper: f64, eps: f64) -> f64 {
    if !(upper > 0.0) {
        return 0.0;
    }
    let upper = upper.min(BOUND_CLAMP);
    let q = integrate(|x| kernel.eval(x), 0.0, upper, eps);
    if !q.converged {
        tracing::debug!(?kernel, upper, error = q.error, "kernel quadrature hit refinement cap");
    }
    q.value
}
