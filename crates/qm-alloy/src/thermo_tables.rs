//! Reference data for the Ae3 equilibrium balance.
//!
//! Free-energy and enthalpy tables for the alpha -> gamma change of pure iron
//! on a 25 K grid from 300 K to 1500 K, plus per-element solute data.

use crate::element::Element;
use qm_core::numeric::interp_uniform;

pub(crate) const TABLE_T0_K: f64 = 300.0;
pub(crate) const TABLE_DT_K: f64 = 25.0;

/// alpha -> gamma Gibbs energy of pure iron [J/mol] at `300 + 25 i` K.
pub(crate) const GIBBS_ALPHA_GAMMA: [f64; 49] = [
    3234.68, 3078.80, 2926.67, 2778.30, 2633.68, 2492.80, 2355.68,
    2222.30, 2092.68, 1966.80, 1844.67, 1726.30, 1611.67, 1500.80,
    1393.67, 1290.30, 1190.68, 1094.80, 1002.67, 914.30, 829.67,
    748.80, 671.67, 598.30, 528.67, 462.80, 400.67, 342.30,
    287.68, 236.80, 189.68, 146.30, 106.67, 70.80, 38.67,
    10.30, -15.00, -40.00, -65.00, -90.00, -115.00, -140.00,
    -165.00, -190.00, -215.00, -240.00, -265.00, -290.00, -315.00,
];

/// alpha -> gamma enthalpy of pure iron [J/mol] on the same grid.
pub(crate) const ENTHALPY_ALPHA_GAMMA: [f64; 49] = [
    5127.68, 5080.80, 5030.17, 4975.80, 4917.68, 4855.80, 4790.18,
    4720.80, 4647.68, 4570.80, 4490.18, 4405.80, 4317.68, 4225.80,
    4130.18, 4030.80, 3927.68, 3820.80, 3710.18, 3595.80, 3477.68,
    3355.80, 3230.18, 3100.80, 2967.68, 2830.80, 2690.18, 2545.80,
    2397.68, 2245.80, 2090.18, 1930.80, 1767.67, 1600.80, 1430.17,
    1255.80, 1185.00, 1185.00, 1185.00, 1185.00, 1185.00, 1185.00,
    1185.00, 1185.00, 1185.00, 1185.00, 1185.00, 1185.00, 1185.00,
];

/// Carbon alpha/gamma partition ratio in binary Fe-C.
pub(crate) const CARBON_PARTITION: f64 = 0.03;

pub(crate) fn gibbs_alpha_gamma(t_k: f64) -> f64 {
    interp_uniform(TABLE_T0_K, TABLE_DT_K, &GIBBS_ALPHA_GAMMA, t_k)
}

pub(crate) fn enthalpy_alpha_gamma(t_k: f64) -> f64 {
    interp_uniform(TABLE_T0_K, TABLE_DT_K, &ENTHALPY_ALPHA_GAMMA, t_k)
}

/// Substitutional solute alpha/gamma partition ratio.
///
/// Above one: ferrite stabiliser (raises Ae3). Below one: austenite stabiliser.
pub(crate) fn partition_coefficient(element: Element) -> f64 {
    match element {
        Element::Mn => 0.90,
        Element::Si => 1.17,
        Element::Ni => 0.88,
        Element::Cr => 0.92,
        Element::Mo => 1.42,
        Element::V => 1.73,
        Element::W => 1.33,
        Element::Cu => 0.83,
        Element::Co => 1.05,
        Element::Al => 1.26,
        Element::Ti => 1.60,
        Element::Nb => 1.40,
        Element::P => 1.50,
        Element::As => 1.30,
        _ => 1.0,
    }
}

/// Wagner interaction coefficient of a solute with carbon in austenite.
pub(crate) fn carbon_interaction(element: Element) -> f64 {
    match element {
        Element::Mn => -4.1,
        Element::Si => 8.9,
        Element::Ni => 4.6,
        Element::Cr => -21.0,
        Element::Mo => -9.0,
        Element::V => -19.0,
        Element::W => -6.0,
        Element::Cu => 1.5,
        Element::Co => 2.6,
        Element::Al => 5.3,
        Element::Ti => -40.0,
        Element::Nb => -45.0,
        _ => 0.0,
    }
}
