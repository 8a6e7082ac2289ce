//! Derived transformation temperatures.
//!
//! Empirical regressions for the martensite and bainite start, the Ae1 and
//! the equilibrium ferrite fraction, combined with the Ae3 solver.
//! All temperatures in degC, compositions in wt%.

use qm_core::units::fahrenheit_to_celsius;

use crate::ae3::{ae3_temperature, eutectoid_carbon};
use crate::composition::AlloyComposition;
use crate::element::Element;
use crate::error::{ConfigResult, ConfigurationError};
use crate::model::KineticsModel;

/// Carbon solubility in ferrite at the eutectoid [wt%].
pub const FERRITE_CARBON_SOLUBILITY: f64 = 0.012;

/// Martensite start temperature [degC].
pub fn martensite_start(comp: &AlloyComposition, model: KineticsModel) -> f64 {
    let w = |e| comp.weight(e);
    match model {
        KineticsModel::Li98 => {
            539.0 - 423.0 * w(Element::C) - 30.4 * w(Element::Mn) - 17.7 * w(Element::Ni)
                - 12.1 * w(Element::Cr)
                - 7.5 * w(Element::Mo)
                + 10.0 * w(Element::Co)
                - 7.5 * w(Element::Si)
        }
        KineticsModel::Kirkaldy83 => {
            561.0 - 474.0 * w(Element::C) - 33.0 * w(Element::Mn) - 17.0 * w(Element::Ni)
                - 17.0 * w(Element::Cr)
                - 21.0 * w(Element::Mo)
        }
    }
}

/// Koistinen-Marburger rate parameter [1/K].
pub fn martensite_rate_parameter(comp: &AlloyComposition) -> f64 {
    let w = |e| comp.weight(e);
    0.0224 - 0.0107 * w(Element::C) - 0.0007 * w(Element::Mn) - 0.00005 * w(Element::Ni)
        - 0.00012 * w(Element::Cr)
        - 0.0001 * w(Element::Mo)
}

/// Bainite start temperature [degC].
pub fn bainite_start(comp: &AlloyComposition, model: KineticsModel) -> f64 {
    let w = |e| comp.weight(e);
    let common = -58.0 * w(Element::C) - 35.0 * w(Element::Mn) - 15.0 * w(Element::Ni)
        - 34.0 * w(Element::Cr)
        - 41.0 * w(Element::Mo);
    match model {
        KineticsModel::Li98 => 637.0 + common,
        KineticsModel::Kirkaldy83 => 656.0 + common - 75.0 * w(Element::Si),
    }
}

/// Andrews (1965) Ae1 [degC].
pub fn ae1_andrews(comp: &AlloyComposition) -> f64 {
    let w = |e| comp.weight(e);
    723.0 - 10.7 * w(Element::Mn) - 16.9 * w(Element::Ni)
        + 29.1 * w(Element::Si)
        + 16.9 * w(Element::Cr)
        + 290.0 * w(Element::As)
        + 6.38 * w(Element::W)
}

/// Grange (1961) Ae1, published in degF, returned in degC.
pub fn ae1_grange(comp: &AlloyComposition) -> f64 {
    let w = |e| comp.weight(e);
    let ae1_f = 1333.0 - 25.0 * w(Element::Mn) + 40.0 * w(Element::Si) - 26.0 * w(Element::Ni)
        + 42.0 * w(Element::Cr);
    fahrenheit_to_celsius(ae1_f)
}

/// Eldis Ae1 [degC].
pub fn ae1_eldis(comp: &AlloyComposition) -> f64 {
    let w = |e| comp.weight(e);
    712.0 - 17.8 * w(Element::Mn) - 19.1 * w(Element::Ni)
        + 20.1 * w(Element::Si)
        + 11.9 * w(Element::Cr)
        + 9.8 * w(Element::Mo)
}

/// Ae1 [degC] as the mean of the Andrews, Grange and Eldis correlations.
pub fn ae1_temperature(comp: &AlloyComposition) -> f64 {
    (ae1_andrews(comp) + ae1_grange(comp) + ae1_eldis(comp)) / 3.0
}

/// Equilibrium ferrite fraction from the lever rule at the eutectoid.
pub fn equilibrium_ferrite_fraction(carbon_wt: f64, eutectoid_carbon_wt: f64) -> f64 {
    let span = eutectoid_carbon_wt - FERRITE_CARBON_SOLUBILITY;
    (span - carbon_wt) / span
}

/// Every composition-derived quantity of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTemperatures {
    pub model: KineticsModel,
    /// Martensite start [degC]
    pub ms: f64,
    /// Koistinen-Marburger rate parameter [1/K]
    pub ms_rate_param: f64,
    /// Bainite start [degC]
    pub bs: f64,
    pub ae1: f64,
    pub ae3: f64,
    /// Carbon where Ae3 meets Ae1 [wt%]
    pub eutectoid_carbon: f64,
    /// Xfe
    pub ferrite_fraction: f64,
}

impl DerivedTemperatures {
    /// Evaluate every regression without validating the result.
    pub fn compute(comp: &AlloyComposition, model: KineticsModel) -> Self {
        let ae1 = ae1_temperature(comp);
        let ae3 = ae3_temperature(comp, comp.carbon());
        let ceut = eutectoid_carbon(comp, ae1);
        let derived = Self {
            model,
            ms: martensite_start(comp, model),
            ms_rate_param: martensite_rate_parameter(comp),
            bs: bainite_start(comp, model),
            ae1,
            ae3,
            eutectoid_carbon: ceut,
            ferrite_fraction: equilibrium_ferrite_fraction(comp.carbon(), ceut),
        };
        tracing::debug!(?derived, "derived transformation temperatures");
        derived
    }
}

/// Derive and check the transformation temperatures of `comp`.
///
/// Fails when the alloy has no two-phase ferrite/pearlite field (Xfe outside
/// (0, 1)) or when Ae1/Ae3 are not positive.
pub fn derive_temperatures(
    comp: &AlloyComposition,
    model: KineticsModel,
) -> ConfigResult<DerivedTemperatures> {
    let derived = DerivedTemperatures::compute(comp, model);

    for (name, value) in [("Ae1", derived.ae1), ("Ae3", derived.ae3)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConfigurationError::CriticalTemperature { name, value });
        }
    }
    let xfe = derived.ferrite_fraction;
    if !(xfe > 0.0 && xfe < 1.0) {
        return Err(ConfigurationError::FerriteFraction { value: xfe });
    }
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> AlloyComposition {
        AlloyComposition::from_symbols([("C", 0.2), ("Mn", 1.2), ("Si", 0.3), ("Fe", 98.3)])
            .unwrap()
    }

    #[test]
    fn li98_regressions() {
        let comp = scenario();
        assert!((martensite_start(&comp, KineticsModel::Li98) - 415.67).abs() < 1e-9);
        assert!((bainite_start(&comp, KineticsModel::Li98) - 583.4).abs() < 1e-9);
    }

    #[test]
    fn kirkaldy_regressions() {
        let comp = scenario();
        assert!((martensite_start(&comp, KineticsModel::Kirkaldy83) - 426.6).abs() < 1e-9);
        assert!((bainite_start(&comp, KineticsModel::Kirkaldy83) - 579.9).abs() < 1e-9);
    }

    #[test]
    fn grange_converts_from_fahrenheit() {
        let plain = AlloyComposition::from_symbols([("C", 0.1), ("Fe", 99.9)]).unwrap();
        assert!((ae1_grange(&plain) - (1333.0 - 32.0) * 5.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn ae1_is_mean_of_three() {
        let comp = scenario();
        let mean = (ae1_andrews(&comp) + ae1_grange(&comp) + ae1_eldis(&comp)) / 3.0;
        assert_eq!(ae1_temperature(&comp), mean);
        assert!((ae1_temperature(&comp) - 709.446).abs() < 1e-2);
    }

    #[test]
    fn rate_parameter_positive_for_low_alloy() {
        let k = martensite_rate_parameter(&scenario());
        assert!((k - (0.0224 - 0.00214 - 0.00084)).abs() < 1e-12);
    }

    #[test]
    fn lever_rule() {
        assert!((equilibrium_ferrite_fraction(0.0, 0.812) - 1.0).abs() < 1e-12);
        assert!(equilibrium_ferrite_fraction(0.9, 0.812) < 0.0);
    }

    #[test]
    fn scenario_derivation() {
        let d = derive_temperatures(&scenario(), KineticsModel::Li98).unwrap();
        assert!(d.ae1 > 700.0 && d.ae1 < 710.0);
        assert!(d.ae3 > 835.0 && d.ae3 < 850.0);
        assert!(d.ae1 < d.ae3);
        assert!((d.ferrite_fraction - 0.7685).abs() < 5e-3);
    }

    #[test]
    fn pure_iron_rejected() {
        let comp = AlloyComposition::from_symbols([("C", 0.0), ("Fe", 100.0)]).unwrap();
        let err = derive_temperatures(&comp, KineticsModel::Li98).unwrap_err();
        assert!(matches!(err, ConfigurationError::FerriteFraction { .. }));
    }

    #[test]
    fn hypereutectoid_rejected() {
        let comp = AlloyComposition::from_symbols([("C", 1.0), ("Fe", 99.0)]).unwrap();
        let err = derive_temperatures(&comp, KineticsModel::Li98).unwrap_err();
        assert!(matches!(err, ConfigurationError::FerriteFraction { .. }));
    }
}
