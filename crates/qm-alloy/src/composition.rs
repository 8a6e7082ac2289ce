//! Alloy composition in weight percent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{AlloyError, AlloyResult};

/// Steel composition as weight percent per element.
///
/// Carbon and iron must be listed; every other element reads as zero when
/// absent. The stored iron value is informational: mole-fraction conversion
/// always takes iron as the balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct AlloyComposition {
    weights: BTreeMap<Element, f64>,
}

impl AlloyComposition {
    /// Create a composition from `(element, wt%)` pairs.
    ///
    /// Validates that C and Fe are present, no element repeats, every weight
    /// is finite and non-negative, and the non-iron additions stay within 100 wt%.
    pub fn new(weights: impl IntoIterator<Item = (Element, f64)>) -> AlloyResult<Self> {
        let mut map = BTreeMap::new();
        for (element, wt) in weights {
            if !wt.is_finite() || wt < 0.0 {
                return Err(AlloyError::InvalidWeight {
                    symbol: element.symbol(),
                    value: wt,
                });
            }
            if map.insert(element, wt).is_some() {
                return Err(AlloyError::DuplicateElement {
                    symbol: element.symbol(),
                });
            }
        }

        for required in [Element::C, Element::Fe] {
            if !map.contains_key(&required) {
                return Err(AlloyError::MissingElement {
                    symbol: required.symbol(),
                });
            }
        }

        let total: f64 = map
            .iter()
            .filter(|(e, _)| **e != Element::Fe)
            .map(|(_, wt)| *wt)
            .sum();
        if total > 100.0 {
            return Err(AlloyError::BalanceExceeded { total });
        }

        Ok(Self { weights: map })
    }

    /// Create a composition from element symbols.
    pub fn from_symbols<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> AlloyResult<Self> {
        let parsed = pairs
            .into_iter()
            .map(|(symbol, wt)| {
                symbol
                    .parse::<Element>()
                    .map(|e| (e, wt))
                    .map_err(|_| AlloyError::UnknownElement {
                        symbol: symbol.to_string(),
                    })
            })
            .collect::<AlloyResult<Vec<_>>>()?;
        Self::new(parsed)
    }

    /// Weight percent of an element (0.0 if not listed).
    pub fn weight(&self, element: Element) -> f64 {
        self.weights.get(&element).copied().unwrap_or(0.0)
    }

    pub fn carbon(&self) -> f64 {
        self.weight(Element::C)
    }

    /// Iron balance: 100 wt% minus every other listed element.
    pub fn iron_balance(&self) -> f64 {
        100.0
            - self
                .weights
                .iter()
                .filter(|(e, _)| **e != Element::Fe)
                .map(|(_, wt)| *wt)
                .sum::<f64>()
    }

    /// Copy of this composition with a different carbon content.
    ///
    /// Used by the Ae3 carbon sweep; the iron balance follows automatically.
    pub fn with_carbon(&self, carbon_wt: f64) -> Self {
        let mut weights = self.weights.clone();
        weights.insert(Element::C, carbon_wt.max(0.0));
        Self { weights }
    }

    /// Iterate over listed elements in periodic-table order of [`Element`].
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.weights.iter().map(|(e, wt)| (*e, *wt))
    }

    /// Convert to mole fractions: carbon first, iron (as balance) last.
    pub fn mole_fractions(&self) -> MoleFractions {
        let mut moles: Vec<(Element, f64)> = Vec::with_capacity(self.weights.len());
        moles.push((Element::C, self.carbon() / Element::C.atomic_mass()));
        for (element, wt) in self.iter() {
            if element == Element::C || element == Element::Fe {
                continue;
            }
            moles.push((element, wt / element.atomic_mass()));
        }
        moles.push((
            Element::Fe,
            self.iron_balance().max(0.0) / Element::Fe.atomic_mass(),
        ));

        let total: f64 = moles.iter().map(|(_, n)| n).sum();
        let items = moles
            .into_iter()
            .map(|(e, n)| (e, if total > 0.0 { n / total } else { 0.0 }))
            .collect();
        MoleFractions { items }
    }
}

impl TryFrom<BTreeMap<String, f64>> for AlloyComposition {
    type Error = AlloyError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::from_symbols(raw.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}

impl From<AlloyComposition> for BTreeMap<String, f64> {
    fn from(comp: AlloyComposition) -> Self {
        comp.weights
            .into_iter()
            .map(|(e, wt)| (e.symbol().to_string(), wt))
            .collect()
    }
}

/// Mole fractions of a composition, carbon first and iron last.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleFractions {
    items: Vec<(Element, f64)>,
}

impl MoleFractions {
    pub fn get(&self, element: Element) -> f64 {
        self.items
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, x)| *x)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.items.iter().copied()
    }

    /// Substitutional solutes: everything except carbon and iron.
    pub fn solutes(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.iter()
            .filter(|(e, _)| *e != Element::C && *e != Element::Fe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_carbon() -> AlloyComposition {
        AlloyComposition::from_symbols([("C", 0.2), ("Mn", 1.2), ("Si", 0.3), ("Fe", 98.3)])
            .unwrap()
    }

    #[test]
    fn absent_elements_read_zero() {
        let comp = plain_carbon();
        assert_eq!(comp.weight(Element::Mo), 0.0);
        assert_eq!(comp.carbon(), 0.2);
        assert!((comp.iron_balance() - 98.3).abs() < 1e-12);
    }

    #[test]
    fn carbon_and_iron_required() {
        let err = AlloyComposition::from_symbols([("Mn", 1.0), ("Fe", 99.0)]).unwrap_err();
        assert_eq!(err, AlloyError::MissingElement { symbol: "C" });

        let err = AlloyComposition::from_symbols([("C", 0.1)]).unwrap_err();
        assert_eq!(err, AlloyError::MissingElement { symbol: "Fe" });
    }

    #[test]
    fn duplicates_rejected() {
        let err =
            AlloyComposition::from_symbols([("C", 0.1), ("c", 0.2), ("Fe", 99.0)]).unwrap_err();
        assert_eq!(err, AlloyError::DuplicateElement { symbol: "C" });
    }

    #[test]
    fn invalid_weights_rejected() {
        assert!(AlloyComposition::from_symbols([("C", -0.1), ("Fe", 99.0)]).is_err());
        assert!(AlloyComposition::from_symbols([("C", f64::NAN), ("Fe", 99.0)]).is_err());
        assert!(matches!(
            AlloyComposition::from_symbols([("C", 1.0), ("Cr", 100.0), ("Fe", 0.0)]),
            Err(AlloyError::BalanceExceeded { .. })
        ));
        assert!(matches!(
            AlloyComposition::from_symbols([("C", 1.0), ("Unobtainium", 1.0), ("Fe", 0.0)]),
            Err(AlloyError::UnknownElement { .. })
        ));
    }

    #[test]
    fn mole_fraction_order_and_sum() {
        let comp = plain_carbon();
        let x = comp.mole_fractions();
        let order: Vec<Element> = x.iter().map(|(e, _)| e).collect();
        assert_eq!(order.first(), Some(&Element::C));
        assert_eq!(order.last(), Some(&Element::Fe));

        let sum: f64 = x.iter().map(|(_, f)| f).sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // 0.2 wt% C is a little under one mole percent
        assert!((x.get(Element::C) - 0.0092).abs() < 2e-4);
        assert_eq!(x.solutes().count(), 2);
    }

    #[test]
    fn with_carbon_keeps_other_elements() {
        let comp = plain_carbon().with_carbon(0.5);
        assert_eq!(comp.carbon(), 0.5);
        assert_eq!(comp.weight(Element::Mn), 1.2);
        assert!((comp.iron_balance() - 98.0).abs() < 1e-12);
    }

    #[test]
    fn serde_as_symbol_map() {
        let comp = plain_carbon();
        let json = serde_json::to_string(&comp).unwrap();
        assert!(json.contains("\"Mn\":1.2"));
        let back: AlloyComposition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, comp);

        let err = serde_json::from_str::<AlloyComposition>(r#"{"Mn": 1.0, "Fe": 99.0}"#);
        assert!(err.is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mole_fractions_sum_to_one(
            c in 0.0_f64..1.5,
            mn in 0.0_f64..2.0,
            si in 0.0_f64..2.0,
            cr in 0.0_f64..5.0,
            mo in 0.0_f64..1.0,
        ) {
            let comp = AlloyComposition::new([
                (Element::C, c),
                (Element::Mn, mn),
                (Element::Si, si),
                (Element::Cr, cr),
                (Element::Mo, mo),
                (Element::Fe, 0.0),
            ]).unwrap();
            let sum: f64 = comp.mole_fractions().iter().map(|(_, x)| x).sum();
            prop_assert!((sum - 1.0).abs() < 1e-12);
        }
    }
}
