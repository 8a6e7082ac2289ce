//! Kinetics model selection.

use serde::{Deserialize, Serialize};

/// Empirical kinetics family used for every regression and rate equation of a run.
///
/// The two families differ numerically, not structurally, and are never mixed
/// within one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KineticsModel {
    /// Li, Niebuhr, Meekisho and Atteridge (1998).
    #[default]
    Li98,
    /// Kirkaldy and Venugopalan (1983).
    Kirkaldy83,
}

impl KineticsModel {
    pub const ALL: [KineticsModel; 2] = [KineticsModel::Li98, KineticsModel::Kirkaldy83];

    pub fn key(&self) -> &'static str {
        match self {
            KineticsModel::Li98 => "Li98",
            KineticsModel::Kirkaldy83 => "Kirkaldy83",
        }
    }
}

impl std::fmt::Display for KineticsModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for KineticsModel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LI98" | "LI" => Ok(KineticsModel::Li98),
            "KIRKALDY83" | "KIRKALDY" | "KV83" => Ok(KineticsModel::Kirkaldy83),
            _ => Err("unknown kinetics model"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("li98".parse::<KineticsModel>().unwrap(), KineticsModel::Li98);
        assert_eq!(
            "Kirkaldy".parse::<KineticsModel>().unwrap(),
            KineticsModel::Kirkaldy83
        );
        assert!("jmak".parse::<KineticsModel>().is_err());
    }

    #[test]
    fn key_roundtrip() {
        for model in KineticsModel::ALL {
            assert_eq!(model.key().parse::<KineticsModel>().unwrap(), model);
        }
    }
}
