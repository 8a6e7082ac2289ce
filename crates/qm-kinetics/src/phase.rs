//! Phases and transformation milestones.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Austenite,
    Ferrite,
    Pearlite,
    Bainite,
    Martensite,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Austenite,
        Phase::Ferrite,
        Phase::Pearlite,
        Phase::Bainite,
        Phase::Martensite,
    ];

    /// Phases formed by diffusional growth, in competition order.
    pub const DIFFUSIONAL: [Phase; 3] = [Phase::Ferrite, Phase::Pearlite, Phase::Bainite];

    pub fn key(&self) -> &'static str {
        match self {
            Phase::Austenite => "austenite",
            Phase::Ferrite => "ferrite",
            Phase::Pearlite => "pearlite",
            Phase::Bainite => "bainite",
            Phase::Martensite => "martensite",
        }
    }

    /// Row of the phase in per-phase kinetics tables.
    ///
    /// Martensite shares the bainite row; austenite has none.
    pub fn kinetics_row(&self) -> Option<usize> {
        match self {
            Phase::Austenite => None,
            Phase::Ferrite => Some(0),
            Phase::Pearlite => Some(1),
            Phase::Bainite | Phase::Martensite => Some(2),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Progress milestone of a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Milestone {
    /// Nucleation fraction reached
    Start,
    /// Finish fraction reached
    Finish,
}

impl Milestone {
    pub const ALL: [Milestone; 2] = [Milestone::Start, Milestone::Finish];

    pub fn index(&self) -> usize {
        match self {
            Milestone::Start => 0,
            Milestone::Finish => 1,
        }
    }

    /// Curve suffix used in diagram output.
    pub fn curve_suffix(&self) -> &'static str {
        match self {
            Milestone::Start => "nucleation",
            Milestone::Finish => "completion",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Milestone::Start => "start",
            Milestone::Finish => "finish",
        })
    }
}
