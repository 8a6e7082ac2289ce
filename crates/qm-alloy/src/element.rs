//! Periodic-table data for the elements a steel composition may list.

use serde::{Deserialize, Serialize};

/// Elements recognised in alloy compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    C,
    Mn,
    Si,
    Ni,
    Cr,
    Mo,
    Co,
    W,
    V,
    Cu,
    Al,
    Ti,
    Nb,
    B,
    N,
    P,
    S,
    As,
    Fe,
}

impl Element {
    pub const ALL: [Element; 19] = [
        Element::C,
        Element::Mn,
        Element::Si,
        Element::Ni,
        Element::Cr,
        Element::Mo,
        Element::Co,
        Element::W,
        Element::V,
        Element::Cu,
        Element::Al,
        Element::Ti,
        Element::Nb,
        Element::B,
        Element::N,
        Element::P,
        Element::S,
        Element::As,
        Element::Fe,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::C => "C",
            Element::Mn => "Mn",
            Element::Si => "Si",
            Element::Ni => "Ni",
            Element::Cr => "Cr",
            Element::Mo => "Mo",
            Element::Co => "Co",
            Element::W => "W",
            Element::V => "V",
            Element::Cu => "Cu",
            Element::Al => "Al",
            Element::Ti => "Ti",
            Element::Nb => "Nb",
            Element::B => "B",
            Element::N => "N",
            Element::P => "P",
            Element::S => "S",
            Element::As => "As",
            Element::Fe => "Fe",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Element::C => "Carbon",
            Element::Mn => "Manganese",
            Element::Si => "Silicon",
            Element::Ni => "Nickel",
            Element::Cr => "Chromium",
            Element::Mo => "Molybdenum",
            Element::Co => "Cobalt",
            Element::W => "Tungsten",
            Element::V => "Vanadium",
            Element::Cu => "Copper",
            Element::Al => "Aluminium",
            Element::Ti => "Titanium",
            Element::Nb => "Niobium",
            Element::B => "Boron",
            Element::N => "Nitrogen",
            Element::P => "Phosphorus",
            Element::S => "Sulfur",
            Element::As => "Arsenic",
            Element::Fe => "Iron",
        }
    }

    /// Standard atomic mass [g/mol].
    pub fn atomic_mass(&self) -> f64 {
        match self {
            Element::C => 12.011,
            Element::Mn => 54.938,
            Element::Si => 28.085,
            Element::Ni => 58.693,
            Element::Cr => 51.996,
            Element::Mo => 95.95,
            Element::Co => 58.933,
            Element::W => 183.84,
            Element::V => 50.942,
            Element::Cu => 63.546,
            Element::Al => 26.982,
            Element::Ti => 47.867,
            Element::Nb => 92.906,
            Element::B => 10.81,
            Element::N => 14.007,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::As => 74.922,
            Element::Fe => 55.845,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Element {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Element::ALL
            .iter()
            .copied()
            .find(|e| {
                e.symbol().eq_ignore_ascii_case(key) || e.display_name().eq_ignore_ascii_case(key)
            })
            .ok_or("unknown element")
    }
}
