//! Simulation request schema.

use qm_alloy::{AlloyComposition, ConfigOverrides, KineticsModel};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationRequest {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub model: KineticsModel,
    pub composition: AlloyComposition,
    #[serde(default, skip_serializing_if = "ConfigOverrides::is_empty")]
    pub overrides: ConfigOverrides,
    #[serde(default)]
    pub execution: ExecutionDef,
}

/// How the diagram builders fan out their sub-computations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExecutionDef {
    #[serde(default)]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}
