//! Curve buffers and named diagram results.

use std::collections::BTreeMap;

use qm_core::{DynamicBuffer, round_to};
use qm_kinetics::{Milestone, Phase};
use serde::{Deserialize, Serialize};

/// Name of the martensite curve in a [`DiagramResult`].
pub const MARTENSITE_CURVE: &str = "martensite";

/// Time stamp of the first martensite point [s].
pub const MARTENSITE_START_TIME: f64 = 0.001;

/// Append-only `(time, temperature)` storage used while a curve is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveBuffer {
    points: DynamicBuffer<2>,
}

impl CurveBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, temp: f64) {
        self.points.push([time, temp]);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().map(|p| (p[0], p[1]))
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().map(|p| (p[0], p[1]))
    }

    /// Trim spare capacity and split into columns.
    pub fn into_curve(self) -> Curve {
        let rows = self.points.trim();
        let (time, temp) = rows.into_iter().map(|[t, y]| (t, y)).unzip();
        Curve { time, temp }
    }
}

/// Immutable curve: parallel time [s] and temperature [degC] columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub time: Vec<f64>,
    pub temp: Vec<f64>,
}

impl Curve {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (time, temp) = points.into_iter().unzip();
        Self { time, temp }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.temp.iter().copied())
    }

    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            time: self.time.iter().map(|v| round_to(*v, decimals)).collect(),
            temp: self.temp.iter().map(|v| round_to(*v, decimals)).collect(),
        }
    }
}

/// Named curves of a TTT or CCT diagram.
///
/// Serializes as `{ "<phase>_<nucleation|completion>": {time, temp}, "martensite": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramResult {
    curves: BTreeMap<String, Curve>,
}

impl DiagramResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ferrite_nucleation`, `bainite_completion`, ...
    pub fn curve_name(phase: Phase, milestone: Milestone) -> String {
        format!("{}_{}", phase.key(), milestone.curve_suffix())
    }

    pub fn insert(&mut self, name: impl Into<String>, curve: Curve) {
        self.curves.insert(name.into(), curve);
    }

    pub fn insert_phase(&mut self, phase: Phase, milestone: Milestone, curve: Curve) {
        self.insert(Self::curve_name(phase, milestone), curve);
    }

    pub fn get(&self, name: &str) -> Option<&Curve> {
        self.curves.get(name)
    }

    pub fn phase(&self, phase: Phase, milestone: Milestone) -> Option<&Curve> {
        self.get(&Self::curve_name(phase, milestone))
    }

    pub fn martensite(&self) -> Option<&Curve> {
        self.get(MARTENSITE_CURVE)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Curve)> {
        self.curves.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            curves: self
                .curves
                .iter()
                .map(|(k, v)| (k.clone(), v.rounded(decimals)))
                .collect(),
        }
    }
}
