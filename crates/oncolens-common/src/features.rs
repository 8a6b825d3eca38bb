//! The eight tumor measurements sent to the prediction service.
//!
//! Field order is part of the wire contract: the service reads the
//! `features` array positionally, so `FEATURE_FIELDS` must never be
//! reordered.

use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 8;

/// A bounded numeric input. `decimals` is the step granularity
/// (3 decimals = step 0.001).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureField {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub decimals: i32,
}

/// Canonical field table, WDBC "mean" features.
pub static FEATURE_FIELDS: [FeatureField; FEATURE_COUNT] = [
    FeatureField { name: "radius_mean",            min: 0.0, max: 120.0, decimals: 3 },
    FeatureField { name: "texture_mean",           min: 0.0, max: 120.0, decimals: 3 },
    FeatureField { name: "smoothness_mean",        min: 0.0, max: 1.0,   decimals: 4 },
    FeatureField { name: "compactness_mean",       min: 0.0, max: 1.0,   decimals: 4 },
    FeatureField { name: "concavity_mean",         min: 0.0, max: 1.0,   decimals: 4 },
    FeatureField { name: "concave_points_mean",    min: 0.0, max: 1.0,   decimals: 4 },
    FeatureField { name: "symmetry_mean",          min: 0.0, max: 1.0,   decimals: 4 },
    FeatureField { name: "fractal_dimension_mean", min: 0.0, max: 1.0,   decimals: 4 },
];

impl FeatureField {
    /// Look a field up by its wire name.
    pub fn by_name(name: &str) -> Option<(usize, &'static FeatureField)> {
        FEATURE_FIELDS.iter().enumerate().find(|(_, f)| f.name == name)
    }

    /// "concave_points_mean" -> "Concave Points Mean"
    pub fn label(&self) -> String {
        self.name
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn step(&self) -> f64 {
        10f64.powi(-self.decimals)
    }

    /// Step formatted for an HTML `step` attribute ("0.001").
    pub fn step_attr(&self) -> String {
        format!("{:.*}", self.decimals as usize, self.step())
    }

    /// Value formatted at the field's precision.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals as usize, value)
    }

    /// Clamp into `[min, max]` and round to the step.
    ///
    /// Returns `None` for NaN and infinities so callers can keep the
    /// previous value instead.
    pub fn constrain(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let factor = 10f64.powi(self.decimals);
        let rounded = (value.clamp(self.min, self.max) * factor).round() / factor;
        Some(rounded.clamp(self.min, self.max))
    }
}

/// Eight values in `FEATURE_FIELDS` order. Serialises as a bare JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl Default for FeatureVector {
    /// Untouched inputs default to 0.0, which is a valid value.
    fn default() -> Self {
        Self([0.0; FEATURE_COUNT])
    }
}

impl FeatureVector {
    /// Build from raw values, constraining each to its field.
    /// Non-finite entries are refused and stay at the default 0.0.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        let mut out = Self::default();
        for (i, v) in values.into_iter().enumerate() {
            out.set(i, v);
        }
        out
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Constrain and store. Returns false (and leaves the slot untouched)
    /// for an out-of-range index or a non-finite value.
    pub fn set(&mut self, index: usize, value: f64) -> bool {
        let Some(field) = FEATURE_FIELDS.get(index) else {
            return false;
        };
        match field.constrain(value) {
            Some(v) => {
                self.0[index] = v;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Pairs each value with its field, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FeatureField, f64)> + '_ {
        FEATURE_FIELDS.iter().zip(self.0.iter().copied())
    }
}
