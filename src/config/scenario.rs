// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_DIMENSIONALITY, DEFAULT_REVEAL_LATENCY_MS, MAX_DIMENSIONALITY, MAX_REVEAL_LATENCY_MS,
    MIN_DIMENSIONALITY,
};
use crate::config::params::SimulationParams;
use crate::config::Architecture;
use crate::errors::ScenarioError;
use crate::math::Vector;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A starting setup for a simulation session, loaded from a YAML file.
///
/// Every field is optional; omitted fields fall back to a zeroed simulation
/// of the update-gate cell at the default dimensionality. Numeric fields are
/// lenient: a malformed component or bias reads as 0 instead of failing the
/// load, matching how the interactive controls treat unparseable input.
///
/// # Fields
/// * `architecture` - Which cell to simulate (`update_gate`, `gru`, `lstm`)
/// * `dimensionality` - Vector width, clamped to the supported range
/// * `input_x`, `hidden_prev`, `cell_prev` - Starting vectors, resized to
///   the declared dimensionality by truncation or zero-extension
/// * `bias1`, `bias2`, `bias3` - Gate bias sliders
/// * `reveal_latency_ms` - Optional override for the reveal pacing interval
///
/// # Example
/// ```yaml
/// architecture: lstm
/// dimensionality: 2
/// input_x: [2.0, -1.0]
/// hidden_prev: [0.0, 0.0]
/// bias1: 1.0
/// reveal_latency_ms: 200
/// ```
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub architecture: Architecture,
    #[serde(default = "default_dimensionality")]
    pub dimensionality: usize,
    #[serde(default, deserialize_with = "lenient_components")]
    pub input_x: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_components")]
    pub hidden_prev: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_components")]
    pub cell_prev: Vec<f64>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub bias1: f64,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub bias2: f64,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub bias3: f64,
    #[serde(default)]
    pub reveal_latency_ms: Option<u64>,
}

fn default_dimensionality() -> usize {
    DEFAULT_DIMENSIONALITY
}

/// Accept any YAML scalar where a number is expected, reading malformed
/// values as 0.0
fn lenient_scalar<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(scalar_or_zero(&value))
}

/// Accept a YAML sequence of scalars, reading malformed entries as 0.0 and
/// anything that is not a sequence as empty
fn lenient_components<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    let serde_yaml::Value::Sequence(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items.iter().map(scalar_or_zero).collect())
}

fn scalar_or_zero(value: &serde_yaml::Value) -> f64 {
    match value {
        serde_yaml::Value::Number(number) => number.as_f64().unwrap_or(0.0),
        serde_yaml::Value::String(text) => text.trim().parse().unwrap_or(0.0),
        serde_yaml::Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

impl Scenario {
    /// Normalized simulation parameters: dimensionality clamped to the
    /// supported range, vectors resized to it, and the cell state dropped
    /// for architectures that have none.
    pub fn params(&self) -> SimulationParams {
        let dimensionality = self
            .dimensionality
            .clamp(MIN_DIMENSIONALITY, MAX_DIMENSIONALITY);
        let cell_prev = if self.architecture.has_cell_state() {
            Vector(self.cell_prev.clone()).resized(dimensionality)
        } else {
            Vector::new()
        };
        SimulationParams {
            dimensionality,
            input_x: Vector(self.input_x.clone()).resized(dimensionality),
            hidden_prev: Vector(self.hidden_prev.clone()).resized(dimensionality),
            cell_prev,
            bias1: self.bias1,
            bias2: self.bias2,
            bias3: self.bias3,
        }
    }

    /// Reveal pacing interval, capped at the configured maximum
    pub fn reveal_latency(&self) -> Duration {
        let millis = self
            .reveal_latency_ms
            .unwrap_or(DEFAULT_REVEAL_LATENCY_MS)
            .min(MAX_REVEAL_LATENCY_MS);
        Duration::from_millis(millis)
    }
}

/// Load a scenario from a YAML file
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioError> {
    let content = fs::read_to_string(path)?;
    let scenario: Scenario = serde_yaml::from_str(&content)?;
    Ok(scenario)
}
