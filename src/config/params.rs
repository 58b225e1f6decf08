// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::math::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recurrent cell architecture selection.
///
/// Selecting an architecture fixes which gates exist and the shape of the
/// step graph built for it.
///
/// # Variants
/// * `UpdateGate` - Simplified cell with a single update gate
/// * `Gru` - Gated recurrent unit with reset and update gates
/// * `Lstm` - Long short-term memory cell with forget/input/output gates
///   and a separate cell state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    #[default]
    UpdateGate,
    Gru,
    Lstm,
}

impl Architecture {
    /// All supported architectures, in presentation order
    pub const ALL: [Architecture; 3] = [
        Architecture::UpdateGate,
        Architecture::Gru,
        Architecture::Lstm,
    ];

    /// Whether this architecture carries a cell state distinct from the
    /// hidden state
    pub fn has_cell_state(&self) -> bool {
        matches!(self, Architecture::Lstm)
    }

    /// Number of sigmoid gates this architecture exposes
    pub fn gate_count(&self) -> usize {
        match self {
            Architecture::UpdateGate => 1,
            Architecture::Gru => 2,
            Architecture::Lstm => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Architecture::UpdateGate => "Update Gate Cell",
            Architecture::Gru => "Gated Recurrent Unit",
            Architecture::Lstm => "Long Short-Term Memory",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Immutable input snapshot for one forward pass.
///
/// Every edit produces a new snapshot; evaluation and sequencing never
/// mutate one in place. `cell_prev` is carried as an empty vector for
/// architectures without a cell state, mirroring the result-side convention
/// that unused fields are empty.
///
/// Biases are the only user-controlled parameters: weights are implicit
/// identity, so each gate's pre-activation is the elementwise input/hidden
/// sum plus one scalar bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub dimensionality: usize,
    pub input_x: Vector,
    pub hidden_prev: Vector,
    #[serde(default)]
    pub cell_prev: Vector,
    #[serde(default)]
    pub bias1: f64,
    #[serde(default)]
    pub bias2: f64,
    #[serde(default)]
    pub bias3: f64,
}

impl SimulationParams {
    /// Create a zeroed parameter snapshot for the given dimensionality
    /// and architecture. Non-cell architectures get an empty `cell_prev`.
    pub fn zeroed(architecture: Architecture, dimensionality: usize) -> Self {
        let cell_prev = if architecture.has_cell_state() {
            Vector::zeros(dimensionality)
        } else {
            Vector::new()
        };
        Self {
            dimensionality,
            input_x: Vector::zeros(dimensionality),
            hidden_prev: Vector::zeros(dimensionality),
            cell_prev,
            bias1: 0.0,
            bias2: 0.0,
            bias3: 0.0,
        }
    }
}

/// Full output of one forward pass.
///
/// Derived deterministically from a `SimulationParams` snapshot and never
/// mutated in place. Fields an architecture does not produce are empty
/// vectors: `gate2`/`gate3` for the update-gate cell, `final_cell` and
/// `tanh_cell` everywhere but the LSTM.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SimulationResult {
    pub final_hidden: Vector,
    pub final_cell: Vector,
    pub gate1: Vector,
    pub gate2: Vector,
    pub gate3: Vector,
    pub candidate_state: Vector,
    pub tanh_cell: Vector,
}
