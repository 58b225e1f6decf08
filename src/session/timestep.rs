// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pure parameter transforms for the time-step controller.
//!
//! Each transform takes the current parameter snapshot and returns the next
//! one; the session decides when to apply them and what to do with the
//! running sequencer. An empty `cell_prev` marks an architecture without a
//! cell state and stays empty through every transform.

use crate::config::{SimulationParams, SimulationResult};
use crate::math::Vector;

/// Feed a resolved step's outputs back as the next step's recurrent inputs.
///
/// `hidden_prev` becomes the final hidden state and `cell_prev` the final
/// cell state (empty for architectures without one). Inputs and biases are
/// carried unchanged.
pub fn advance(params: &SimulationParams, result: &SimulationResult) -> SimulationParams {
    SimulationParams {
        hidden_prev: result.final_hidden.clone(),
        cell_prev: result.final_cell.clone(),
        ..params.clone()
    }
}

/// Zero the recurrent state, keeping inputs and biases
pub fn reset(params: &SimulationParams) -> SimulationParams {
    let cell_prev = if params.cell_prev.is_empty() {
        Vector::new()
    } else {
        Vector::zeros(params.dimensionality)
    };
    SimulationParams {
        hidden_prev: Vector::zeros(params.dimensionality),
        cell_prev,
        ..params.clone()
    }
}

/// Change dimensionality, truncating or zero-extending every vector field
pub fn resize(params: &SimulationParams, dimensionality: usize) -> SimulationParams {
    let cell_prev = if params.cell_prev.is_empty() {
        Vector::new()
    } else {
        params.cell_prev.resized(dimensionality)
    };
    SimulationParams {
        dimensionality,
        input_x: params.input_x.resized(dimensionality),
        hidden_prev: params.hidden_prev.resized(dimensionality),
        cell_prev,
        ..params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Architecture;

    fn lstm_params() -> SimulationParams {
        SimulationParams {
            dimensionality: 2,
            input_x: Vector(vec![2.0, -1.0]),
            hidden_prev: Vector(vec![0.5, 0.5]),
            cell_prev: Vector(vec![0.1, 0.2]),
            bias1: 1.0,
            bias2: -1.0,
            bias3: 0.5,
        }
    }

    #[test]
    fn advance_feeds_outputs_back_and_keeps_the_rest() {
        let params = lstm_params();
        let result = SimulationResult {
            final_hidden: Vector(vec![0.6, 0.1]),
            final_cell: Vector(vec![0.8, 0.3]),
            ..Default::default()
        };

        let next = advance(&params, &result);
        assert_eq!(next.hidden_prev, Vector(vec![0.6, 0.1]));
        assert_eq!(next.cell_prev, Vector(vec![0.8, 0.3]));
        assert_eq!(next.input_x, params.input_x);
        assert_eq!(next.bias1, 1.0);
        assert_eq!(next.dimensionality, 2);
    }

    #[test]
    fn advance_keeps_a_missing_cell_state_missing() {
        let params = SimulationParams::zeroed(Architecture::Gru, 2);
        let result = SimulationResult {
            final_hidden: Vector(vec![0.6, 0.1]),
            ..Default::default()
        };

        let next = advance(&params, &result);
        assert!(next.cell_prev.is_empty());
    }

    #[test]
    fn reset_zeroes_recurrent_state_only() {
        let next = reset(&lstm_params());
        assert_eq!(next.hidden_prev, Vector::zeros(2));
        assert_eq!(next.cell_prev, Vector::zeros(2));
        assert_eq!(next.input_x, Vector(vec![2.0, -1.0]));
        assert_eq!(next.bias2, -1.0);
    }

    #[test]
    fn reset_does_not_invent_a_cell_state() {
        let params = SimulationParams::zeroed(Architecture::UpdateGate, 3);
        assert!(reset(&params).cell_prev.is_empty());
    }

    #[test]
    fn resize_truncates_and_zero_extends() {
        let params = lstm_params();

        let narrowed = resize(&params, 1);
        assert_eq!(narrowed.dimensionality, 1);
        assert_eq!(narrowed.input_x, Vector(vec![2.0]));
        assert_eq!(narrowed.cell_prev, Vector(vec![0.1]));

        let widened = resize(&params, 3);
        assert_eq!(widened.input_x, Vector(vec![2.0, -1.0, 0.0]));
        assert_eq!(widened.hidden_prev, Vector(vec![0.5, 0.5, 0.0]));
        assert_eq!(widened.bias3, 0.5);
    }

    #[test]
    fn resize_leaves_an_empty_cell_state_empty() {
        let params = SimulationParams::zeroed(Architecture::Gru, 2);
        assert!(resize(&params, 3).cell_prev.is_empty());
    }
}
