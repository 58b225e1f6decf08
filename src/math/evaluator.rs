// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pure forward-pass evaluation over step graphs.
//!
//! All three architectures run through the same fold: visit the step graph
//! in topological order and compute each node's vector from its kind and
//! operands. Architecture-specific wiring lives entirely in the graph
//! builder, which keeps the three formula sets auditable against each other.
//! The sequencer never recomputes anything; it reveals values out of the
//! trace produced here.

use std::collections::HashMap;

use crate::config::{Architecture, SimulationParams, SimulationResult};
use crate::graph::{graph_for, ids, BiasSlider, NodeId, NodeKind, SourceField, StepGraph, StepNode};
use crate::math::vector::Vector;

/// Per-node value store produced by one evaluation pass
#[derive(Debug, Clone, Default)]
pub struct EvaluationTrace {
    values: HashMap<NodeId, Vector>,
}

impl EvaluationTrace {
    pub fn value(&self, node_id: &str) -> Option<&Vector> {
        self.values.get(node_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Compute a full forward pass for one architecture.
///
/// Pure, deterministic and side-effect-free: identical params always yield
/// bit-identical results.
pub fn evaluate(architecture: Architecture, params: &SimulationParams) -> SimulationResult {
    let graph = graph_for(architecture);
    result_from_trace(architecture, &trace(&graph, params))
}

/// Fold a step graph in topological order, computing every node's vector.
///
/// Total by construction: a missing operand reads as the empty vector,
/// which the zero-pad arithmetic treats as all zeros. Validated graphs
/// never hit that path.
pub fn trace(graph: &StepGraph, params: &SimulationParams) -> EvaluationTrace {
    let mut values: HashMap<NodeId, Vector> = HashMap::with_capacity(graph.len());

    for id in graph.topological_order() {
        let node = match graph.node(id) {
            Some(node) => node,
            None => continue,
        };
        let value = match node.kind {
            NodeKind::PassThrough(SourceField::InputX) => params.input_x.clone(),
            NodeKind::PassThrough(SourceField::HiddenPrev) => params.hidden_prev.clone(),
            NodeKind::PassThrough(SourceField::CellPrev) => params.cell_prev.clone(),
            NodeKind::SigmoidGate(slider) => {
                operand(&values, node, 0).sigmoid(bias_for(params, slider))
            }
            // Candidate and cell activations keep their bias fixed at zero
            NodeKind::TanhTransform => operand(&values, node, 0).tanh(0.0),
            NodeKind::Add => operand(&values, node, 0).add(&operand(&values, node, 1)),
            NodeKind::Multiply => operand(&values, node, 0).multiply(&operand(&values, node, 1)),
            NodeKind::OneMinus => operand(&values, node, 0).one_minus(),
        };
        values.insert(id, value);
    }

    EvaluationTrace { values }
}

/// Read the architecture's designated output nodes out of a trace.
///
/// Fields the architecture does not produce stay empty.
pub fn result_from_trace(architecture: Architecture, trace: &EvaluationTrace) -> SimulationResult {
    let value = |id: &str| trace.value(id).cloned().unwrap_or_default();

    let mut result = SimulationResult {
        final_hidden: value(ids::NEW_HIDDEN),
        candidate_state: value(ids::CANDIDATE),
        ..SimulationResult::default()
    };

    match architecture {
        Architecture::UpdateGate => {
            result.gate1 = value(ids::UPDATE_GATE);
        }
        Architecture::Gru => {
            result.gate1 = value(ids::RESET_GATE);
            result.gate2 = value(ids::UPDATE_GATE);
        }
        Architecture::Lstm => {
            result.gate1 = value(ids::FORGET_GATE);
            result.gate2 = value(ids::INPUT_GATE);
            result.gate3 = value(ids::OUTPUT_GATE);
            result.final_cell = value(ids::NEW_CELL);
            result.tanh_cell = value(ids::CELL_ACTIVATION);
        }
    }

    result
}

fn operand(values: &HashMap<NodeId, Vector>, node: &StepNode, position: usize) -> Vector {
    node.inputs
        .get(position)
        .and_then(|id| values.get(*id))
        .cloned()
        .unwrap_or_default()
}

fn bias_for(params: &SimulationParams, slider: BiasSlider) -> f64 {
    match slider {
        BiasSlider::Bias1 => params.bias1,
        BiasSlider::Bias2 => params.bias2,
        BiasSlider::Bias3 => params.bias3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-3;

    fn assert_close(actual: &Vector, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "length mismatch: {:?}", actual);
        for (i, (a, e)) in actual.0.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < TOLERANCE,
                "component {} differs: {} vs {}",
                i,
                a,
                e
            );
        }
    }

    fn params(
        architecture: Architecture,
        input_x: Vec<f64>,
        hidden_prev: Vec<f64>,
    ) -> SimulationParams {
        let dimensionality = input_x.len();
        let mut p = SimulationParams::zeroed(architecture, dimensionality);
        p.input_x = Vector(input_x);
        p.hidden_prev = Vector(hidden_prev);
        p
    }

    #[test]
    fn update_gate_end_to_end_scenario() {
        let p = params(Architecture::UpdateGate, vec![1.0, 0.0], vec![0.0, 0.0]);
        let result = evaluate(Architecture::UpdateGate, &p);

        assert_close(&result.gate1, &[0.731, 0.5]);
        assert_close(&result.candidate_state, &[0.762, 0.0]);
        assert_close(&result.final_hidden, &[0.205, 0.0]);
    }

    #[test]
    fn lstm_end_to_end_scenario() {
        let p = params(Architecture::Lstm, vec![2.0], vec![0.0]);
        let result = evaluate(Architecture::Lstm, &p);

        assert_close(&result.gate1, &[0.881]);
        assert_close(&result.gate2, &[0.881]);
        assert_close(&result.gate3, &[0.881]);
        assert_close(&result.candidate_state, &[0.964]);
        assert_close(&result.final_cell, &[0.849]);
        assert_close(&result.tanh_cell, &[0.691]);
        assert_close(&result.final_hidden, &[0.609]);
    }

    #[test]
    fn gru_candidate_uses_reset_gated_history() {
        // bias1 drives the reset gate low, so the candidate sees much less
        // history than tanh(mix) would.
        let mut p = params(Architecture::Gru, vec![1.0], vec![1.0]);
        p.bias1 = -4.0;
        let result = evaluate(Architecture::Gru, &p);

        assert_close(&result.gate1, &[0.119]);
        assert_close(&result.gate2, &[0.881]);
        assert_close(&result.candidate_state, &[0.807]);
        assert_close(&result.final_hidden, &[0.830]);

        let full_mix_candidate = Vector(vec![2.0]).tanh(0.0);
        assert!((result.candidate_state.component(0) - full_mix_candidate.component(0)).abs() > 0.1);
    }

    #[test]
    fn evaluate_is_idempotent() {
        for architecture in Architecture::ALL {
            let mut p = params(architecture, vec![0.4, -1.2], vec![0.7, 0.1]);
            p.bias1 = 0.3;
            p.bias2 = -0.5;
            p.bias3 = 1.1;
            assert_eq!(evaluate(architecture, &p), evaluate(architecture, &p));
        }
    }

    #[test]
    fn gates_and_candidates_stay_bounded() {
        for architecture in Architecture::ALL {
            for x in [-3.0, -1.0, 0.0, 0.5, 3.0] {
                for h in [-3.0, 0.0, 2.0] {
                    let mut p = params(architecture, vec![x], vec![h]);
                    p.bias1 = 0.25;
                    p.bias2 = -0.25;
                    let result = evaluate(architecture, &p);

                    let gates = [&result.gate1, &result.gate2, &result.gate3];
                    for gate in gates.iter().take(architecture.gate_count()) {
                        for &g in &gate.0 {
                            assert!(g > 0.0 && g < 1.0, "{}: gate {} out of (0,1)", architecture, g);
                        }
                    }
                    for &c in &result.candidate_state.0 {
                        assert!(c > -1.0 && c < 1.0);
                    }
                    for &t in &result.tanh_cell.0 {
                        assert!(t > -1.0 && t < 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn unused_result_fields_are_empty() {
        let p = params(Architecture::UpdateGate, vec![1.0], vec![0.5]);
        let result = evaluate(Architecture::UpdateGate, &p);
        assert!(result.gate2.is_empty());
        assert!(result.gate3.is_empty());
        assert!(result.final_cell.is_empty());
        assert!(result.tanh_cell.is_empty());

        let p = params(Architecture::Gru, vec![1.0], vec![0.5]);
        let result = evaluate(Architecture::Gru, &p);
        assert!(result.gate3.is_empty());
        assert!(result.final_cell.is_empty());
    }

    #[test]
    fn trace_exposes_intermediate_values() {
        let p = params(Architecture::UpdateGate, vec![1.0, 0.0], vec![0.0, 0.0]);
        let graph = graph_for(Architecture::UpdateGate);
        let trace = trace(&graph, &p);

        assert_close(trace.value(ids::MIX).unwrap(), &[1.0, 0.0]);
        let result = result_from_trace(Architecture::UpdateGate, &trace);
        assert_eq!(trace.value(ids::NEW_HIDDEN).unwrap(), &result.final_hidden);
    }

    #[test]
    fn trace_covers_every_node() {
        for architecture in Architecture::ALL {
            let graph = graph_for(architecture);
            let p = SimulationParams::zeroed(architecture, 2);
            let trace = trace(&graph, &p);
            assert_eq!(trace.len(), graph.len());
            for node in graph.nodes() {
                assert!(trace.value(node.id).is_some(), "missing value for {}", node.id);
            }
        }
    }
}
