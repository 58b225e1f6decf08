// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One tagged-variant builder producing the step graph for each architecture.
//!
//! All three architectures share the same node vocabulary (pass-through
//! sources, sigmoid gates, tanh transforms, elementwise arithmetic), so their
//! graphs are declared side by side here and stay auditable against each
//! other. Every graph mirrors its formula's true data dependencies; the GRU
//! candidate additionally carries an ordering-only edge so it cannot activate
//! before the update gate is done, even though its value is computed from the
//! reset-gated history alone.

use crate::config::Architecture;
use crate::graph::node::{BiasSlider, NodeKind, SourceField, StepNode};
use crate::graph::step_graph::StepGraph;
use crate::graph::validation::validate_step_graph;

/// Node identifiers shared by the builder, the evaluator's output
/// extraction, and tests
pub mod ids {
    use crate::graph::node::NodeId;

    pub const INPUT_X: NodeId = "input_x";
    pub const HIDDEN_PREV: NodeId = "hidden_prev";
    pub const CELL_PREV: NodeId = "cell_prev";
    pub const MIX: NodeId = "mix";
    pub const UPDATE_GATE: NodeId = "update_gate";
    pub const RESET_GATE: NodeId = "reset_gate";
    pub const FORGET_GATE: NodeId = "forget_gate";
    pub const INPUT_GATE: NodeId = "input_gate";
    pub const OUTPUT_GATE: NodeId = "output_gate";
    pub const GATED_HISTORY: NodeId = "gated_history";
    pub const CANDIDATE_MIX: NodeId = "candidate_mix";
    pub const CANDIDATE: NodeId = "candidate";
    pub const INV_UPDATE: NodeId = "inv_update";
    pub const RETAINED: NodeId = "retained";
    pub const WRITTEN: NodeId = "written";
    pub const NEW_CELL: NodeId = "new_cell";
    pub const CELL_ACTIVATION: NodeId = "cell_activation";
    pub const NEW_HIDDEN: NodeId = "new_hidden";
}

/// Build the step graph for an architecture.
///
/// Pure and static: the same architecture always yields the same graph, and
/// the result carries no sequencing state.
pub fn graph_for(architecture: Architecture) -> StepGraph {
    let nodes = match architecture {
        Architecture::UpdateGate => update_gate_nodes(),
        Architecture::Gru => gru_nodes(),
        Architecture::Lstm => lstm_nodes(),
    };
    let graph = StepGraph::new(architecture, nodes);
    debug_assert!(
        validate_step_graph(&graph).is_ok(),
        "built-in step graph for {} failed validation",
        architecture
    );
    graph
}

/// `hidden' = u * hidden + (1 - u) * s` with a single update gate `u`
/// and candidate `s = tanh(input + hidden)`.
fn update_gate_nodes() -> Vec<StepNode> {
    use ids::*;
    vec![
        StepNode::new(INPUT_X, "input x", NodeKind::PassThrough(SourceField::InputX), &[]),
        StepNode::new(
            HIDDEN_PREV,
            "previous hidden state",
            NodeKind::PassThrough(SourceField::HiddenPrev),
            &[],
        ),
        StepNode::new(MIX, "input + hidden", NodeKind::Add, &[INPUT_X, HIDDEN_PREV]),
        StepNode::new(
            UPDATE_GATE,
            "update gate u",
            NodeKind::SigmoidGate(BiasSlider::Bias1),
            &[MIX],
        ),
        StepNode::new(CANDIDATE, "candidate state s", NodeKind::TanhTransform, &[MIX]),
        StepNode::new(RETAINED, "u * hidden", NodeKind::Multiply, &[UPDATE_GATE, HIDDEN_PREV]),
        StepNode::new(INV_UPDATE, "1 - u", NodeKind::OneMinus, &[UPDATE_GATE]),
        StepNode::new(WRITTEN, "(1 - u) * s", NodeKind::Multiply, &[INV_UPDATE, CANDIDATE]),
        StepNode::new(NEW_HIDDEN, "new hidden state", NodeKind::Add, &[RETAINED, WRITTEN]),
    ]
}

/// `hidden' = (1 - z) * hidden + z * n` with reset gate `r`, update gate `z`
/// and candidate `n = tanh(input + r * hidden)`.
fn gru_nodes() -> Vec<StepNode> {
    use ids::*;
    vec![
        StepNode::new(INPUT_X, "input x", NodeKind::PassThrough(SourceField::InputX), &[]),
        StepNode::new(
            HIDDEN_PREV,
            "previous hidden state",
            NodeKind::PassThrough(SourceField::HiddenPrev),
            &[],
        ),
        StepNode::new(MIX, "input + hidden", NodeKind::Add, &[INPUT_X, HIDDEN_PREV]),
        StepNode::new(
            RESET_GATE,
            "reset gate r",
            NodeKind::SigmoidGate(BiasSlider::Bias1),
            &[MIX],
        ),
        StepNode::new(
            UPDATE_GATE,
            "update gate z",
            NodeKind::SigmoidGate(BiasSlider::Bias2),
            &[MIX],
        ),
        StepNode::new(
            GATED_HISTORY,
            "r * hidden",
            NodeKind::Multiply,
            &[RESET_GATE, HIDDEN_PREV],
        ),
        StepNode::new(
            CANDIDATE_MIX,
            "input + gated history",
            NodeKind::Add,
            &[INPUT_X, GATED_HISTORY],
        ),
        // The candidate's value needs only the reset-gated history, but it may
        // not activate before both gates are done.
        StepNode::new(CANDIDATE, "candidate state n", NodeKind::TanhTransform, &[CANDIDATE_MIX])
            .ordered_after(UPDATE_GATE),
        StepNode::new(INV_UPDATE, "1 - z", NodeKind::OneMinus, &[UPDATE_GATE]),
        StepNode::new(
            RETAINED,
            "(1 - z) * hidden",
            NodeKind::Multiply,
            &[INV_UPDATE, HIDDEN_PREV],
        ),
        StepNode::new(WRITTEN, "z * n", NodeKind::Multiply, &[UPDATE_GATE, CANDIDATE]),
        StepNode::new(NEW_HIDDEN, "new hidden state", NodeKind::Add, &[RETAINED, WRITTEN]),
    ]
}

/// `cell' = f * cell + i * c~`, `hidden' = o * tanh(cell')` with
/// forget/input/output gates and candidate `c~ = tanh(input + hidden)`.
fn lstm_nodes() -> Vec<StepNode> {
    use ids::*;
    vec![
        StepNode::new(INPUT_X, "input x", NodeKind::PassThrough(SourceField::InputX), &[]),
        StepNode::new(
            HIDDEN_PREV,
            "previous hidden state",
            NodeKind::PassThrough(SourceField::HiddenPrev),
            &[],
        ),
        StepNode::new(
            CELL_PREV,
            "previous cell state",
            NodeKind::PassThrough(SourceField::CellPrev),
            &[],
        ),
        StepNode::new(MIX, "input + hidden", NodeKind::Add, &[INPUT_X, HIDDEN_PREV]),
        StepNode::new(
            FORGET_GATE,
            "forget gate f",
            NodeKind::SigmoidGate(BiasSlider::Bias1),
            &[MIX],
        ),
        StepNode::new(
            INPUT_GATE,
            "input gate i",
            NodeKind::SigmoidGate(BiasSlider::Bias2),
            &[MIX],
        ),
        StepNode::new(
            OUTPUT_GATE,
            "output gate o",
            NodeKind::SigmoidGate(BiasSlider::Bias3),
            &[MIX],
        ),
        StepNode::new(CANDIDATE, "candidate state", NodeKind::TanhTransform, &[MIX]),
        StepNode::new(RETAINED, "f * cell", NodeKind::Multiply, &[FORGET_GATE, CELL_PREV]),
        StepNode::new(WRITTEN, "i * candidate", NodeKind::Multiply, &[INPUT_GATE, CANDIDATE]),
        StepNode::new(NEW_CELL, "new cell state", NodeKind::Add, &[RETAINED, WRITTEN]),
        StepNode::new(CELL_ACTIVATION, "tanh(new cell)", NodeKind::TanhTransform, &[NEW_CELL]),
        StepNode::new(
            NEW_HIDDEN,
            "new hidden state",
            NodeKind::Multiply,
            &[OUTPUT_GATE, CELL_ACTIVATION],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_architecture_graph_validates() {
        for architecture in Architecture::ALL {
            let graph = graph_for(architecture);
            assert!(
                validate_step_graph(&graph).is_ok(),
                "{} graph failed validation",
                architecture
            );
        }
    }

    #[test]
    fn update_gate_graph_shape() {
        let graph = graph_for(Architecture::UpdateGate);
        assert_eq!(graph.len(), 9);
        assert_eq!(graph.entry_ids(), vec![ids::INPUT_X, ids::HIDDEN_PREV]);
        assert_eq!(
            graph.node(ids::NEW_HIDDEN).unwrap().inputs,
            vec![ids::RETAINED, ids::WRITTEN]
        );
    }

    #[test]
    fn gru_candidate_waits_for_update_gate() {
        let graph = graph_for(Architecture::Gru);
        let candidate = graph.node(ids::CANDIDATE).unwrap();
        assert_eq!(candidate.inputs, vec![ids::CANDIDATE_MIX]);
        assert_eq!(candidate.after, vec![ids::UPDATE_GATE]);
    }

    #[test]
    fn gru_candidate_computes_from_gated_history() {
        let graph = graph_for(Architecture::Gru);
        assert_eq!(
            graph.node(ids::CANDIDATE_MIX).unwrap().inputs,
            vec![ids::INPUT_X, ids::GATED_HISTORY]
        );
        assert_eq!(
            graph.node(ids::GATED_HISTORY).unwrap().inputs,
            vec![ids::RESET_GATE, ids::HIDDEN_PREV]
        );
    }

    #[test]
    fn lstm_graph_routes_through_cell_state() {
        let graph = graph_for(Architecture::Lstm);
        assert_eq!(graph.len(), 13);
        assert!(graph.contains(ids::CELL_PREV));
        assert_eq!(
            graph.node(ids::NEW_CELL).unwrap().inputs,
            vec![ids::RETAINED, ids::WRITTEN]
        );
        assert_eq!(
            graph.node(ids::NEW_HIDDEN).unwrap().inputs,
            vec![ids::OUTPUT_GATE, ids::CELL_ACTIVATION]
        );
    }

    #[test]
    fn gate_nodes_bind_distinct_bias_sliders() {
        let graph = graph_for(Architecture::Lstm);
        let slider_of = |id: &str| match graph.node(id).unwrap().kind {
            NodeKind::SigmoidGate(slider) => slider,
            ref kind => panic!("expected sigmoid gate, found {:?}", kind),
        };
        assert_eq!(slider_of(ids::FORGET_GATE), BiasSlider::Bias1);
        assert_eq!(slider_of(ids::INPUT_GATE), BiasSlider::Bias2);
        assert_eq!(slider_of(ids::OUTPUT_GATE), BiasSlider::Bias3);
    }

    #[test]
    fn topological_order_respects_dependencies() {
        for architecture in Architecture::ALL {
            let graph = graph_for(architecture);
            let order = graph.topological_order();
            assert_eq!(order.len(), graph.len());

            let position: std::collections::HashMap<_, _> =
                order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
            for node in graph.nodes() {
                for dependency in node.dependencies() {
                    assert!(
                        position[dependency] < position[node.id],
                        "{}: '{}' ordered before its dependency '{}'",
                        architecture,
                        node.id,
                        dependency
                    );
                }
            }
        }
    }
}
