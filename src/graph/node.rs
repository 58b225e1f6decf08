// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Identifier of a computation node within a step graph.
///
/// Step graphs are fixed per architecture, so identifiers are static strings
/// declared by the graph builder.
pub type NodeId = &'static str;

/// Which parameter vector a pass-through node reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    InputX,
    HiddenPrev,
    CellPrev,
}

/// Which user-controlled bias slider feeds a sigmoid gate's pre-activation.
///
/// Only gates bind a slider. Tanh candidate nodes keep their bias fixed at
/// zero, so `TanhTransform` carries no slider at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasSlider {
    Bias1,
    Bias2,
    Bias3,
}

/// Computation performed by a step node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Reads a parameter vector unchanged
    PassThrough(SourceField),
    /// Sigmoid of the operand plus the bound bias slider
    SigmoidGate(BiasSlider),
    /// Hyperbolic tangent of the operand, bias fixed at zero
    TanhTransform,
    /// Elementwise sum of both operands
    Add,
    /// Elementwise product of both operands
    Multiply,
    /// Elementwise `1 - x` of the operand
    OneMinus,
}

/// Activation state of a node within one sequencer instance.
///
/// * `Pending` - dependencies unmet
/// * `Active` - dependencies met, awaiting a user trigger
/// * `Computing` - trigger accepted, reveal in flight
/// * `Done` - resolved, value materialized and visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    Pending,
    Active,
    Computing,
    Done,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeState::Pending => "pending",
            NodeState::Active => "active",
            NodeState::Computing => "computing",
            NodeState::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// One named computation node in a step graph.
///
/// `inputs` is the ordered operand list the node's value is computed from.
/// `after` adds ordering-only dependencies that gate activation without
/// feeding the computation; the node's full dependency set is the union of
/// both lists.
#[derive(Debug, Clone)]
pub struct StepNode {
    pub id: NodeId,
    pub label: &'static str,
    pub kind: NodeKind,
    pub inputs: Vec<NodeId>,
    pub after: Vec<NodeId>,
}

impl StepNode {
    pub fn new(id: NodeId, label: &'static str, kind: NodeKind, inputs: &[NodeId]) -> Self {
        Self {
            id,
            label,
            kind,
            inputs: inputs.to_vec(),
            after: Vec::new(),
        }
    }

    /// Add an ordering-only dependency
    pub fn ordered_after(mut self, id: NodeId) -> Self {
        self.after.push(id);
        self
    }

    /// Full dependency set: operands followed by ordering-only dependencies
    pub fn dependencies(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inputs.iter().chain(self.after.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependencies_chain_inputs_and_after() {
        let node = StepNode::new("candidate", "candidate state", NodeKind::TanhTransform, &["mix"])
            .ordered_after("update_gate");
        let deps: Vec<NodeId> = node.dependencies().collect();
        assert_eq!(deps, vec!["mix", "update_gate"]);
    }

    #[test]
    fn node_state_displays_lowercase() {
        assert_eq!(NodeState::Pending.to_string(), "pending");
        assert_eq!(NodeState::Computing.to_string(), "computing");
    }
}
