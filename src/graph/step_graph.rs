// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, VecDeque};

use crate::config::Architecture;
use crate::graph::node::{NodeId, StepNode};

/// Static dependency DAG of computation nodes for one architecture.
///
/// Nodes are kept in declaration order; lookups and the reverse dependency
/// map are built once at construction. The graph itself is immutable -
/// sequencer state lives in the sequencer instance bound to it.
#[derive(Debug, Clone)]
pub struct StepGraph {
    architecture: Architecture,
    nodes: Vec<StepNode>,
    index: HashMap<NodeId, usize>,
    dependents: HashMap<NodeId, Vec<NodeId>>,
}

impl StepGraph {
    pub fn new(architecture: Architecture, nodes: Vec<StepNode>) -> Self {
        let mut index = HashMap::new();
        for (position, node) in nodes.iter().enumerate() {
            index.entry(node.id).or_insert(position);
        }

        let mut dependents: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for node in &nodes {
            for dependency in node.dependencies() {
                dependents.entry(dependency).or_default().push(node.id);
            }
        }

        Self {
            architecture,
            nodes,
            index,
            dependents,
        }
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in declaration order
    pub fn nodes(&self) -> &[StepNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&StepNode> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes that list `id` in their dependency set
    pub fn dependents_of(&self, id: &str) -> &[NodeId] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes with no dependencies; these start `active` in a fresh sequencer
    pub fn entry_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.dependencies().next().is_none())
            .map(|node| node.id)
            .collect()
    }

    /// Dependency-respecting visit order computed with Kahn's algorithm.
    ///
    /// Ties resolve to declaration order, so the result is deterministic.
    /// Nodes on a dependency cycle never reach in-degree zero and are
    /// omitted; `validate_step_graph` rejects such graphs up front.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let mut in_degree: HashMap<NodeId, usize> = self
            .nodes
            .iter()
            .map(|node| (node.id, node.dependencies().count()))
            .collect();

        let mut queue: VecDeque<NodeId> = self
            .nodes
            .iter()
            .filter(|node| in_degree[node.id] == 0)
            .map(|node| node.id)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &dependent in self.dependents_of(id) {
                if let Some(remaining) = in_degree.get_mut(dependent) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::NodeKind;

    fn diamond() -> StepGraph {
        // a -> b, a -> c, {b, c} -> d
        StepGraph::new(
            Architecture::UpdateGate,
            vec![
                StepNode::new("a", "a", NodeKind::Add, &[]),
                StepNode::new("b", "b", NodeKind::Add, &["a"]),
                StepNode::new("c", "c", NodeKind::Add, &["a"]),
                StepNode::new("d", "d", NodeKind::Add, &["b", "c"]),
            ],
        )
    }

    #[test]
    fn node_lookup_by_id() {
        let graph = diamond();
        assert!(graph.contains("a"));
        assert!(!graph.contains("z"));
        assert_eq!(graph.node("d").unwrap().inputs, vec!["b", "c"]);
    }

    #[test]
    fn dependents_follow_declaration_order() {
        let graph = diamond();
        assert_eq!(graph.dependents_of("a"), &["b", "c"]);
        assert_eq!(graph.dependents_of("d"), &[] as &[NodeId]);
    }

    #[test]
    fn entry_ids_have_no_dependencies() {
        let graph = diamond();
        assert_eq!(graph.entry_ids(), vec!["a"]);
    }

    #[test]
    fn topological_order_visits_dependencies_first() {
        let graph = diamond();
        let order = graph.topological_order();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn topological_order_omits_cycles() {
        let graph = StepGraph::new(
            Architecture::UpdateGate,
            vec![
                StepNode::new("a", "a", NodeKind::Add, &["b"]),
                StepNode::new("b", "b", NodeKind::Add, &["a"]),
                StepNode::new("c", "c", NodeKind::Add, &[]),
            ],
        );
        assert_eq!(graph.topological_order(), vec!["c"]);
    }

    #[test]
    fn ordering_only_dependencies_count_for_ordering() {
        let graph = StepGraph::new(
            Architecture::Gru,
            vec![
                StepNode::new("gate", "gate", NodeKind::Add, &[]),
                StepNode::new("value", "value", NodeKind::Add, &[]).ordered_after("gate"),
            ],
        );
        assert_eq!(graph.entry_ids(), vec!["gate"]);
        assert_eq!(graph.dependents_of("gate"), &["value"]);
        assert_eq!(graph.topological_order(), vec!["gate", "value"]);
    }
}
