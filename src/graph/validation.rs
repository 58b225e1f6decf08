//! Structural validation for step graphs.
//!
//! The built-in graphs are declared by hand in `build`, so validation is the
//! safety net that keeps them honest: unit tests run it against every
//! architecture, and the builder re-checks its output in debug builds.
//!
//! Checks run in a fixed order:
//!
//! 1. **Uniqueness**: all node identifiers are unique
//! 2. **References**: every dependency points at an existing node
//! 3. **Cycle detection**: DFS with a recursion stack, reporting the exact
//!    cycle path
//!
//! Cycle detection only runs once the first two stages pass, since it needs
//! a structurally valid graph. Errors are accumulated so a broken graph
//! reports everything wrong with it at once.

use std::collections::HashSet;

use crate::errors::GraphError;
use crate::graph::node::NodeId;
use crate::graph::step_graph::StepGraph;

/// Validate a step graph's structural integrity.
///
/// Returns every problem found; an `Ok` graph is safe to hand to the
/// evaluator and sequencer.
pub fn validate_step_graph(graph: &StepGraph) -> Result<(), Vec<GraphError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_node_ids(graph) {
        errors.extend(duplicate_errors);
    }

    if let Err(unresolved_errors) = validate_dependency_references(graph) {
        errors.extend(unresolved_errors);
    }

    // Cycle detection needs resolvable references and unique ids
    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_graph(graph) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_node_ids(graph: &StepGraph) -> Result<(), Vec<GraphError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for node in graph.nodes() {
        if !seen_ids.insert(node.id) {
            errors.push(GraphError::DuplicateNodeId { node_id: node.id });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_dependency_references(graph: &StepGraph) -> Result<(), Vec<GraphError>> {
    let mut errors = Vec::new();

    for node in graph.nodes() {
        for dependency in node.dependencies() {
            if !graph.contains(dependency) {
                errors.push(GraphError::UnresolvedDependency {
                    node_id: node.id,
                    missing_dependency: dependency,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// DFS with recursion-stack tracking; a gray node reached twice is a cycle
fn validate_acyclic_graph(graph: &StepGraph) -> Result<(), Vec<GraphError>> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node in graph.nodes() {
        if !visited.contains(node.id) {
            if let Some(cycle) =
                dfs_cycle_detection(node.id, graph, &mut visited, &mut rec_stack, &mut path)
            {
                return Err(vec![GraphError::CyclicDependency { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection(
    node_id: NodeId,
    graph: &StepGraph,
    visited: &mut HashSet<NodeId>,
    rec_stack: &mut HashSet<NodeId>,
    path: &mut Vec<NodeId>,
) -> Option<Vec<NodeId>> {
    visited.insert(node_id);
    rec_stack.insert(node_id);
    path.push(node_id);

    for &neighbor in graph.dependents_of(node_id) {
        if !visited.contains(neighbor) {
            if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                return Some(cycle);
            }
        } else if rec_stack.contains(neighbor) {
            // Found a cycle - extract the cycle path
            let cycle_start = path.iter().position(|&id| id == neighbor).unwrap();
            let mut cycle = path[cycle_start..].to_vec();
            cycle.push(neighbor); // Close the cycle
            return Some(cycle);
        }
    }

    rec_stack.remove(node_id);
    path.pop();
    None
}
