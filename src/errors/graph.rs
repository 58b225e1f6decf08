// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::graph::NodeId;
use std::fmt;

/// Errors that can occur during step graph validation
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A circular dependency was detected among the step nodes
    CyclicDependency {
        /// The cycle path showing the circular dependency
        cycle: Vec<NodeId>,
    },
    /// A node references a dependency that doesn't exist
    UnresolvedDependency {
        /// The node that has the unresolved dependency
        node_id: NodeId,
        /// The dependency that couldn't be resolved
        missing_dependency: NodeId,
    },
    /// A node has a duplicate identifier
    DuplicateNodeId {
        /// The duplicate node identifier
        node_id: NodeId,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            GraphError::UnresolvedDependency {
                node_id,
                missing_dependency,
            } => {
                write!(
                    f,
                    "Node '{}' depends on '{}' which does not exist",
                    node_id, missing_dependency
                )
            }
            GraphError::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node ID: '{}'", node_id)
            }
        }
    }
}

impl std::error::Error for GraphError {}
