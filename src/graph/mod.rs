// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod build;
mod node;
mod step_graph;
mod validation;

pub use build::{graph_for, ids};
pub use node::{BiasSlider, NodeId, NodeKind, NodeState, SourceField, StepNode};
pub use step_graph::StepGraph;
pub use validation::validate_step_graph;
