// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rejection type for illegal sequencer trigger requests.
//!
//! A rejected trigger is a no-op, never fatal: node states are left exactly
//! as they were, and the caller decides whether to surface the rejection.

use crate::graph::NodeState;
use thiserror::Error;

/// Why a trigger request was rejected.
///
/// The presentation layer is responsible for only offering triggers on
/// `active` nodes; these variants cover callers that do not.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriggerError {
    /// The requested node is not part of the bound step graph
    #[error("Unknown node: '{0}'")]
    UnknownNode(String),

    /// The requested node is not awaiting a trigger
    #[error("Node '{node_id}' is {state}, only active nodes can be triggered")]
    NotActive {
        node_id: String,
        state: NodeState,
    },

    /// Another node's reveal is already in flight
    #[error("Node '{computing}' is already computing, one trigger may be in flight at a time")]
    Busy { computing: String },
}
