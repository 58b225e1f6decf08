// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for step sequencer trigger and reveal events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A trigger was accepted and a node entered `computing`.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use gatestep::observability::messages::sequencer::NodeTriggered;
///
/// let msg = NodeTriggered {
///     node_id: "update_gate",
///     architecture: "Update Gate Cell",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct NodeTriggered<'a> {
    pub node_id: &'a str,
    pub architecture: &'a str,
}

impl Display for NodeTriggered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Triggered node '{}' on {} graph",
            self.node_id, self.architecture
        )
    }
}

impl StructuredLog for NodeTriggered<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            architecture = self.architecture,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_triggered",
            span_name = name,
            node_id = self.node_id,
            architecture = self.architecture,
        )
    }
}

/// A node's value was materialized and the node reached `done`.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NodeRevealed<'a> {
    pub node_id: &'a str,
    pub remaining: usize,
}

impl Display for NodeRevealed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' revealed, {} nodes remaining",
            self.node_id, self.remaining
        )
    }
}

impl StructuredLog for NodeRevealed<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            remaining = self.remaining,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "node_revealed",
            span_name = name,
            node_id = self.node_id,
            remaining = self.remaining,
        )
    }
}

/// An illegal trigger request was rejected as a no-op.
///
/// # Log Level
/// `warn!` - Caller offered a trigger the state machine refuses
///
/// # Example
/// ```
/// use gatestep::observability::messages::sequencer::TriggerRejected;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
/// let msg = TriggerRejected {
///     node_id: "candidate",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct TriggerRejected<'a> {
    pub node_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TriggerRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rejected trigger for node '{}': {}",
            self.node_id, self.error
        )
    }
}

impl StructuredLog for TriggerRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "trigger_rejected",
            span_name = name,
            node_id = self.node_id,
            error = %self.error,
        )
    }
}

/// Every node reached `done`; fires once per sequencer instance.
///
/// # Log Level
/// `info!` - Important operational event
pub struct GraphResolved<'a> {
    pub architecture: &'a str,
    pub node_count: usize,
}

impl Display for GraphResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} graph resolved: all {} nodes revealed",
            self.architecture, self.node_count
        )
    }
}

impl StructuredLog for GraphResolved<'_> {
    fn log(&self) {
        tracing::info!(
            architecture = self.architecture,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "graph_resolved",
            span_name = name,
            architecture = self.architecture,
            node_count = self.node_count,
        )
    }
}

/// A sequencer instance was discarded and a fresh one installed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SequencerReplaced<'a> {
    pub architecture: &'a str,
    pub reason: &'a str,
}

impl Display for SequencerReplaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Replaced {} sequencer: {}",
            self.architecture, self.reason
        )
    }
}

impl StructuredLog for SequencerReplaced<'_> {
    fn log(&self) {
        tracing::info!(
            architecture = self.architecture,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "sequencer_replaced",
            span_name = name,
            architecture = self.architecture,
            reason = self.reason,
        )
    }
}
