// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Interactive step sequencer driving one walkthrough of a step graph.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::config::Architecture;
use crate::engine::pacing::RevealPacing;
use crate::errors::TriggerError;
use crate::graph::{NodeId, NodeState, StepGraph};
use crate::math::{EvaluationTrace, Vector};
use crate::observability::messages::sequencer as messages;
use crate::observability::messages::StructuredLog;

/// Event emitted as the sequencer's node states change.
///
/// Events are ordered: a reveal is always sent before the activations it
/// causes, and `GraphResolved` follows the final reveal.
#[derive(Debug, Clone, PartialEq)]
pub enum SequencerEvent {
    /// Nodes whose dependencies just completed; they now accept triggers
    NodeActivated { node_ids: Vec<NodeId> },
    /// A triggered node finished computing and its value became visible
    NodeRevealed { node_id: NodeId, value: Vector },
    /// Every node in the graph is done
    GraphResolved { architecture: Architecture },
}

/// Mutable sequencer state, shared between the public handle and in-flight
/// reveal tasks.
struct SequencerCore {
    graph: Arc<StepGraph>,
    trace: EvaluationTrace,
    states: HashMap<NodeId, NodeState>,
    /// Node whose reveal is in flight; at most one trigger may be pending
    computing: Option<NodeId>,
    /// Guards the one-shot `GraphResolved` event
    resolved_signaled: bool,
    events: mpsc::UnboundedSender<SequencerEvent>,
}

impl SequencerCore {
    /// Validate a trigger request and transition the node to `computing`.
    ///
    /// Rejections leave every node state untouched.
    fn begin_compute(&mut self, node_id: &str) -> Result<NodeId, TriggerError> {
        let node = self
            .graph
            .node(node_id)
            .ok_or_else(|| TriggerError::UnknownNode(node_id.to_string()))?;

        if let Some(computing) = self.computing {
            return Err(TriggerError::Busy {
                computing: computing.to_string(),
            });
        }

        let state = self.states.get(node.id).copied().unwrap_or(NodeState::Pending);
        if state != NodeState::Active {
            return Err(TriggerError::NotActive {
                node_id: node.id.to_string(),
                state,
            });
        }

        self.states.insert(node.id, NodeState::Computing);
        self.computing = Some(node.id);
        Ok(node.id)
    }

    /// Roll a cancelled reveal back to `active`, as if never triggered
    fn cancel_compute(&mut self, node_id: NodeId) {
        if self.computing == Some(node_id) {
            self.states.insert(node_id, NodeState::Active);
            self.computing = None;
        }
    }

    /// Complete a reveal: mark the node done, surface its value, and
    /// activate any dependents whose dependency sets are now fully done.
    fn commit_reveal(&mut self, node_id: NodeId) {
        if self.computing != Some(node_id) {
            // Cancelled between the pacing wait and this commit
            return;
        }
        self.states.insert(node_id, NodeState::Done);
        self.computing = None;

        let value = self.trace.value(node_id).cloned().unwrap_or_default();
        let _ = self.events.send(SequencerEvent::NodeRevealed { node_id, value });
        messages::NodeRevealed {
            node_id,
            remaining: self.remaining(),
        }
        .log();

        let activated = self.promote_dependents_of(node_id);
        if !activated.is_empty() {
            let _ = self
                .events
                .send(SequencerEvent::NodeActivated { node_ids: activated });
        }

        if !self.resolved_signaled && self.is_resolved() {
            self.resolved_signaled = true;
            let architecture = self.graph.architecture();
            let _ = self
                .events
                .send(SequencerEvent::GraphResolved { architecture });
            messages::GraphResolved {
                architecture: architecture.display_name(),
                node_count: self.graph.len(),
            }
            .log();
        }
    }

    /// Pending dependents of `node_id` whose dependencies are now all done
    /// move to `active`; returns them in graph declaration order.
    fn promote_dependents_of(&mut self, node_id: NodeId) -> Vec<NodeId> {
        let graph = Arc::clone(&self.graph);
        let mut activated = Vec::new();
        for &dependent in graph.dependents_of(node_id) {
            if self.states.get(dependent) != Some(&NodeState::Pending) {
                continue;
            }
            let ready = graph
                .node(dependent)
                .map(|node| {
                    node.dependencies()
                        .all(|dependency| self.states.get(dependency) == Some(&NodeState::Done))
                })
                .unwrap_or(false);
            if ready {
                self.states.insert(dependent, NodeState::Active);
                activated.push(dependent);
            }
        }
        activated
    }

    /// Swap in a freshly evaluated trace, keeping all node states.
    ///
    /// Done nodes whose visible value changed are re-announced so observers
    /// can refresh their display.
    fn replace_trace(&mut self, trace: EvaluationTrace) {
        let previous = std::mem::replace(&mut self.trace, trace);
        let graph = Arc::clone(&self.graph);
        for node in graph.nodes() {
            if self.states.get(node.id) != Some(&NodeState::Done) {
                continue;
            }
            let value = self.trace.value(node.id).cloned().unwrap_or_default();
            if previous.value(node.id) != Some(&value) {
                let _ = self.events.send(SequencerEvent::NodeRevealed {
                    node_id: node.id,
                    value,
                });
            }
        }
    }

    fn is_resolved(&self) -> bool {
        self.states.values().all(|state| *state == NodeState::Done)
    }

    fn remaining(&self) -> usize {
        self.states
            .values()
            .filter(|state| **state != NodeState::Done)
            .count()
    }
}

/// Step sequencer walking a single evaluation of a step graph under user
/// control.
///
/// ## Trigger Protocol
///
/// Nodes advance `pending -> active -> computing -> done`. Entry nodes start
/// `active`; every other transition to `active` happens when the last
/// dependency of a pending node reaches `done`. Only `active` nodes accept
/// [`trigger`](Self::trigger), and at most one reveal is in flight at a time.
/// Illegal triggers return a [`TriggerError`] and change nothing.
///
/// ## Values Come From the Trace
///
/// The bound [`EvaluationTrace`] is computed up front by the evaluator; the
/// sequencer never computes node values itself. Triggering a node only holds
/// it in `computing` for the pacing interval before revealing the traced
/// value, so a revealed graph always agrees with a direct evaluation of the
/// same parameters.
///
/// ## Replacement
///
/// A sequencer is bound to one graph for its whole life. Parameter edits that
/// keep the graph shape swap the trace via
/// [`update_trace`](Self::update_trace); anything else (architecture change,
/// reset, time-step advance) builds a new sequencer and abandons this one,
/// cancelling any reveal still in flight.
pub struct StepSequencer {
    core: Arc<Mutex<SequencerCore>>,
    graph: Arc<StepGraph>,
    pacing: Arc<dyn RevealPacing>,
    cancellation: CancellationToken,
}

impl StepSequencer {
    /// Create a sequencer over `graph` revealing values from `trace`.
    ///
    /// Entry nodes start `active` without an event; the returned receiver
    /// only carries changes caused by triggers.
    pub fn new(
        graph: Arc<StepGraph>,
        trace: EvaluationTrace,
        pacing: Arc<dyn RevealPacing>,
    ) -> (Self, mpsc::UnboundedReceiver<SequencerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        let mut states = HashMap::with_capacity(graph.len());
        for node in graph.nodes() {
            let state = if node.dependencies().next().is_none() {
                NodeState::Active
            } else {
                NodeState::Pending
            };
            states.insert(node.id, state);
        }

        let core = SequencerCore {
            graph: Arc::clone(&graph),
            trace,
            states,
            computing: None,
            resolved_signaled: false,
            events,
        };

        let sequencer = Self {
            core: Arc::new(Mutex::new(core)),
            graph,
            pacing,
            cancellation: CancellationToken::new(),
        };
        (sequencer, receiver)
    }

    /// Request the reveal of an `active` node.
    ///
    /// On success the node is `computing` by the time this returns; the value
    /// is revealed through the event channel after the pacing interval.
    pub async fn trigger(&self, node_id: &str) -> Result<(), TriggerError> {
        let id = {
            let mut core = self.core.lock().await;
            match core.begin_compute(node_id) {
                Ok(id) => id,
                Err(error) => {
                    messages::TriggerRejected {
                        node_id,
                        error: &error,
                    }
                    .log();
                    return Err(error);
                }
            }
        };

        messages::NodeTriggered {
            node_id: id,
            architecture: self.graph.architecture().display_name(),
        }
        .log();
        self.spawn_reveal(id);
        Ok(())
    }

    fn spawn_reveal(&self, node_id: NodeId) {
        let core = Arc::clone(&self.core);
        let pacing = Arc::clone(&self.pacing);
        let cancellation = self.cancellation.clone();
        tokio::spawn(async move {
            tokio::select! {
                // Abandoned sequencers drop in-flight reveals
                _ = cancellation.cancelled() => {
                    core.lock().await.cancel_compute(node_id);
                }
                // Reveal after the pacing interval
                _ = pacing.wait() => {
                    core.lock().await.commit_reveal(node_id);
                }
            }
        });
    }

    /// Replace the bound trace after a value-only parameter edit.
    ///
    /// Node states are preserved; done nodes whose value changed are
    /// re-announced on the event channel.
    pub async fn update_trace(&self, trace: EvaluationTrace) {
        self.core.lock().await.replace_trace(trace);
    }

    pub async fn state_of(&self, node_id: &str) -> Option<NodeState> {
        self.core.lock().await.states.get(node_id).copied()
    }

    /// Current state of every node
    pub async fn snapshot(&self) -> HashMap<NodeId, NodeState> {
        self.core.lock().await.states.clone()
    }

    /// The traced value of a node, visible only once the node is done
    pub async fn revealed_value(&self, node_id: &str) -> Option<Vector> {
        let core = self.core.lock().await;
        if core.states.get(node_id) != Some(&NodeState::Done) {
            return None;
        }
        core.trace.value(node_id).cloned()
    }

    pub async fn is_resolved(&self) -> bool {
        self.core.lock().await.is_resolved()
    }

    pub fn architecture(&self) -> Architecture {
        self.graph.architecture()
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    /// Cancel any in-flight reveal, rolling its node back to `active`.
    ///
    /// Called when this sequencer is being replaced; also runs on drop.
    pub fn abandon(&self) {
        self.cancellation.cancel();
    }
}

impl Drop for StepSequencer {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
