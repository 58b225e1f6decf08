// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Scripted walkthrough that resolves an entire step graph.
//!
//! The interactive surface lets a user pick any active node; batch callers
//! (scenario runs, the demo binary) instead want the whole graph revealed in
//! a stable order. [`run_walkthrough`] plays the role of that user, always
//! triggering the first active node in declaration order.

use tokio::sync::mpsc;

use crate::engine::sequencer::{SequencerEvent, StepSequencer};
use crate::errors::TriggerError;
use crate::graph::{NodeId, NodeState};
use crate::math::Vector;

/// One revealed node, in the order the walkthrough triggered it
#[derive(Debug, Clone, PartialEq)]
pub struct WalkthroughStep {
    pub node_id: NodeId,
    pub label: &'static str,
    pub value: Vector,
}

/// Trigger active nodes in declaration order until the graph resolves.
///
/// Consumes events from `events`, which must be the receiver paired with
/// `sequencer`. Returns the revealed steps; every trigger this issues is
/// legal, so an error here means the receiver belongs to a different
/// sequencer.
pub async fn run_walkthrough(
    sequencer: &StepSequencer,
    events: &mut mpsc::UnboundedReceiver<SequencerEvent>,
) -> Result<Vec<WalkthroughStep>, TriggerError> {
    let mut steps = Vec::with_capacity(sequencer.graph().len());

    'walk: while !sequencer.is_resolved().await {
        let snapshot = sequencer.snapshot().await;
        let Some(node) = sequencer
            .graph()
            .nodes()
            .iter()
            .find(|node| snapshot.get(node.id) == Some(&NodeState::Active))
        else {
            break;
        };

        let (node_id, label) = (node.id, node.label);
        sequencer.trigger(node_id).await?;

        loop {
            match events.recv().await {
                Some(SequencerEvent::NodeRevealed { node_id: id, value }) if id == node_id => {
                    steps.push(WalkthroughStep {
                        node_id,
                        label,
                        value,
                    });
                    break;
                }
                Some(_) => {}
                None => break 'walk,
            }
        }
    }

    Ok(steps)
}
