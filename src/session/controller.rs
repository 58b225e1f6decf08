// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Simulation session tying parameters, evaluator, and sequencer together.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::consts::{
    DEFAULT_DIMENSIONALITY, DEFAULT_REVEAL_LATENCY_MS, MAX_DIMENSIONALITY, MIN_DIMENSIONALITY,
};
use crate::config::{Architecture, SimulationParams, SimulationResult};
use crate::engine::{
    run_walkthrough, FixedPacing, RevealPacing, SequencerEvent, StepSequencer, WalkthroughStep,
};
use crate::errors::{SessionError, TriggerError};
use crate::graph::{graph_for, BiasSlider, NodeId, NodeState, SourceField, StepGraph};
use crate::math::{result_from_trace, trace, Vector};
use crate::observability::messages::sequencer::SequencerReplaced;
use crate::observability::messages::session::{EvaluationCompleted, TimeStepAdvanced};
use crate::observability::messages::StructuredLog;
use crate::session::timestep;

/// One user-facing simulation: an architecture, a parameter snapshot, the
/// eagerly evaluated result, and the live sequencer revealing it.
///
/// ## Edit Policy
///
/// Every edit re-evaluates immediately. Edits that keep the graph shape
/// (bias sliders, vector components) swap the sequencer's trace in place so
/// already-revealed nodes refresh without losing progress. Edits that change
/// the shape of the walk (architecture, dimensionality, reset, time-step
/// advance) abandon the sequencer and install a fresh instance; the old
/// instance's cancellation token fires first, so a reveal still in flight
/// can never commit into the new graph.
pub struct SimulationSession {
    architecture: Architecture,
    params: SimulationParams,
    result: SimulationResult,
    graph: Arc<StepGraph>,
    sequencer: StepSequencer,
    events: mpsc::UnboundedReceiver<SequencerEvent>,
    pacing: Arc<dyn RevealPacing>,
    step: u64,
}

impl SimulationSession {
    pub fn new(
        architecture: Architecture,
        params: SimulationParams,
        pacing: Arc<dyn RevealPacing>,
    ) -> Self {
        let graph = Arc::new(graph_for(architecture));
        let trace = trace(&graph, &params);
        let result = result_from_trace(architecture, &trace);
        let (sequencer, events) =
            StepSequencer::new(Arc::clone(&graph), trace, Arc::clone(&pacing));
        Self {
            architecture,
            params,
            result,
            graph,
            sequencer,
            events,
            pacing,
            step: 0,
        }
    }

    /// Fresh session with zeroed state at the default dimensionality and
    /// the default reveal latency.
    pub fn with_defaults(architecture: Architecture) -> Self {
        Self::new(
            architecture,
            SimulationParams::zeroed(architecture, DEFAULT_DIMENSIONALITY),
            Arc::new(FixedPacing::from_millis(DEFAULT_REVEAL_LATENCY_MS)),
        )
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Full forward-pass result for the current parameters.
    ///
    /// Always in sync with `params`; the sequencer only controls when the
    /// per-node values become visible, not what they are.
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    /// Completed time steps since the last reset
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub async fn next_event(&mut self) -> Option<SequencerEvent> {
        self.events.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<SequencerEvent> {
        self.events.try_recv().ok()
    }

    pub async fn trigger(&self, node_id: &str) -> Result<(), TriggerError> {
        self.sequencer.trigger(node_id).await
    }

    pub async fn is_resolved(&self) -> bool {
        self.sequencer.is_resolved().await
    }

    /// First active node in graph declaration order, if any
    pub async fn first_active(&self) -> Option<NodeId> {
        let snapshot = self.sequencer.snapshot().await;
        self.graph
            .nodes()
            .iter()
            .find(|node| snapshot.get(node.id) == Some(&NodeState::Active))
            .map(|node| node.id)
    }

    /// Resolve the whole graph by triggering nodes in declaration order
    pub async fn run_walkthrough(&mut self) -> Result<Vec<WalkthroughStep>, TriggerError> {
        run_walkthrough(&self.sequencer, &mut self.events).await
    }

    /// Set a bias slider and re-evaluate, keeping sequencer progress
    pub async fn set_bias(&mut self, slider: BiasSlider, value: f64) {
        match slider {
            BiasSlider::Bias1 => self.params.bias1 = value,
            BiasSlider::Bias2 => self.params.bias2 = value,
            BiasSlider::Bias3 => self.params.bias3 = value,
        }
        self.refresh_trace().await;
    }

    /// Set one component of an input vector and re-evaluate, keeping
    /// sequencer progress.
    ///
    /// Out-of-range indices and cell edits on architectures without a cell
    /// state are ignored; the control surface never offers either. A stored
    /// vector shorter than the declared dimensionality is zero-extended up
    /// to the written index, matching the evaluator's zero-pad read.
    pub async fn set_component(&mut self, field: SourceField, index: usize, value: f64) {
        if index >= self.params.dimensionality {
            return;
        }
        let vector = match field {
            SourceField::InputX => &mut self.params.input_x,
            SourceField::HiddenPrev => &mut self.params.hidden_prev,
            SourceField::CellPrev => {
                if self.params.cell_prev.is_empty() {
                    return;
                }
                &mut self.params.cell_prev
            }
        };
        vector.set_component(index, value);
        self.refresh_trace().await;
    }

    /// Switch architectures, keeping the hidden state and inputs.
    ///
    /// The cell state is zeroed when switching to an architecture that has
    /// one and dropped when switching away; the sequencer is replaced.
    pub fn set_architecture(&mut self, architecture: Architecture) {
        if architecture == self.architecture {
            return;
        }
        self.architecture = architecture;
        self.params.cell_prev = if architecture.has_cell_state() {
            Vector::zeros(self.params.dimensionality)
        } else {
            Vector::new()
        };
        self.graph = Arc::new(graph_for(architecture));
        self.replace_sequencer("architecture changed");
    }

    /// Change dimensionality (clamped to the supported range), truncating or
    /// zero-extending every vector; the sequencer is replaced.
    pub fn set_dimensionality(&mut self, dimensionality: usize) {
        let dimensionality = dimensionality.clamp(MIN_DIMENSIONALITY, MAX_DIMENSIONALITY);
        if dimensionality == self.params.dimensionality {
            return;
        }
        self.params = timestep::resize(&self.params, dimensionality);
        self.replace_sequencer("dimensionality changed");
    }

    /// Zero the recurrent state and restart the walk at time step zero
    pub fn reset(&mut self) {
        self.params = timestep::reset(&self.params);
        self.step = 0;
        self.replace_sequencer("reset");
    }

    /// Feed the resolved outputs back as the next step's inputs.
    ///
    /// Valid only once every node is done; rejected otherwise so a viewer
    /// cannot skip past unrevealed steps.
    pub async fn advance(&mut self) -> Result<u64, SessionError> {
        let snapshot = self.sequencer.snapshot().await;
        let remaining = snapshot
            .values()
            .filter(|state| **state != NodeState::Done)
            .count();
        if remaining > 0 {
            return Err(SessionError::NotResolved { remaining });
        }

        self.params = timestep::advance(&self.params, &self.result);
        self.step += 1;
        self.replace_sequencer("time step advanced");
        TimeStepAdvanced {
            architecture: self.architecture.display_name(),
            step: self.step,
        }
        .log();
        Ok(self.step)
    }

    async fn refresh_trace(&mut self) {
        let trace = trace(&self.graph, &self.params);
        self.result = result_from_trace(self.architecture, &trace);
        self.sequencer.update_trace(trace).await;
        EvaluationCompleted {
            architecture: self.architecture.display_name(),
            dimensionality: self.params.dimensionality,
        }
        .log();
    }

    fn replace_sequencer(&mut self, reason: &str) {
        self.sequencer.abandon();
        let trace = trace(&self.graph, &self.params);
        self.result = result_from_trace(self.architecture, &trace);
        let (sequencer, events) =
            StepSequencer::new(Arc::clone(&self.graph), trace, Arc::clone(&self.pacing));
        self.sequencer = sequencer;
        self.events = events;
        SequencerReplaced {
            architecture: self.architecture.display_name(),
            reason,
        }
        .log();
    }
}
