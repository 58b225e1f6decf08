// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for simulation session lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A parameter edit completed a fresh forward-pass evaluation.
///
/// # Log Level
/// `debug!` - High-frequency bookkeeping event
pub struct EvaluationCompleted<'a> {
    pub architecture: &'a str,
    pub dimensionality: usize,
}

impl Display for EvaluationCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Evaluated {} forward pass at dimensionality {}",
            self.architecture, self.dimensionality
        )
    }
}

impl StructuredLog for EvaluationCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            architecture = self.architecture,
            dimensionality = self.dimensionality,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "evaluation",
            span_name = name,
            architecture = self.architecture,
            dimensionality = self.dimensionality,
        )
    }
}

/// The resolved hidden (and cell) state was fed back as the next step's
/// inputs.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use gatestep::observability::messages::session::TimeStepAdvanced;
///
/// let msg = TimeStepAdvanced {
///     architecture: "Long Short-Term Memory",
///     step: 3,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct TimeStepAdvanced<'a> {
    pub architecture: &'a str,
    pub step: u64,
}

impl Display for TimeStepAdvanced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} advanced to time step {}",
            self.architecture, self.step
        )
    }
}

impl StructuredLog for TimeStepAdvanced<'_> {
    fn log(&self) {
        tracing::info!(
            architecture = self.architecture,
            step = self.step,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "time_step",
            span_name = name,
            architecture = self.architecture,
            step = self.step,
        )
    }
}

/// A scenario file was loaded and normalized.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ScenarioLoaded<'a> {
    pub path: &'a str,
    pub architecture: &'a str,
    pub dimensionality: usize,
}

impl Display for ScenarioLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded scenario '{}': {} at dimensionality {}",
            self.path, self.architecture, self.dimensionality
        )
    }
}

impl StructuredLog for ScenarioLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            architecture = self.architecture,
            dimensionality = self.dimensionality,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "scenario",
            span_name = name,
            path = self.path,
            architecture = self.architecture,
            dimensionality = self.dimensionality,
        )
    }
}
