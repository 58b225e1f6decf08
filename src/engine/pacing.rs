// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reveal pacing strategies for the step sequencer.
//!
//! Triggering a node does not reveal its value immediately. The sequencer
//! holds the node in the computing state for a pacing interval so a viewer
//! can follow the computation one step at a time. Tests and batch callers
//! swap in [`ImmediatePacing`] to skip the delay entirely.

use async_trait::async_trait;
use std::time::Duration;

/// Controls how long a triggered node stays in the computing state before
/// its value is revealed.
#[async_trait]
pub trait RevealPacing: Send + Sync {
    async fn wait(&self);
}

/// Waits a fixed interval before each reveal.
pub struct FixedPacing(pub Duration);

impl FixedPacing {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

#[async_trait]
impl RevealPacing for FixedPacing {
    async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Reveals values as soon as they are triggered.
pub struct ImmediatePacing;

#[async_trait]
impl RevealPacing for ImmediatePacing {
    async fn wait(&self) {}
}
