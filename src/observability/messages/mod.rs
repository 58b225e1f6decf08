// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! This module contains all message types used for diagnostic and
//! operational logging. Each message type implements the `Display` trait to
//! provide consistent, human-readable output, and `StructuredLog` to emit
//! the same event with structured fields.
//!
//! # Organization
//!
//! Messages are organized by subsystem:
//!
//! * `sequencer` - step sequencer trigger and reveal events
//! * `session` - simulation session lifecycle events
//!
//! # Usage Pattern
//!
//! ```rust
//! use gatestep::observability::messages::sequencer::NodeTriggered;
//!
//! let msg = NodeTriggered {
//!     node_id: "update_gate",
//!     architecture: "Gated Recurrent Unit",
//! };
//!
//! tracing::info!("{}", msg);
//! ```

use tracing::Span;

pub mod sequencer;
pub mod session;

/// Structured emission for log message types.
///
/// Pairs a message's `Display` text with its structured fields so the same
/// event renders for humans and for log aggregation without duplicating
/// either.
pub trait StructuredLog: std::fmt::Display {
    /// Emit the message at its designated level with structured fields
    fn log(&self);

    /// Create a span carrying the message's structured fields
    fn span(&self, name: &str) -> Span;
}
