// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the gatestep project. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Maintain Single Responsibility Principle (SRP)
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::sequencer` - Step sequencer trigger, reveal, and resolution events
//! * `messages::session` - Simulation session, time-step, and scenario events
//!
//! # Usage
//!
//! ```rust
//! use gatestep::observability::messages::sequencer::TriggerRejected;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! let msg = TriggerRejected {
//!     node_id: "update_gate",
//!     error: &error,
//! };
//!
//! tracing::warn!("{}", msg);
//! ```

pub mod messages;
