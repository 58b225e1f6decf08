// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by the simulation session lifecycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Time-step advance requested before every node was revealed
    #[error("Step graph is not fully resolved: {remaining} nodes remain")]
    NotResolved { remaining: usize },
}
