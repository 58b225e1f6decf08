// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while loading a scenario file.
///
/// Malformed numeric values inside an otherwise well-formed file are not
/// errors; they deserialize to 0. These variants cover the file itself being
/// unreadable or structurally invalid.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("Failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML for the expected shape
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
}
