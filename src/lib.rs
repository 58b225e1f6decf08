// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // parameters + scenario files
pub mod engine;     // step sequencer
pub mod errors;     // error handling
pub mod graph;      // per-architecture step graphs
pub mod math;       // vector algebra + evaluator
pub mod observability;
pub mod session;    // time-step controller
