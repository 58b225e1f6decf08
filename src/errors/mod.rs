// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod graph;
mod scenario;
mod session;
mod trigger;

pub use graph::GraphError;
pub use scenario::ScenarioError;
pub use session::SessionError;
pub use trigger::TriggerError;
