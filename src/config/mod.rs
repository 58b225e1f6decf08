// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod params;
mod scenario;

pub mod consts;

pub use params::{Architecture, SimulationParams, SimulationResult};
pub use scenario::{load_scenario, Scenario};
