// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod controller;
pub mod timestep;

pub use controller::SimulationSession;
