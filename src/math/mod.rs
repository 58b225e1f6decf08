// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod evaluator;
mod vector;

pub use evaluator::{evaluate, result_from_trace, trace, EvaluationTrace};
pub use vector::Vector;
