/// Smallest supported vector dimensionality
pub const MIN_DIMENSIONALITY: usize = 1;
/// Largest supported vector dimensionality
pub const MAX_DIMENSIONALITY: usize = 3;
/// Dimensionality used when a scenario does not declare one
pub const DEFAULT_DIMENSIONALITY: usize = 2;
/// Simulated latency between a node trigger and its reveal (milliseconds)
pub const DEFAULT_REVEAL_LATENCY_MS: u64 = 350;
/// Largest reveal latency a scenario may request (milliseconds)
pub const MAX_REVEAL_LATENCY_MS: u64 = 5_000;
