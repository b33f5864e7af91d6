//! BinPulse - Monte Carlo load-balance convergence profiler
//!
//! BinPulse estimates, by repeated simulation, how many units of uniformly
//! random placement it takes for k bins (servers, shards) to become roughly
//! balanced: every bin has had the chance to receive work, and at least 95%
//! of bins carry more than half the average load.
//!
//! # Architecture
//!
//! - **Pluggable bin selection**: a `BinPicker` seam over a fast seeded PRNG
//! - **Self-contained trials**: each trial is a pure function of its RNG stream
//! - **Sweep driver**: walks a (bin count, trial) grid, sequential or parallel
//! - **Descriptive statistics**: median, inclusive quartiles, multimode, stddev
//! - **Reports**: human-readable text, JSON documents, per-trial CSV

pub mod config;
pub mod distribution;
pub mod output;
pub mod sim;
pub mod stats;
pub mod sweep;

// Re-export commonly used types
pub use config::Config;
pub use distribution::BinPicker;

/// Result type used throughout BinPulse
pub type Result<T> = anyhow::Result<T>;
