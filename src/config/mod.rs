//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::sim::DEFAULT_MAX_TOSSES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sweep: SweepConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Parameters of the (bin count, trial) grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Smallest bin count in the sweep (inclusive)
    pub min_bins: usize,
    /// Largest bin count in the sweep (inclusive)
    pub max_bins: usize,
    /// Independent trials per bin count
    #[serde(default = "default_trials")]
    pub trials_per_bin_count: usize,
    /// Base seed for reproducible sweeps; None means OS entropy
    pub seed: Option<u64>,
    /// Worker threads; 1 = sequential, 0 = one per logical CPU
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Per-trial toss safety cap
    #[serde(default = "default_max_tosses")]
    pub max_tosses: u64,
}

fn default_trials() -> usize {
    10
}

fn default_threads() -> usize {
    1
}

fn default_max_tosses() -> u64 {
    DEFAULT_MAX_TOSSES
}

/// Report output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write a JSON report document to this path
    pub json_output: Option<PathBuf>,
    /// Write per-trial results as CSV to this path
    pub csv_output: Option<PathBuf>,
    /// Print each trial's final bin configuration
    #[serde(default)]
    pub show_bins: bool,
}

/// Runtime behaviour flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Validate configuration and exit without simulating
    #[serde(default)]
    pub dry_run: bool,
    /// Print stage timings to stderr
    #[serde(default)]
    pub debug: bool,
}

impl SweepConfig {
    /// Total number of trials in the grid
    pub fn total_trials(&self) -> usize {
        (self.max_bins - self.min_bins + 1) * self.trials_per_bin_count
    }
}
