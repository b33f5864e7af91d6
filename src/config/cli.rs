//! CLI argument parsing using clap

use crate::config::cli_convert;
use crate::Result;
use clap::Parser;
use std::path::PathBuf;

/// BinPulse - Monte Carlo load-balance convergence profiler
#[derive(Parser, Debug)]
#[command(name = "binpulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Bin count sweep range, inclusive (e.g. "2-10", or "16" for one count)
    #[arg(short = 'b', long, default_value = "2-10")]
    pub bins: String,

    /// Independent trials per bin count
    #[arg(short = 't', long, default_value = "10")]
    pub trials: usize,

    /// Base seed for a reproducible sweep (omitted: seeded from OS entropy)
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Worker threads (1 = sequential, 0 = one per logical CPU)
    #[arg(long, default_value = "1")]
    pub threads: usize,

    /// Per-trial toss safety cap
    #[arg(long, default_value = "100000000")]
    pub max_tosses: u64,

    /// TOML configuration file (CLI flags take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // === Output Options ===
    /// Write a JSON report document to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Write per-trial results as CSV to this path
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// Print each trial's final bin configuration
    #[arg(long)]
    pub show_bins: bool,

    // === Runtime Options ===
    /// Validate configuration and exit without simulating
    #[arg(long)]
    pub dry_run: bool,

    /// Print stage timings to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Fail fast on arguments that can be rejected before config assembly
    pub fn validate(&self) -> Result<()> {
        cli_convert::parse_bin_range(&self.bins)?;

        if self.trials < 1 {
            anyhow::bail!("--trials must be at least 1, got {}", self.trials);
        }

        Ok(())
    }
}
