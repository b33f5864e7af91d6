//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
///
/// Fails fast, before any trial runs.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sweep(&config.sweep)?;

    Ok(())
}

/// Validate sweep parameters
pub fn validate_sweep(sweep: &SweepConfig) -> Result<()> {
    if sweep.min_bins < 1 {
        anyhow::bail!("bin count must be at least 1, got {}", sweep.min_bins);
    }

    if sweep.max_bins < sweep.min_bins {
        anyhow::bail!(
            "bin range end ({}) must not be below its start ({})",
            sweep.max_bins,
            sweep.min_bins
        );
    }

    if sweep.trials_per_bin_count < 1 {
        anyhow::bail!(
            "trials per bin count must be at least 1, got {}",
            sweep.trials_per_bin_count
        );
    }

    if sweep.max_tosses == 0 {
        anyhow::bail!("toss cap must be at least 1, got 0");
    }

    // The stopping time grows roughly with k * ln k; beyond this the sweep
    // still works but single trials get slow
    if sweep.max_bins > 512 {
        eprintln!(
            "Warning: bin counts above 512 (got {}) make individual trials slow",
            sweep.max_bins
        );
    }

    Ok(())
}
