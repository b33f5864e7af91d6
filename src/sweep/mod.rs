//! Sweep orchestration
//!
//! The driver walks the (bin count, trial) grid in ascending order, runs one
//! independent simulation per cell, and reduces each to a `TrialRecord`.
//! Trials never share state; each gets its own RNG stream derived from the
//! base seed and its grid index, so a sweep is reproducible from the base
//! seed alone - sequentially or across any number of worker threads.
//!
//! # Seeding
//!
//! Per-trial seed = base seed + grid index, expanded through SplitMix64 by
//! `seed_from_u64`. Adjacent seeds therefore yield uncorrelated xoshiro
//! streams, and the stream assigned to a cell does not depend on execution
//! order or thread count.

use crate::config::Config;
use crate::distribution::UniformPicker;
use crate::sim::Simulator;
use crate::stats::SummaryStatistics;
use crate::Result;
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One trial reduced to its aggregation scalar plus diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Number of bins in this trial
    pub bin_count: usize,
    /// Trial index within this bin count (0-based)
    pub trial: usize,
    /// Stopping time: tosses performed when the balance criterion first held
    pub tosses: u64,
    /// Mean load at the stopping point, rounded to one decimal
    pub mean_load: f64,
    /// Count in the emptiest bin at the stopping point
    pub min_bin: u64,
    /// Count in the fullest bin at the stopping point
    pub max_bin: u64,
    /// Final per-bin counts, kept for diagnostic display only
    #[serde(skip)]
    pub bins: Vec<u64>,
}

/// All trial records of one sweep, in (bin count, trial) order
#[derive(Debug, Clone)]
pub struct SweepResults {
    pub records: Vec<TrialRecord>,
}

impl SweepResults {
    /// The mean-load scalar of every trial, in record order
    pub fn mean_loads(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mean_load).collect()
    }

    /// Summary statistics over all mean loads
    ///
    /// Too few trials for the spread statistics surface as
    /// [`crate::stats::StatsError::InsufficientSampleSize`].
    pub fn summary(&self) -> Result<SummaryStatistics> {
        Ok(SummaryStatistics::compute(&self.mean_loads())?)
    }
}

/// Sweep driver
///
/// Owns the resolved base seed and the simulator; `run()` may be called any
/// number of times and always reproduces the same records.
pub struct SweepDriver {
    config: Config,
    base_seed: u64,
    simulator: Simulator,
}

impl SweepDriver {
    /// Create a driver, resolving the base seed
    ///
    /// A configured seed is used as-is; otherwise one is read from OS
    /// entropy. Entropy failure is propagated, not masked.
    pub fn new(config: &Config) -> Result<Self> {
        let base_seed = match config.sweep.seed {
            Some(seed) => seed,
            None => entropy_seed()?,
        };

        Ok(Self {
            config: config.clone(),
            base_seed,
            simulator: Simulator::with_max_tosses(config.sweep.max_tosses),
        })
    }

    /// The base seed this sweep runs under
    ///
    /// Printed in reports so an entropy-seeded run can be reproduced.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Run the full sweep
    ///
    /// Records come back in (bin count, trial) ascending order regardless of
    /// thread count.
    pub fn run(&self) -> Result<SweepResults> {
        let sweep = &self.config.sweep;

        let grid: Vec<(usize, usize)> = (sweep.min_bins..=sweep.max_bins)
            .flat_map(|bin_count| {
                (0..sweep.trials_per_bin_count).map(move |trial| (bin_count, trial))
            })
            .collect();

        let records = match self.resolve_threads() {
            1 => grid
                .iter()
                .enumerate()
                .map(|(index, &(bin_count, trial))| self.run_one(index as u64, bin_count, trial))
                .collect::<Result<Vec<_>>>()?,
            threads => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .context("Failed to build sweep thread pool")?;
                pool.install(|| {
                    grid.par_iter()
                        .enumerate()
                        .map(|(index, &(bin_count, trial))| {
                            self.run_one(index as u64, bin_count, trial)
                        })
                        .collect::<Result<Vec<_>>>()
                })?
            }
        };

        Ok(SweepResults { records })
    }

    fn resolve_threads(&self) -> usize {
        match self.config.sweep.threads {
            0 => num_cpus::get(),
            n => n,
        }
    }

    /// Run one grid cell on its own RNG stream
    fn run_one(&self, grid_index: u64, bin_count: usize, trial: usize) -> Result<TrialRecord> {
        let mut picker = UniformPicker::with_seed(self.base_seed.wrapping_add(grid_index));

        let outcome = self
            .simulator
            .run_trial(bin_count, &mut picker)
            .with_context(|| format!("Trial {} with {} bins failed", trial, bin_count))?;

        Ok(TrialRecord {
            bin_count,
            trial,
            tosses: outcome.tosses,
            mean_load: outcome.mean_load(),
            min_bin: outcome.min_bin(),
            max_bin: outcome.max_bin(),
            bins: outcome.bins,
        })
    }
}

/// Read a base seed from OS entropy
fn entropy_seed() -> Result<u64> {
    use rand::RngCore;

    let mut buf = [0u8; 8];
    rand::rngs::OsRng
        .try_fill_bytes(&mut buf)
        .context("Failed to read OS entropy for the base seed")?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputConfig, RuntimeConfig, SweepConfig};
    use crate::sim::DEFAULT_MAX_TOSSES;

    fn config(min_bins: usize, max_bins: usize, trials: usize, seed: u64) -> Config {
        Config {
            sweep: SweepConfig {
                min_bins,
                max_bins,
                trials_per_bin_count: trials,
                seed: Some(seed),
                threads: 1,
                max_tosses: DEFAULT_MAX_TOSSES,
            },
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }

    #[test]
    fn test_sweep_grid_shape_and_order() {
        let driver = SweepDriver::new(&config(2, 3, 5, 42)).unwrap();
        let results = driver.run().unwrap();

        assert_eq!(results.records.len(), 10);
        let cells: Vec<(usize, usize)> = results
            .records
            .iter()
            .map(|r| (r.bin_count, r.trial))
            .collect();
        let expected: Vec<(usize, usize)> = (2..=3)
            .flat_map(|k| (0..5).map(move |t| (k, t)))
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let cfg = config(2, 3, 5, 42);
        let first = SweepDriver::new(&cfg).unwrap().run().unwrap();
        let second = SweepDriver::new(&cfg).unwrap().run().unwrap();

        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential_cfg = config(2, 4, 4, 7);
        let mut parallel_cfg = sequential_cfg.clone();
        parallel_cfg.sweep.threads = 3;

        let sequential = SweepDriver::new(&sequential_cfg).unwrap().run().unwrap();
        let parallel = SweepDriver::new(&parallel_cfg).unwrap().run().unwrap();

        assert_eq!(sequential.records, parallel.records);
    }

    #[test]
    fn test_configured_seed_is_used() {
        let driver = SweepDriver::new(&config(2, 2, 1, 1234)).unwrap();
        assert_eq!(driver.base_seed(), 1234);
    }

    #[test]
    fn test_entropy_seed_when_unset() {
        let mut cfg = config(2, 2, 1, 0);
        cfg.sweep.seed = None;
        // Two entropy-seeded drivers almost surely differ; equal seeds here
        // would mean the entropy path is not being taken at all
        let a = SweepDriver::new(&cfg).unwrap();
        let b = SweepDriver::new(&cfg).unwrap();
        assert!(a.base_seed() != b.base_seed() || a.base_seed() != 0);
    }

    #[test]
    fn test_record_invariants() {
        let driver = SweepDriver::new(&config(2, 6, 3, 99)).unwrap();
        let results = driver.run().unwrap();

        for record in &results.records {
            assert_eq!(record.bins.len(), record.bin_count);
            assert_eq!(record.bins.iter().sum::<u64>(), record.tosses);
            assert!(record.tosses >= record.bin_count as u64);
            assert!(record.min_bin <= record.max_bin);
            assert!(record.mean_load >= 1.0);
        }
    }

    #[test]
    fn test_mean_load_sanity_band() {
        // For a fixed bin count the average mean load over many trials sits
        // in a sane band: at least 2 (the criterion cannot hold while any
        // bin is below 2) and nowhere near the degenerate extremes.
        let driver = SweepDriver::new(&config(5, 5, 60, 4242)).unwrap();
        let results = driver.run().unwrap();

        let loads = results.mean_loads();
        let average = loads.iter().sum::<f64>() / loads.len() as f64;
        assert!(
            (2.0..=50.0).contains(&average),
            "average mean load {} outside sanity band",
            average
        );
    }

    #[test]
    fn test_summary_over_sweep() {
        let driver = SweepDriver::new(&config(2, 3, 5, 42)).unwrap();
        let results = driver.run().unwrap();
        let summary = results.summary().unwrap();

        assert_eq!(summary.count, 10);
        assert!(summary.min <= summary.median && summary.median <= summary.max);
        assert!(summary.quartiles[0] <= summary.quartiles[1]);
        assert!(summary.quartiles[1] <= summary.quartiles[2]);
    }
}
