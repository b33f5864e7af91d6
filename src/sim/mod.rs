//! Trial simulation
//!
//! One trial tosses units of work into k bins, one uniformly random bin per
//! toss, until the balance criterion first holds. The criterion after toss
//! N is:
//!
//! 1. N >= k, so every bin has had at least the opportunity to receive work
//! 2. at least 95% of bins hold strictly more than `max(1, N / 2k)` units,
//!    i.e. more than half the current average load, floored at one unit
//!
//! The 95% fraction is measured with the inclusive empirical CDF: a bin
//! whose count equals the threshold exactly counts as *at or below* it and
//! is excluded from the success fraction. Callers that need bit-identical
//! statistics must not replace this with a strict comparison.
//!
//! The predicate is evaluated after every single toss (not batched), since
//! each toss can change which bins sit above the threshold.

use crate::distribution::BinPicker;
use crate::Result;
use anyhow::{bail, ensure};

/// Default per-trial toss cap
///
/// Far beyond the stopping time for any bin count this tool is pointed at
/// (a few hundred bins stop within tens of thousands of tosses). Hitting
/// the cap is reported as an error, never silently truncated.
pub const DEFAULT_MAX_TOSSES: u64 = 100_000_000;

/// Outcome of a single completed trial
///
/// Holds the final bin configuration and the stopping time. The per-bin
/// counts are kept for diagnostic inspection only; aggregation works on the
/// derived mean load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Final per-bin counts, index = bin identity
    pub bins: Vec<u64>,
    /// Number of tosses performed when the balance criterion first held
    pub tosses: u64,
}

impl TrialOutcome {
    /// Mean load at the stopping point, rounded to one decimal
    ///
    /// This is the scalar the sweep aggregates over.
    pub fn mean_load(&self) -> f64 {
        crate::stats::round_to_tenth(self.tosses as f64 / self.bins.len() as f64)
    }

    /// Count in the emptiest bin
    pub fn min_bin(&self) -> u64 {
        self.bins.iter().copied().min().unwrap_or(0)
    }

    /// Count in the fullest bin
    pub fn max_bin(&self) -> u64 {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

/// Trial simulator
///
/// Stateless apart from the toss cap; one instance drives any number of
/// trials. Randomness comes from the caller-supplied picker, so trials stay
/// independently seedable and replayable.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    max_tosses: u64,
}

impl Simulator {
    /// Create a simulator with the default toss cap
    pub fn new() -> Self {
        Self {
            max_tosses: DEFAULT_MAX_TOSSES,
        }
    }

    /// Create a simulator with a specific toss cap
    pub fn with_max_tosses(max_tosses: u64) -> Self {
        Self { max_tosses }
    }

    /// Run one trial with `num_bins` bins
    ///
    /// Tosses until the balance criterion first holds and returns the final
    /// bin configuration together with the stopping time. The returned state
    /// is the first one in the trial that satisfies the criterion.
    ///
    /// # Errors
    ///
    /// Fails if `num_bins` is zero or the toss cap is exceeded.
    pub fn run_trial(&self, num_bins: usize, picker: &mut dyn BinPicker) -> Result<TrialOutcome> {
        ensure!(num_bins >= 1, "bin count must be at least 1, got 0");

        let mut bins = vec![0u64; num_bins];
        // Tosses are 1-indexed: `tosses` names the toss just performed
        let mut tosses: u64 = 1;

        loop {
            let idx = picker.next_bin(num_bins);
            bins[idx] += 1;

            if stopping_condition_met(&bins, tosses) {
                return Ok(TrialOutcome { bins, tosses });
            }

            tosses += 1;
            if tosses > self.max_tosses {
                bail!(
                    "trial with {} bins exceeded the toss cap of {}",
                    num_bins,
                    self.max_tosses
                );
            }
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance criterion for the current bin state after `tosses` tosses
///
/// Returns true when every bin has had the chance to receive work
/// (tosses >= bin count) and at least 95% of bins hold strictly more than
/// `max(1, tosses / 2k)` units.
pub fn stopping_condition_met(bins: &[u64], tosses: u64) -> bool {
    if tosses < bins.len() as u64 {
        return false;
    }
    let min_count = (tosses as f64 / (2.0 * bins.len() as f64)).max(1.0);
    1.0 - empirical_cdf(bins, min_count) >= 0.95
}

/// Inclusive empirical CDF of `data` at `x`
///
/// Fraction of entries with value <= x. Entries exactly equal to `x` count
/// toward the CDF.
pub fn empirical_cdf(data: &[u64], x: f64) -> f64 {
    let at_or_below = data.iter().filter(|&&v| v as f64 <= x).count();
    at_or_below as f64 / data.len() as f64
}
