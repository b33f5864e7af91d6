//! Descriptive statistics over per-trial mean loads
//!
//! The sweep reduces every trial to one scalar (mean load at the stopping
//! point, rounded to one decimal) and this module reduces the scalar
//! collection to a summary:
//!
//! - **median**: middle value, average of the two middles for even counts
//! - **quartiles**: inclusive method with linear interpolation
//! - **multimode**: every value tied for the highest frequency
//! - **min/max/mean**
//! - **std_dev**: sample standard deviation (n - 1), Welford accumulation
//!
//! Small samples are an error, not a degenerate value: a standard deviation
//! over fewer than two samples reports `InsufficientSampleSize` instead of
//! returning 0 or NaN.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Statistics computation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// The input collection was empty
    #[error("cannot compute {statistic} over an empty sample")]
    EmptySample { statistic: &'static str },

    /// The input collection was too small for the requested statistic
    #[error("{statistic} requires at least {required} samples, got {actual}")]
    InsufficientSampleSize {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },
}

/// Round to one decimal place
///
/// Half-way values round away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean
pub fn mean(data: &[f64]) -> Result<f64, StatsError> {
    if data.is_empty() {
        return Err(StatsError::EmptySample { statistic: "mean" });
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median: middle value, or the average of the two middle values
pub fn median(data: &[f64]) -> Result<f64, StatsError> {
    if data.is_empty() {
        return Err(StatsError::EmptySample {
            statistic: "median",
        });
    }
    let sorted = sorted_copy(data);
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Quartile boundaries using the inclusive method
///
/// For n sorted values the p-th quartile sits at position `p * (n - 1) / 4`
/// (p = 1, 2, 3), with linear interpolation between the neighbouring sorted
/// values at non-integer positions. This matches the "inclusive" method of
/// standard statistics libraries.
///
/// # Example
///
/// ```
/// use binpulse::stats::quartiles;
/// assert_eq!(quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap(), [1.75, 2.5, 3.25]);
/// ```
pub fn quartiles(data: &[f64]) -> Result<[f64; 3], StatsError> {
    if data.len() < 2 {
        return Err(StatsError::InsufficientSampleSize {
            statistic: "quartiles",
            required: 2,
            actual: data.len(),
        });
    }
    let sorted = sorted_copy(data);
    Ok([
        quantile_sorted(&sorted, 0.25),
        quantile_sorted(&sorted, 0.5),
        quantile_sorted(&sorted, 0.75),
    ])
}

/// Quantile of pre-sorted data at `p` in [0, 1], linear interpolation
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let position = p * (n - 1) as f64;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    if lower + 1 >= n {
        return sorted[n - 1];
    }
    sorted[lower] * (1.0 - fraction) + sorted[lower + 1] * fraction
}

/// All values tied for the highest frequency, ascending
///
/// Values are keyed by their one-decimal representation, so two floats that
/// display identically count as the same value.
pub fn multimode(data: &[f64]) -> Result<Vec<f64>, StatsError> {
    if data.is_empty() {
        return Err(StatsError::EmptySample {
            statistic: "multimode",
        });
    }

    // Scaled-integer keys; f64 is not hashable and display equality is what
    // matters for one-decimal data
    let mut frequencies: HashMap<i64, usize> = HashMap::new();
    for &value in data {
        *frequencies.entry(tenth_key(value)).or_insert(0) += 1;
    }

    let top = *frequencies.values().max().unwrap_or(&0);
    let mut modes: Vec<i64> = frequencies
        .iter()
        .filter(|&(_, &count)| count == top)
        .map(|(&key, _)| key)
        .collect();
    modes.sort_unstable();

    Ok(modes.into_iter().map(|key| key as f64 / 10.0).collect())
}

fn tenth_key(value: f64) -> i64 {
    (value * 10.0).round() as i64
}

/// Minimum value
pub fn min(data: &[f64]) -> Result<f64, StatsError> {
    if data.is_empty() {
        return Err(StatsError::EmptySample { statistic: "min" });
    }
    Ok(data.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Maximum value
pub fn max(data: &[f64]) -> Result<f64, StatsError> {
    if data.is_empty() {
        return Err(StatsError::EmptySample { statistic: "max" });
    }
    Ok(data.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Sample standard deviation (denominator n - 1)
///
/// Uses Welford's online accumulation, which avoids the catastrophic
/// cancellation of the naive sum-of-squares formula.
///
/// # Errors
///
/// `InsufficientSampleSize` for fewer than two samples; a single sample has
/// no spread to estimate and reporting 0 would be misleading.
pub fn std_dev(data: &[f64]) -> Result<f64, StatsError> {
    if data.len() < 2 {
        return Err(StatsError::InsufficientSampleSize {
            statistic: "std_dev",
            required: 2,
            actual: data.len(),
        });
    }

    let mut running_mean = 0.0;
    let mut sum_sq_dev = 0.0;
    for (i, &value) in data.iter().enumerate() {
        let delta = value - running_mean;
        running_mean += delta / (i + 1) as f64;
        sum_sq_dev += delta * (value - running_mean);
    }

    Ok((sum_sq_dev / (data.len() - 1) as f64).sqrt())
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("mean loads are finite"));
    sorted
}

/// Summary statistics over a full sweep's mean-load collection
///
/// Computed once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of trials summarized
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// First, second, and third quartile boundaries
    pub quartiles: [f64; 3],
    /// Every value tied for the highest frequency, ascending
    pub modes: Vec<f64>,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Compute all summary statistics over `values`
    ///
    /// # Errors
    ///
    /// `InsufficientSampleSize` when fewer than two values are supplied;
    /// the standard deviation and quartiles are undefined below that.
    pub fn compute(values: &[f64]) -> Result<Self, StatsError> {
        Ok(Self {
            count: values.len(),
            mean: mean(values)?,
            median: median(values)?,
            quartiles: quartiles(values)?,
            modes: multimode(values)?,
            min: min(values)?,
            max: max(values)?,
            std_dev: std_dev(values)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(5.6666), 5.7);
        assert_eq!(round_to_tenth(3.0), 3.0);
        assert_eq!(round_to_tenth(2.04), 2.0);
        assert_eq!(round_to_tenth(2.05), 2.1);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert_eq!(
            mean(&[]),
            Err(StatsError::EmptySample { statistic: "mean" })
        );
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
        assert_eq!(median(&[5.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_quartiles_inclusive_method() {
        assert_eq!(
            quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap(),
            [1.75, 2.5, 3.25]
        );
        // Odd count: quartile positions land on and between elements
        assert_eq!(
            quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            [2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_quartiles_unsorted_input() {
        assert_eq!(
            quartiles(&[4.0, 1.0, 3.0, 2.0]).unwrap(),
            [1.75, 2.5, 3.25]
        );
    }

    #[test]
    fn test_quartiles_require_two_samples() {
        assert!(matches!(
            quartiles(&[1.0]),
            Err(StatsError::InsufficientSampleSize { actual: 1, .. })
        ));
    }

    #[test]
    fn test_multimode_single_mode() {
        assert_eq!(multimode(&[1.0, 2.0, 2.0, 3.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_multimode_tied_modes_ascending() {
        assert_eq!(
            multimode(&[3.5, 1.5, 3.5, 1.5, 2.0]).unwrap(),
            vec![1.5, 3.5]
        );
    }

    #[test]
    fn test_multimode_all_distinct() {
        // Every value occurs once: all are modes
        assert_eq!(multimode(&[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_min_max() {
        let data = [3.0, 1.0, 4.0, 1.5];
        assert_eq!(min(&data).unwrap(), 1.0);
        assert_eq!(max(&data).unwrap(), 4.0);
    }

    #[test]
    fn test_std_dev_known_value() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&data).unwrap();
        assert!((sd - 2.138089935299395).abs() < 1e-10);
    }

    #[test]
    fn test_std_dev_single_sample_is_error() {
        assert_eq!(
            std_dev(&[4.2]),
            Err(StatsError::InsufficientSampleSize {
                statistic: "std_dev",
                required: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_summary_statistics_compute() {
        let values = [2.0, 2.0, 3.0, 4.0];
        let summary = SummaryStatistics::compute(&values).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.quartiles, [2.0, 2.5, 3.25]);
        assert_eq!(summary.modes, vec![2.0]);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 4.0);
        assert!(summary.std_dev > 0.0);
    }

    #[test]
    fn test_summary_statistics_too_small() {
        assert!(SummaryStatistics::compute(&[1.0]).is_err());
    }
}
