//! JSON report formatting
//!
//! A versioned document with the effective sweep parameters (including the
//! resolved base seed, so entropy-seeded runs stay reproducible), every
//! trial record, and the summary block.

use crate::config::Config;
use crate::stats::SummaryStatistics;
use crate::sweep::SweepResults;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

/// JSON document format version
const REPORT_VERSION: u32 = 1;

/// Top-level JSON report document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: u32,
    /// RFC 3339 timestamp of report generation
    pub timestamp: String,
    pub elapsed_sec: f64,
    pub parameters: JsonParameters,
    pub trials: Vec<JsonTrial>,
    pub summary: SummaryStatistics,
}

/// Effective sweep parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonParameters {
    pub min_bins: usize,
    pub max_bins: usize,
    pub trials_per_bin_count: usize,
    /// The resolved base seed (never null; an entropy seed is reported here)
    pub seed: u64,
    pub threads: usize,
}

/// One trial row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTrial {
    pub bin_count: usize,
    pub trial: usize,
    pub tosses: u64,
    pub mean_load: f64,
    pub min_bin: u64,
    pub max_bin: u64,
}

/// Assemble the report document
pub fn build_report(
    config: &Config,
    base_seed: u64,
    results: &SweepResults,
    summary: &SummaryStatistics,
    duration: Duration,
) -> JsonReport {
    JsonReport {
        version: REPORT_VERSION,
        timestamp: chrono::Utc::now().to_rfc3339(),
        elapsed_sec: duration.as_secs_f64(),
        parameters: JsonParameters {
            min_bins: config.sweep.min_bins,
            max_bins: config.sweep.max_bins,
            trials_per_bin_count: config.sweep.trials_per_bin_count,
            seed: base_seed,
            threads: config.sweep.threads,
        },
        trials: results
            .records
            .iter()
            .map(|r| JsonTrial {
                bin_count: r.bin_count,
                trial: r.trial,
                tosses: r.tosses,
                mean_load: r.mean_load,
                min_bin: r.min_bin,
                max_bin: r.max_bin,
            })
            .collect(),
        summary: summary.clone(),
    }
}

/// Write the report document to a file
pub fn write_report(
    path: &Path,
    config: &Config,
    base_seed: u64,
    results: &SweepResults,
    summary: &SummaryStatistics,
    duration: Duration,
) -> Result<()> {
    let report = build_report(config, base_seed, results, summary, duration);

    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON report: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .context("Failed to serialize JSON report")?;

    Ok(())
}
