//! CSV output formatting
//!
//! One row per trial, header first. The format targets analysis in pandas,
//! R, and spreadsheets.

use crate::sweep::{SweepResults, TrialRecord};
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// CSV writer for per-trial records
pub struct CsvWriter {
    file: File,
}

impl CsvWriter {
    /// Create the file and write the header row
    pub fn new(path: &Path) -> Result<Self> {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create CSV output: {}", path.display()))?;

        writeln!(file, "bin_count,trial,tosses,mean_load,min_bin,max_bin")?;

        Ok(Self { file })
    }

    /// Append one trial row
    pub fn append_record(&mut self, record: &TrialRecord) -> Result<()> {
        writeln!(
            self.file,
            "{},{},{},{:.1},{},{}",
            record.bin_count,
            record.trial,
            record.tosses,
            record.mean_load,
            record.min_bin,
            record.max_bin
        )?;

        Ok(())
    }

    /// Flush buffered rows to disk
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

/// Write a whole sweep's records to `path`
pub fn write_trials(path: &Path, results: &SweepResults) -> Result<()> {
    let mut writer = CsvWriter::new(path)?;
    for record in &results.records {
        writer.append_record(record)?;
    }
    writer.flush()
}
