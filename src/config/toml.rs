//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
///
/// A CLI flag overrides the file value only when it differs from the clap
/// default, so a bare `--config file.toml` invocation runs the file as
/// written.
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if cli.bins != "2-10" {
        let (min_bins, max_bins) = cli_convert::parse_bin_range(&cli.bins)?;
        config.sweep.min_bins = min_bins;
        config.sweep.max_bins = max_bins;
    }

    if cli.trials != 10 {
        config.sweep.trials_per_bin_count = cli.trials;
    }

    if cli.seed.is_some() {
        config.sweep.seed = cli.seed;
    }

    if cli.threads != 1 {
        config.sweep.threads = cli.threads;
    }

    if cli.max_tosses != crate::sim::DEFAULT_MAX_TOSSES {
        config.sweep.max_tosses = cli.max_tosses;
    }

    if cli.json_output.is_some() {
        config.output.json_output = cli.json_output.clone();
    }
    if cli.csv_output.is_some() {
        config.output.csv_output = cli.csv_output.clone();
    }
    if cli.show_bins {
        config.output.show_bins = true;
    }

    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const MINIMAL: &str = r#"
        [sweep]
        min_bins = 4
        max_bins = 8
    "#;

    #[test]
    fn test_parse_minimal_config() {
        let config = parse_toml_string(MINIMAL).unwrap();
        assert_eq!(config.sweep.min_bins, 4);
        assert_eq!(config.sweep.max_bins, 8);
        // Defaults fill the rest
        assert_eq!(config.sweep.trials_per_bin_count, 10);
        assert_eq!(config.sweep.threads, 1);
        assert_eq!(config.sweep.seed, None);
        assert!(config.output.json_output.is_none());
        assert!(!config.runtime.dry_run);
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse_toml_string(
            r#"
            [sweep]
            min_bins = 2
            max_bins = 10
            trials_per_bin_count = 25
            seed = 99
            threads = 4

            [output]
            csv_output = "trials.csv"
            show_bins = true

            [runtime]
            debug = true
        "#,
        )
        .unwrap();
        assert_eq!(config.sweep.trials_per_bin_count, 25);
        assert_eq!(config.sweep.seed, Some(99));
        assert_eq!(config.sweep.threads, 4);
        assert!(config.output.show_bins);
        assert!(config.runtime.debug);
    }

    #[test]
    fn test_parse_rejects_missing_sweep() {
        assert!(parse_toml_string("[output]\nshow_bins = true").is_err());
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let config = parse_toml_string(MINIMAL).unwrap();
        let cli = Cli::try_parse_from(["binpulse", "--bins", "3-5", "--trials", "2", "--seed", "7"])
            .unwrap();

        let merged = merge_cli_with_config(&cli, config).unwrap();
        assert_eq!(merged.sweep.min_bins, 3);
        assert_eq!(merged.sweep.max_bins, 5);
        assert_eq!(merged.sweep.trials_per_bin_count, 2);
        assert_eq!(merged.sweep.seed, Some(7));
    }

    #[test]
    fn test_merge_defaults_leave_file_values() {
        let config = parse_toml_string(
            r#"
            [sweep]
            min_bins = 4
            max_bins = 8
            trials_per_bin_count = 50
            seed = 11
        "#,
        )
        .unwrap();
        let cli = Cli::try_parse_from(["binpulse"]).unwrap();

        let merged = merge_cli_with_config(&cli, config).unwrap();
        assert_eq!(merged.sweep.min_bins, 4);
        assert_eq!(merged.sweep.max_bins, 8);
        assert_eq!(merged.sweep.trials_per_bin_count, 50);
        assert_eq!(merged.sweep.seed, Some(11));
    }
}
