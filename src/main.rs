//! BinPulse CLI entry point

use anyhow::{Context, Result};
use binpulse::config::{cli::Cli, cli_convert, Config, OutputConfig, RuntimeConfig, SweepConfig};
use binpulse::output;
use binpulse::sweep::SweepDriver;
use std::time::Instant;

fn main() -> Result<()> {
    println!("BinPulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Monte Carlo load-balance convergence profiler");
    println!();

    // Parse CLI arguments
    let parse_start = Instant::now();
    let cli = Cli::parse_args();
    cli.validate()?;
    if cli.debug {
        eprintln!(
            "DEBUG TIMING: CLI parse: {:.3}s",
            parse_start.elapsed().as_secs_f64()
        );
    }

    // Build configuration (TOML file merged under CLI flags, or CLI alone)
    let config = if let Some(ref path) = cli.config {
        let file_config = binpulse::config::toml::parse_toml_file(path)?;
        binpulse::config::toml::merge_cli_with_config(&cli, file_config)?
    } else {
        build_config_from_cli(&cli)?
    };

    // Validate configuration
    binpulse::config::validator::validate_config(&config)
        .context("Configuration validation failed")?;

    // Display configuration
    print_configuration(&config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    println!("Starting sweep...");
    println!();

    let driver = SweepDriver::new(&config)?;
    println!("Base seed: {}", driver.base_seed());

    let sweep_start = Instant::now();
    let results = driver.run()?;
    let elapsed = sweep_start.elapsed();
    if config.runtime.debug {
        eprintln!("DEBUG TIMING: Sweep: {:.3}s", elapsed.as_secs_f64());
    }

    let summary = results
        .summary()
        .context("Failed to summarize sweep results")?;

    println!();
    output::text::print_report(&results, &summary, elapsed, &config);

    if let Some(ref path) = config.output.json_output {
        output::json::write_report(path, &config, driver.base_seed(), &results, &summary, elapsed)?;
        println!("JSON report written to {}", path.display());
    }

    if let Some(ref path) = config.output.csv_output {
        output::csv::write_trials(path, &results)?;
        println!("CSV output written to {}", path.display());
    }

    Ok(())
}

/// Build configuration from CLI arguments
fn build_config_from_cli(cli: &Cli) -> Result<Config> {
    let (min_bins, max_bins) =
        cli_convert::parse_bin_range(&cli.bins).context("Invalid bin range")?;

    let sweep = SweepConfig {
        min_bins,
        max_bins,
        trials_per_bin_count: cli.trials,
        seed: cli.seed,
        threads: cli.threads,
        max_tosses: cli.max_tosses,
    };

    let output = OutputConfig {
        json_output: cli.json_output.clone(),
        csv_output: cli.csv_output.clone(),
        show_bins: cli.show_bins,
    };

    let runtime = RuntimeConfig {
        dry_run: cli.dry_run,
        debug: cli.debug,
    };

    Ok(Config {
        sweep,
        output,
        runtime,
    })
}

/// Print configuration summary
fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Sweep:");
    println!(
        "    Bins: {}-{} (inclusive)",
        config.sweep.min_bins, config.sweep.max_bins
    );
    println!(
        "    Trials per bin count: {}",
        config.sweep.trials_per_bin_count
    );
    match config.sweep.seed {
        Some(seed) => println!("    Seed: {}", seed),
        None => println!("    Seed: from OS entropy"),
    }
    println!("    Threads: {}", config.sweep.threads);
    println!("  Output:");
    if let Some(ref path) = config.output.json_output {
        println!("    JSON: {}", path.display());
    }
    if let Some(ref path) = config.output.csv_output {
        println!("    CSV: {}", path.display());
    }
    if config.output.show_bins {
        println!("    Show bin configurations: yes");
    }
}
