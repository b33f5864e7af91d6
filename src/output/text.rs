//! Human-readable report formatting

use crate::config::Config;
use crate::stats::SummaryStatistics;
use crate::sweep::SweepResults;
use std::time::Duration;

/// Number of buckets in the mean-load frequency chart
const CHART_BUCKETS: usize = 16;

/// Maximum bar width of the frequency chart, in characters
const CHART_WIDTH: usize = 50;

/// Print the full sweep report
pub fn print_report(
    results: &SweepResults,
    summary: &SummaryStatistics,
    duration: Duration,
    config: &Config,
) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                    SWEEP RESULTS");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    println!("Elapsed Time: {:.3}s", duration.as_secs_f64());
    println!(
        "Trials: {} ({} bin counts x {} trials)",
        results.records.len(),
        config.sweep.max_bins - config.sweep.min_bins + 1,
        config.sweep.trials_per_bin_count
    );
    println!();

    println!("Mean load per trial:");
    for bin_count in config.sweep.min_bins..=config.sweep.max_bins {
        let loads: Vec<String> = results
            .records
            .iter()
            .filter(|r| r.bin_count == bin_count)
            .map(|r| format!("{:.1}", r.mean_load))
            .collect();
        println!("  {:4} bins: {}", bin_count, loads.join(" "));
    }
    println!();

    if config.output.show_bins {
        println!("Final bin configurations:");
        for record in &results.records {
            println!(
                "  {:4} bins, trial {:3}: {:?} ({} tosses)",
                record.bin_count, record.trial, record.bins, record.tosses
            );
        }
        println!();
    }

    println!("Summary:");
    println!("  Median:    {:.1}", summary.median);
    println!(
        "  Quartiles: {:.1} / {:.1} / {:.1}",
        summary.quartiles[0], summary.quartiles[1], summary.quartiles[2]
    );
    let modes: Vec<String> = summary.modes.iter().map(|m| format!("{:.1}", m)).collect();
    println!("  Modes:     {}", modes.join(", "));
    println!("  Min/Max:   {:.1}/{:.1}", summary.min, summary.max);
    println!("  Mean:      {:.1}", summary.mean);
    println!("  Std Dev:   {:.1}", summary.std_dev);
    println!();

    if let Some(chart) = frequency_chart(&results.mean_loads()) {
        println!("{}", chart);
    }

    println!("═══════════════════════════════════════════════════════════");
}

/// Render a bucketed frequency chart of the mean-load values
///
/// Returns None when the values all coincide (a single-bar chart carries no
/// information).
fn frequency_chart(loads: &[f64]) -> Option<String> {
    let min = loads.iter().copied().fold(f64::INFINITY, f64::min);
    let max = loads.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if loads.is_empty() || max <= min {
        return None;
    }

    let bucket_span = (max - min) / CHART_BUCKETS as f64;
    let mut buckets = vec![0u64; CHART_BUCKETS];
    for &load in loads {
        let idx = (((load - min) / bucket_span) as usize).min(CHART_BUCKETS - 1);
        buckets[idx] += 1;
    }

    let top = *buckets.iter().max().unwrap_or(&1);

    let mut output = String::new();
    output.push_str(&format!(
        "Mean load distribution ({} buckets):\n",
        CHART_BUCKETS
    ));
    for (i, &count) in buckets.iter().enumerate() {
        let lo = min + i as f64 * bucket_span;
        let hi = lo + bucket_span;
        let bar_len = ((count as f64 / top as f64) * CHART_WIDTH as f64) as usize;
        let bar = "█".repeat(bar_len);
        output.push_str(&format!(
            "[{:6.1}-{:6.1}] {:width$} {:4}\n",
            lo,
            hi,
            bar,
            count,
            width = CHART_WIDTH
        ));
    }

    Some(output)
}
