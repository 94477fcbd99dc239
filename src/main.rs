use anyhow::Context;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::Path;

mod analyzer;
mod config;
mod ui;

use analyzer::process_trace;
use config::{AnalyzerConfig, CONFIG_FILE_NAME};

/// The chart is only shown when at least one packet was received.
fn should_plot(latencies: &[f64], config: &AnalyzerConfig) -> bool {
    !latencies.is_empty() && config.show_plot
}

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("cran_trace_analyzer"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Starting up");

    let config = AnalyzerConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    let latencies = process_trace(&config.trace_file)
        .with_context(|| format!("Failed to process trace file {}", config.trace_file.display()))?;

    if should_plot(&latencies, &config) {
        ui::plot_latencies(&latencies, &config)?;
    } else {
        info!("Skipping latency chart ({} latencies, show-plot = {})", latencies.len(), config.show_plot);
    }

    Ok(())
}
