// UI module for the trace analyzer
//
// - `chart_layout`: axis ranges, ticks and coordinate mapping
// - `latency_chart`: eframe app painting the latency series

pub mod chart_layout;
pub mod latency_chart;

use anyhow::anyhow;
use eframe::egui;

use crate::config::AnalyzerConfig;
use latency_chart::{CHART_TITLE, LatencyChartApp};

/// Show the latency chart in a native window.
///
/// Blocks until the window is closed. Callers only invoke this with a
/// non-empty series.
pub fn plot_latencies(latencies: &[f64], config: &AnalyzerConfig) -> anyhow::Result<()> {
    log::info!("Opening latency chart for {} packets", latencies.len());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(CHART_TITLE)
            .with_inner_size([config.window_width, config.window_height]),
        ..Default::default()
    };

    let app = LatencyChartApp::new(latencies.to_vec());
    eframe::run_native(CHART_TITLE, native_options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("Failed to show latency chart: {}", e))?;

    log::info!("Latency chart closed");
    Ok(())
}
