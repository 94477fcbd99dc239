//! Optional configuration loaded from `trace-analyzer.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "trace-analyzer.toml";

/// Trace file analyzed when no configuration overrides it.
pub const DEFAULT_TRACE_FILE: &str = "c-ran-simulation.tr";

/// Analyzer settings. Every key is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalyzerConfig {
    /// Trace file to analyze, relative to the working directory.
    pub trace_file: PathBuf,
    /// Open the latency chart after printing the summary.
    pub show_plot: bool,
    /// Initial chart window size in logical pixels.
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::from(DEFAULT_TRACE_FILE),
            show_plot: true,
            window_width: 900.0,
            window_height: 600.0,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(AnalyzerConfig)` if the file was successfully loaded and parsed
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::parse(&content)
    }

    /// Load the configuration file if it exists, defaults otherwise.
    ///
    /// An unreadable or malformed file is logged and replaced by the defaults,
    /// so it never stops the trace from being analyzed.
    pub fn load_or_default(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }

        log::info!("Loading configuration from {}", config_path.display());
        match Self::load(config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, config_path.display());
                Self::default()
            }
        }
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AnalyzerConfig::parse("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.trace_file, PathBuf::from("c-ran-simulation.tr"));
        assert!(config.show_plot);
    }

    #[test]
    fn kebab_case_keys_override_defaults() {
        let config = AnalyzerConfig::parse("trace-file = \"out/run1.tr\"\nshow-plot = false\nwindow-width = 1200.0\n").unwrap();
        assert_eq!(config.trace_file, PathBuf::from("out/run1.tr"));
        assert!(!config.show_plot);
        assert_eq!(config.window_width, 1200.0);
        assert_eq!(config.window_height, 600.0);
    }

    #[test]
    fn invalid_config_is_error() {
        let err = AnalyzerConfig::parse("show-plot = \"maybe\"").unwrap_err();
        assert!(err.starts_with("Failed to parse config file"));
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let path = std::env::temp_dir().join("cran-trace-analyzer-no-such-config.toml");
        assert_eq!(AnalyzerConfig::load_or_default(&path), AnalyzerConfig::default());
    }

    #[test]
    fn malformed_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("cran-trace-analyzer-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "trace-file = [unterminated\n").unwrap();
        let config = AnalyzerConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn valid_config_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("cran-trace-analyzer-good-{}.toml", std::process::id()));
        std::fs::write(&path, "show-plot = false\n").unwrap();
        let config = AnalyzerConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        assert!(!config.show_plot);
        assert_eq!(config.trace_file, PathBuf::from(DEFAULT_TRACE_FILE));
    }
}
