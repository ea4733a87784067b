//! Configuration types for the report pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The defaults reproduce the standard run: read `data/noc_regions.csv`,
//! write everything under `output/`, rank the top 10 regions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input CSV.
pub const DEFAULT_INPUT_PATH: &str = "data/noc_regions.csv";

/// Default output root.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default number of regions to rank and chart.
pub const DEFAULT_TOP_N: usize = 10;

/// Default replacement for missing regions.
pub const DEFAULT_REGION_FILL: &str = "Unknown";

/// Which columns go into the notes export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotesExport {
    /// Every column of the filtered rows
    #[default]
    FullRow,
    /// Only `NOC`, `region` and `notes`, matching the console preview
    DisplayedColumns,
}

/// Configuration for the report pipeline.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use noc_report::config::{ReportConfig, NotesExport};
///
/// let config = ReportConfig::builder()
///     .input_path("data/noc_regions.csv")
///     .output_dir("output")
///     .top_n(10)
///     .notes_export(NotesExport::FullRow)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// CSV file to read.
    /// Default: "data/noc_regions.csv"
    pub input_path: PathBuf,

    /// Root directory for all outputs. Charts go into `<output_dir>/plots`.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Number of regions in the frequency ranking and charts.
    /// Default: 10
    pub top_n: usize,

    /// Value written into null `region` cells after normalization.
    /// Default: "Unknown"
    pub region_fill_value: String,

    /// Column selection for `noc_with_notes.csv`.
    /// Default: FullRow
    pub notes_export: NotesExport,

    /// Whether to render the bar, pie and heatmap charts.
    /// Default: true
    pub render_charts: bool,

    /// Whether to open each saved chart in the platform image viewer.
    /// Default: false
    pub interactive: bool,

    /// Whether to print the summary and tables to stdout.
    /// Default: true
    pub console_output: bool,

    /// Whether to write `noc_report.json` next to the CSV exports.
    /// Default: false
    pub emit_report: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_N,
            region_fill_value: DEFAULT_REGION_FILL.to_string(),
            notes_export: NotesExport::default(),
            render_charts: true,
            interactive: false,
            console_output: true,
            emit_report: false,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if self.region_fill_value.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFillValue);
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_dir".to_string()));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top_n: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Region fill value must not be blank")]
    EmptyFillValue,

    #[error("Path '{0}' must not be empty")]
    EmptyPath(String),
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    top_n: Option<usize>,
    region_fill_value: Option<String>,
    notes_export: Option<NotesExport>,
    render_charts: Option<bool>,
    interactive: Option<bool>,
    console_output: Option<bool>,
    emit_report: Option<bool>,
}

impl ReportConfigBuilder {
    /// Set the CSV file to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the output root directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set how many regions are ranked and charted.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the value used for missing regions.
    pub fn region_fill_value(mut self, value: impl Into<String>) -> Self {
        self.region_fill_value = Some(value.into());
        self
    }

    /// Choose the notes export column set.
    pub fn notes_export(mut self, export: NotesExport) -> Self {
        self.notes_export = Some(export);
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Enable or disable opening charts in a viewer after saving.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = Some(interactive);
        self
    }

    /// Enable or disable console tables.
    pub fn console_output(mut self, enabled: bool) -> Self {
        self.console_output = Some(enabled);
        self
    }

    /// Enable or disable the JSON run report file.
    pub fn emit_report(mut self, emit: bool) -> Self {
        self.emit_report = Some(emit);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let config = ReportConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            output_dir: self
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            region_fill_value: self
                .region_fill_value
                .unwrap_or_else(|| DEFAULT_REGION_FILL.to_string()),
            notes_export: self.notes_export.unwrap_or_default(),
            render_charts: self.render_charts.unwrap_or(true),
            interactive: self.interactive.unwrap_or(false),
            console_output: self.console_output.unwrap_or(true),
            emit_report: self.emit_report.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data/noc_regions.csv"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.region_fill_value, "Unknown");
        assert_eq!(config.notes_export, NotesExport::FullRow);
        assert!(config.render_charts);
        assert!(!config.interactive);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = ReportConfig::builder().build().unwrap();
        let default = ReportConfig::default();
        assert_eq!(config.top_n, default.top_n);
        assert_eq!(config.output_dir, default.output_dir);
        assert_eq!(config.console_output, default.console_output);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReportConfig::builder()
            .input_path("fixtures/noc.csv")
            .output_dir("out")
            .top_n(3)
            .region_fill_value("N/A")
            .notes_export(NotesExport::DisplayedColumns)
            .render_charts(false)
            .interactive(true)
            .console_output(false)
            .emit_report(true)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("fixtures/noc.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.region_fill_value, "N/A");
        assert_eq!(config.notes_export, NotesExport::DisplayedColumns);
        assert!(!config.render_charts);
        assert!(config.interactive);
        assert!(!config.console_output);
        assert!(config.emit_report);
    }

    #[test]
    fn test_validation_zero_top_n() {
        let result = ReportConfig::builder().top_n(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidTopN(0)
        ));
    }

    #[test]
    fn test_validation_blank_fill_value() {
        let result = ReportConfig::builder().region_fill_value("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyFillValue
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "input_path": "in.csv",
            "output_dir": "custom_output",
            "top_n": 5,
            "region_fill_value": "Unknown",
            "notes_export": "displayed_columns",
            "render_charts": false,
            "interactive": false,
            "console_output": true,
            "emit_report": true
        }"#;

        let config: ReportConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.notes_export, NotesExport::DisplayedColumns);
        assert_eq!(config.output_dir.to_str().unwrap(), "custom_output");
        assert!(config.emit_report);
    }
}
