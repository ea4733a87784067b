//! Output directory layout and preparation.
//!
//! Every artifact of a run lives under one root. [`OutputLayout::prepare`]
//! is the only place that creates directories, and it refuses to run when a
//! regular file sits where a directory is needed.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CLEANED_CSV_FILE: &str = "cleaned_noc_regions.csv";
pub const NOTES_CSV_FILE: &str = "noc_with_notes.csv";
pub const REPORT_JSON_FILE: &str = "noc_report.json";
pub const PLOTS_DIR: &str = "plots";
pub const BAR_CHART_FILE: &str = "top_10_regions.png";
pub const PIE_CHART_FILE: &str = "region_pie_chart.png";
pub const HEATMAP_FILE: &str = "missing_values_heatmap.png";

/// Paths of every file a run may write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.root.join(PLOTS_DIR)
    }

    pub fn cleaned_csv(&self) -> PathBuf {
        self.root.join(CLEANED_CSV_FILE)
    }

    pub fn notes_csv(&self) -> PathBuf {
        self.root.join(NOTES_CSV_FILE)
    }

    pub fn report_json(&self) -> PathBuf {
        self.root.join(REPORT_JSON_FILE)
    }

    pub fn bar_chart(&self) -> PathBuf {
        self.plots_dir().join(BAR_CHART_FILE)
    }

    pub fn pie_chart(&self) -> PathBuf {
        self.plots_dir().join(PIE_CHART_FILE)
    }

    pub fn heatmap(&self) -> PathBuf {
        self.plots_dir().join(HEATMAP_FILE)
    }

    /// Make sure the root and plots directories exist.
    ///
    /// All paths are checked before anything is created, so a conflict
    /// leaves the filesystem untouched.
    pub fn prepare(&self) -> Result<()> {
        let plots_dir = self.plots_dir();
        ensure_no_file_conflict(&plots_dir)?;

        if plots_dir.is_dir() {
            debug!("Output directory already present: {}", plots_dir.display());
            return Ok(());
        }

        fs::create_dir_all(&plots_dir)?;
        info!("Created output directory: {}", plots_dir.display());
        Ok(())
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_OUTPUT_DIR)
    }
}

/// Fail if `dir` or any of its ancestors exists but is not a directory.
pub fn ensure_no_file_conflict(dir: &Path) -> Result<()> {
    // Walk from the outermost ancestor inward so the first blocker is reported.
    let ancestors: Vec<&Path> = dir
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .collect();

    for path in ancestors.into_iter().rev() {
        if path.exists() && !path.is_dir() {
            return Err(ReportError::PathConflict(path.to_path_buf()));
        }
    }

    Ok(())
}
