use crate::config::NotesExport;
use crate::error::{ReportError, Result};
use crate::output::OutputLayout;
use crate::types::{Artifact, RegionCount, SummaryStats};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Run Report
// ============================================================================

/// Machine-readable record of one report run.
///
/// Printed with `--json` and written to `noc_report.json` with `--emit-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// (rows, columns) of the normalized table
    pub shape: (usize, usize),
    pub summary: SummaryStats,
    /// Requested ranking length
    pub top_n: usize,
    pub top_regions: Vec<RegionCount>,
    /// Rows written to the notes export
    pub notes_rows: usize,
    pub notes_export: NotesExport,
    /// Normalization steps that changed something
    pub cleaning_actions: Vec<String>,
    /// Files written before this report
    pub artifacts: Vec<Artifact>,
    pub duration_ms: u64,
}

/// Inputs for [`RunReport::new`].
pub struct RunReportParams<'a> {
    pub input_file: &'a Path,
    pub summary: &'a SummaryStats,
    pub top_n: usize,
    pub top_regions: &'a [RegionCount],
    pub notes_rows: usize,
    pub notes_export: NotesExport,
    pub cleaning_actions: &'a [String],
    pub artifacts: &'a [Artifact],
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new(params: RunReportParams<'_>) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            input_file: params.input_file.display().to_string(),
            shape: (params.summary.total_rows, params.summary.total_columns),
            summary: params.summary.clone(),
            top_n: params.top_n,
            top_regions: params.top_regions.to_vec(),
            notes_rows: params.notes_rows,
            notes_export: params.notes_export,
            cleaning_actions: params.cleaning_actions.to_vec(),
            artifacts: params.artifacts.to_vec(),
            duration_ms: params.duration_ms,
        }
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Writes the tabular and JSON artifacts of a run into an [`OutputLayout`].
///
/// Directories are created by [`OutputLayout::prepare`]; the generator only
/// writes files.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    layout: OutputLayout,
}

impl ReportGenerator {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Save the normalized table.
    pub fn save_cleaned(&self, df: &mut DataFrame) -> Result<PathBuf> {
        let path = self.layout.cleaned_csv();
        write_csv(df, &path)?;
        info!("Cleaned data saved: {}", path.display());
        Ok(path)
    }

    /// Save the rows with notes.
    pub fn save_notes(&self, df: &mut DataFrame) -> Result<PathBuf> {
        let path = self.layout.notes_csv();
        write_csv(df, &path)?;
        info!("NOCs with notes saved: {}", path.display());
        Ok(path)
    }

    pub fn write_report_to_file(&self, report: &RunReport) -> Result<PathBuf> {
        let report_path = self.layout.report_json();
        let json = serde_json::to_string_pretty(report)?;

        let mut file = File::create(&report_path).map_err(|e| export_failed(&report_path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| export_failed(&report_path, e))?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}

/// Header row, comma separator, double-quote quoting, no index column.
/// Nulls are written as empty fields.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| export_failed(path, e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .map_err(|e| export_failed(path, e))?;

    Ok(())
}

fn export_failed(path: &Path, reason: impl ToString) -> ReportError {
    ReportError::ExportFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
