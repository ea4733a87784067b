use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Committee code column.
pub const NOC_COLUMN: &str = "NOC";

/// Region name column (nullable in the source).
pub const REGION_COLUMN: &str = "region";

/// Free-text annotation column (nullable).
pub const NOTES_COLUMN: &str = "notes";

/// Columns the report cannot run without.
pub const REQUIRED_COLUMNS: [&str; 3] = [NOC_COLUMN, REGION_COLUMN, NOTES_COLUMN];

/// Aggregate counts printed after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Distinct non-null NOC codes.
    pub total_nocs: usize,
    /// Nulls left in `region`; zero once the fill has run.
    pub missing_regions: usize,
    pub nocs_with_notes: usize,
}

/// One row of the ranked region table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
    /// Share of the ranked total, 0.0 - 100.0.
    pub percentage: f64,
}

/// Kind of file produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    CleanedCsv,
    NotesCsv,
    BarChart,
    PieChart,
    Heatmap,
    RunReport,
}

impl ArtifactKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CleanedCsv => "Cleaned table",
            Self::NotesCsv => "NOCs with notes",
            Self::BarChart => "Top regions bar chart",
            Self::PieChart => "Top regions pie chart",
            Self::Heatmap => "Missing values heatmap",
            Self::RunReport => "Run report",
        }
    }
}

/// A file written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResult {
    pub summary: SummaryStats,
    pub top_regions: Vec<RegionCount>,
    pub notes_rows: usize,
    pub cleaning_actions: Vec<String>,
    pub artifacts: Vec<Artifact>,
    pub duration_ms: u64,
}

impl ReportResult {
    /// Path of the first artifact of the given kind, if it was written.
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&PathBuf> {
        self.artifacts
            .iter()
            .find(|artifact| artifact.kind == kind)
            .map(|artifact| &artifact.path)
    }
}
