//! Progress reporting for the report pipeline.
//!
//! The pipeline runs straight through on the calling thread; reporters only
//! observe it. The CLI uses this to log one line per stage.
//!
//! # Example
//!
//! ```rust,ignore
//! use noc_report::ReportPipeline;
//!
//! let result = ReportPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the report pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    /// Reading the input CSV
    Loading,
    /// Creating (or checking) the output directories
    PreparingOutput,
    /// Trimming and title-casing text columns
    Normalizing,
    /// Computing summary counts
    Summarizing,
    /// Writing the cleaned table
    ExportingCleaned,
    /// Building the region frequency ranking
    RankingRegions,
    /// Drawing the bar and pie charts
    RenderingCharts,
    /// Filtering and writing rows with notes
    ExportingNotes,
    /// Drawing the missing-value heatmap
    RenderingHeatmap,
    /// Writing the JSON run report
    WritingReport,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl ReportStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::PreparingOutput => "Preparing Output",
            Self::Normalizing => "Normalizing Text",
            Self::Summarizing => "Summarizing",
            Self::ExportingCleaned => "Exporting Cleaned Table",
            Self::RankingRegions => "Ranking Regions",
            Self::RenderingCharts => "Rendering Charts",
            Self::ExportingNotes => "Exporting Notes",
            Self::RenderingHeatmap => "Rendering Heatmap",
            Self::WritingReport => "Writing Report",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the typical weight of this stage in the overall run (0.0 - 1.0).
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.10,
            Self::PreparingOutput => 0.02,
            Self::Normalizing => 0.10,
            Self::Summarizing => 0.03,
            Self::ExportingCleaned => 0.08,
            Self::RankingRegions => 0.05,
            Self::RenderingCharts => 0.30,
            Self::ExportingNotes => 0.07,
            Self::RenderingHeatmap => 0.20,
            Self::WritingReport => 0.05,
            Self::Complete => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::PreparingOutput => 0.10,
            Self::Normalizing => 0.12,
            Self::Summarizing => 0.22,
            Self::ExportingCleaned => 0.25,
            Self::RankingRegions => 0.33,
            Self::RenderingCharts => 0.38,
            Self::ExportingNotes => 0.68,
            Self::RenderingHeatmap => 0.75,
            Self::WritingReport => 0.95,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// Progress update emitted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: ReportStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Progress within current stage (0.0 - 1.0)
    pub stage_progress: f32,

    /// Human-readable message describing current activity
    pub message: String,

    /// Number of items done in the current stage (charts drawn, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<usize>,

    /// Total items in the current stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_total: Option<usize>,
}

impl ProgressUpdate {
    /// Creates a new progress update for a stage.
    pub fn new(stage: ReportStage, stage_progress: f32, message: impl Into<String>) -> Self {
        let progress = stage.base_progress() + (stage.weight() * stage_progress);
        Self {
            stage,
            progress: progress.clamp(0.0, 1.0),
            stage_progress: stage_progress.clamp(0.0, 1.0),
            message: message.into(),
            items_processed: None,
            items_total: None,
        }
    }

    /// Creates a new progress update with item counts.
    pub fn with_items(
        stage: ReportStage,
        current: usize,
        total: usize,
        message: impl Into<String>,
    ) -> Self {
        let stage_progress = if total > 0 {
            current as f32 / total as f32
        } else {
            0.0
        };
        Self {
            items_processed: Some(current),
            items_total: Some(total),
            ..Self::new(stage, stage_progress, message)
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Complete, 1.0, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Failed, 0.0, message)
    }
}

/// Trait for receiving progress updates from the pipeline.
///
/// Implementations must be `Send + Sync` so a pipeline carrying one can be
/// moved to a worker thread.
pub trait ProgressReporter: Send + Sync {
    /// Called at the start and end of each stage.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WORK_STAGES: [ReportStage; 10] = [
        ReportStage::Loading,
        ReportStage::PreparingOutput,
        ReportStage::Normalizing,
        ReportStage::Summarizing,
        ReportStage::ExportingCleaned,
        ReportStage::RankingRegions,
        ReportStage::RenderingCharts,
        ReportStage::ExportingNotes,
        ReportStage::RenderingHeatmap,
        ReportStage::WritingReport,
    ];

    #[test]
    fn test_progress_update_new() {
        let update = ProgressUpdate::new(ReportStage::Normalizing, 0.5, "Normalizing...");
        assert_eq!(update.stage, ReportStage::Normalizing);
        assert_eq!(update.stage_progress, 0.5);
        assert!((update.progress - 0.17).abs() < 1e-6);
        assert_eq!(update.message, "Normalizing...");
    }

    #[test]
    fn test_progress_update_with_items() {
        let update = ProgressUpdate::with_items(ReportStage::RenderingCharts, 1, 2, "Bar chart");
        assert_eq!(update.stage_progress, 0.5);
        assert_eq!(update.items_processed, Some(1));
        assert_eq!(update.items_total, Some(2));
    }

    #[test]
    fn test_progress_update_complete() {
        let update = ProgressUpdate::complete("Done!");
        assert_eq!(update.stage, ReportStage::Complete);
        assert_eq!(update.progress, 1.0);
    }

    #[test]
    fn test_closure_progress_reporter() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let reporter = ClosureProgressReporter::new(move |_update| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        reporter.report(ProgressUpdate::new(ReportStage::Loading, 0.0, "Test"));
        reporter.report(ProgressUpdate::complete("Done"));

        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stage_weights_sum() {
        let total_weight: f32 = WORK_STAGES.iter().map(|s| s.weight()).sum();
        assert!((total_weight - 1.0).abs() < 0.01, "Weights should sum to ~1.0");
    }

    #[test]
    fn test_base_progress_is_cumulative() {
        let mut expected = 0.0_f32;
        for stage in WORK_STAGES {
            assert!(
                (stage.base_progress() - expected).abs() < 1e-4,
                "{:?} starts at {} but previous stages add up to {}",
                stage,
                stage.base_progress(),
                expected
            );
            expected += stage.weight();
        }
    }

    #[test]
    fn test_stage_json_values() {
        let json = serde_json::to_string(&ReportStage::RenderingHeatmap).unwrap();
        assert_eq!(json, "\"rendering_heatmap\"");
        let json = serde_json::to_string(&ReportStage::ExportingCleaned).unwrap();
        assert_eq!(json, "\"exporting_cleaned\"");
    }
}
