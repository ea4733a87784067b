//! Report pipeline and its builder.
//!
//! [`ReportPipeline::run`] executes every step in a fixed order on the
//! calling thread: load, prepare output, normalize, summarize, export the
//! cleaned table, rank regions and chart them, export notes, draw the
//! heatmap, and optionally write the JSON run report.

use crate::charts::{ChartRenderer, MissingMatrix};
use crate::cleaner::TextNormalizer;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result, ResultExt};
use crate::frequency::FrequencyTable;
use crate::loader::load_records;
use crate::notes::{notes_export_frame, notes_preview, rows_with_notes};
use crate::output::OutputLayout;
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage,
};
use crate::reporting::console::{format_notes_table, format_summary, format_top_regions};
use crate::reporting::{ReportGenerator, RunReport, RunReportParams};
use crate::types::{Artifact, ArtifactKind, REGION_COLUMN, ReportResult, SummaryStats};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// The NOC region report pipeline.
///
/// Use [`ReportPipeline::builder()`] to create a pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use noc_report::{ReportConfig, ReportPipeline};
///
/// let result = ReportPipeline::builder()
///     .config(ReportConfig::builder().output_dir("out").build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run()?;
///
/// println!("{} NOCs", result.summary.total_nocs);
/// ```
pub struct ReportPipeline {
    config: ReportConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    normalizer: TextNormalizer,
    generator: ReportGenerator,
    charts: ChartRenderer,
}

static_assertions::assert_impl_all!(ReportPipeline: Send);

impl ReportPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> ReportPipelineBuilder {
        ReportPipelineBuilder::default()
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run the report end to end.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::PathConflict`] before anything is written when a
    /// regular file blocks the output directory. Any later failure leaves the
    /// artifacts written so far in place.
    pub fn run(&self) -> Result<ReportResult> {
        match self.run_internal() {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete("Report completed successfully"));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Report error: {}", e);
                Err(e)
            }
        }
    }

    /// Build the machine-readable record of a finished run.
    pub fn run_report(&self, result: &ReportResult) -> RunReport {
        RunReport::new(RunReportParams {
            input_file: &self.config.input_path,
            summary: &result.summary,
            top_n: self.config.top_n,
            top_regions: &result.top_regions,
            notes_rows: result.notes_rows,
            notes_export: self.config.notes_export,
            cleaning_actions: &result.cleaning_actions,
            artifacts: &result.artifacts,
            duration_ms: result.duration_ms,
        })
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn start(&self, stage: ReportStage, message: &str) {
        info!("{}", message);
        self.report_progress(ProgressUpdate::new(stage, 0.0, message));
    }

    fn done(&self, stage: ReportStage, message: &str) {
        self.report_progress(ProgressUpdate::new(stage, 1.0, message));
    }

    fn print(&self, text: &str) {
        if self.config.console_output {
            println!("{}", text);
        }
    }

    fn run_internal(&self) -> Result<ReportResult> {
        let start_time = Instant::now();
        let layout = self.generator.layout();
        let mut artifacts: Vec<Artifact> = Vec::new();

        // Step 1: Load
        self.start(ReportStage::Loading, "Loading NOC records...");
        let df = load_records(&self.config.input_path).context("Loading dataset")?;
        self.done(ReportStage::Loading, "Records loaded");

        // Step 2: Output directories. Nothing has been written before this point.
        self.start(ReportStage::PreparingOutput, "Preparing output directory...");
        layout.prepare()?;
        self.done(ReportStage::PreparingOutput, "Output directory ready");

        // Step 3: Normalize
        self.start(ReportStage::Normalizing, "Normalizing region and notes...");
        let (mut cleaned, cleaning_actions) = self
            .normalizer
            .normalize(df)
            .map_err(|e| ReportError::CleaningFailed(e.to_string()))?;
        self.done(ReportStage::Normalizing, "Normalization complete");

        // Step 4: Summary
        self.start(ReportStage::Summarizing, "Computing summary...");
        let summary = SummaryStats::compute(&cleaned)?;
        self.print(&format_summary(&summary));
        self.done(ReportStage::Summarizing, "Summary computed");

        // Step 5: Cleaned export
        self.start(ReportStage::ExportingCleaned, "Saving cleaned table...");
        let path = self.generator.save_cleaned(&mut cleaned)?;
        artifacts.push(artifact(ArtifactKind::CleanedCsv, path));
        self.done(ReportStage::ExportingCleaned, "Cleaned table saved");

        // Step 6: Ranking and charts
        self.start(ReportStage::RankingRegions, "Ranking regions...");
        let ranking = FrequencyTable::from_column(&cleaned, REGION_COLUMN)?;
        let top = ranking.top(self.config.top_n);
        self.print(&format_top_regions(&top, self.config.top_n));
        self.done(ReportStage::RankingRegions, "Regions ranked");

        if !self.config.render_charts {
            info!("Chart rendering disabled");
        } else if top.is_empty() {
            warn!("No regions to chart, skipping bar and pie charts");
        } else {
            self.render_region_charts(&top, layout, &mut artifacts)?;
        }

        // Step 7: Notes
        self.start(ReportStage::ExportingNotes, "Filtering NOCs with notes...");
        let notes = rows_with_notes(&cleaned)?;
        self.print(&format_notes_table(&notes_preview(&notes)?)?);
        let mut export = notes_export_frame(&notes, self.config.notes_export)?;
        let path = self.generator.save_notes(&mut export)?;
        artifacts.push(artifact(ArtifactKind::NotesCsv, path));
        self.done(ReportStage::ExportingNotes, "Notes saved");

        // Step 8: Heatmap
        if self.config.render_charts {
            self.start(ReportStage::RenderingHeatmap, "Rendering missing values heatmap...");
            let matrix = MissingMatrix::from_frame(&cleaned)?;
            if matrix.rows() == 0 {
                warn!("Table is empty, skipping heatmap");
            } else {
                let path = layout.heatmap();
                self.charts
                    .heatmap(&matrix, &path)
                    .map_err(|e| chart_failed(ArtifactKind::Heatmap, e))?;
                artifacts.push(artifact(ArtifactKind::Heatmap, path));
            }
            self.done(ReportStage::RenderingHeatmap, "Heatmap rendered");
        }

        let mut result = ReportResult {
            summary,
            top_regions: top.region_counts(),
            notes_rows: notes.height(),
            cleaning_actions,
            artifacts,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        // Step 9: JSON run report
        if self.config.emit_report {
            self.start(ReportStage::WritingReport, "Writing run report...");
            let report = self.run_report(&result);
            let path = self.generator.write_report_to_file(&report)?;
            result.artifacts.push(artifact(ArtifactKind::RunReport, path));
            self.done(ReportStage::WritingReport, "Run report written");
        }

        info!(
            "Report finished in {}ms ({} artifacts)",
            result.duration_ms,
            result.artifacts.len()
        );
        Ok(result)
    }

    fn render_region_charts(
        &self,
        top: &FrequencyTable,
        layout: &OutputLayout,
        artifacts: &mut Vec<Artifact>,
    ) -> Result<()> {
        let top_n = self.config.top_n;

        let path = layout.bar_chart();
        self.charts
            .bar_chart(top, top_n, &path)
            .map_err(|e| chart_failed(ArtifactKind::BarChart, e))?;
        artifacts.push(artifact(ArtifactKind::BarChart, path));
        self.report_progress(ProgressUpdate::with_items(
            ReportStage::RenderingCharts,
            1,
            2,
            "Bar chart rendered",
        ));

        let path = layout.pie_chart();
        self.charts
            .pie_chart(top, top_n, &path)
            .map_err(|e| chart_failed(ArtifactKind::PieChart, e))?;
        artifacts.push(artifact(ArtifactKind::PieChart, path));
        self.report_progress(ProgressUpdate::with_items(
            ReportStage::RenderingCharts,
            2,
            2,
            "Pie chart rendered",
        ));

        Ok(())
    }
}

fn artifact(kind: ArtifactKind, path: PathBuf) -> Artifact {
    Artifact { kind, path }
}

fn chart_failed(kind: ArtifactKind, e: anyhow::Error) -> ReportError {
    ReportError::ChartRenderFailed {
        chart: kind.display_name().to_string(),
        reason: e.to_string(),
    }
}

/// Builder for [`ReportPipeline`].
#[derive(Default)]
pub struct ReportPipelineBuilder {
    config: Option<ReportConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(ReportPipelineBuilder: Send);

impl ReportPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during the run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// For anything beyond logging, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<ReportPipeline, crate::config::ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let generator = ReportGenerator::new(OutputLayout::new(config.output_dir.clone()));
        let normalizer = TextNormalizer::new(config.region_fill_value.clone());
        let charts = ChartRenderer::new(config.interactive);

        Ok(ReportPipeline {
            config,
            progress_reporter: self.progress_reporter,
            normalizer,
            generator,
            charts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const SAMPLE: &str = "NOC,region,notes\n\
        USA, united states ,\n\
        GBR,, uk \n\
        GER,germany,\n\
        FRG,germany,west germany\n";

    fn config_for(dir: &TempDir) -> ReportConfig {
        let input = dir.path().join("noc_regions.csv");
        fs::write(&input, SAMPLE).unwrap();
        ReportConfig::builder()
            .input_path(input)
            .output_dir(dir.path().join("output"))
            .render_charts(false)
            .console_output(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = ReportPipeline::builder().build().unwrap();
        assert_eq!(pipeline.config().top_n, 10);
        assert!(pipeline.progress_reporter.is_none());
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let mut config = ReportConfig::default();
        config.top_n = 0;
        assert!(ReportPipeline::builder().config(config).build().is_err());
    }

    #[test]
    fn test_pipeline_builder_with_progress_callback() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let pipeline = ReportPipeline::builder()
            .on_progress(move |_update| {
                call_count_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        pipeline.report_progress(ProgressUpdate::new(ReportStage::Loading, 0.5, "Test"));

        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_run_reports_stages_in_order() {
        let dir = TempDir::new().unwrap();
        let stages = Arc::new(Mutex::new(Vec::new()));
        let stages_clone = stages.clone();

        ReportPipeline::builder()
            .config(config_for(&dir))
            .on_progress(move |update| stages_clone.lock().unwrap().push(update.stage))
            .build()
            .unwrap()
            .run()
            .unwrap();

        let mut seen = stages.lock().unwrap().clone();
        seen.dedup();
        assert_eq!(
            seen,
            vec![
                ReportStage::Loading,
                ReportStage::PreparingOutput,
                ReportStage::Normalizing,
                ReportStage::Summarizing,
                ReportStage::ExportingCleaned,
                ReportStage::RankingRegions,
                ReportStage::ExportingNotes,
                ReportStage::Complete,
            ]
        );
    }

    #[test]
    fn test_run_without_charts() {
        let dir = TempDir::new().unwrap();
        let result = ReportPipeline::builder()
            .config(config_for(&dir))
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(result.summary.total_nocs, 4);
        assert_eq!(result.summary.missing_regions, 0);
        assert_eq!(result.notes_rows, 2);
        assert_eq!(result.top_regions[0].region, "Germany");
        assert_eq!(result.top_regions[0].count, 2);
        assert!(result.artifact(ArtifactKind::BarChart).is_none());
        assert!(result.artifact(ArtifactKind::CleanedCsv).unwrap().is_file());
        assert!(result.artifact(ArtifactKind::NotesCsv).unwrap().is_file());
    }

    #[test]
    fn test_missing_input_reports_failure() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig::builder()
            .input_path(dir.path().join("missing.csv"))
            .output_dir(dir.path().join("output"))
            .build()
            .unwrap();

        let failed = Arc::new(AtomicUsize::new(0));
        let failed_clone = failed.clone();
        let err = ReportPipeline::builder()
            .config(config)
            .on_progress(move |update| {
                if update.stage == ReportStage::Failed {
                    failed_clone.fetch_add(1, Ordering::SeqCst);
                }
            })
            .build()
            .unwrap()
            .run()
            .unwrap_err();

        assert_eq!(err.error_code(), "INPUT_NOT_FOUND");
        assert!(err.to_string().starts_with("Loading dataset: Input file not found"));
        assert_eq!(failed.load(Ordering::SeqCst), 1);
        assert!(!dir.path().join("output").exists());
    }
}
