//! NOC Region Report Library
//!
//! Cleans the National Olympic Committee region table and produces a small
//! descriptive report from it, built with Rust, Polars and Plotters.
//!
//! # Overview
//!
//! A run performs these steps in order:
//!
//! - **Loading**: Read the NOC/region/notes CSV into a `DataFrame`
//! - **Output Preparation**: Create the output directories, refusing to run
//!   when a regular file blocks the path
//! - **Normalization**: Trim and title-case `region` and `notes`, fill
//!   missing regions with `"Unknown"`
//! - **Summary**: Print distinct NOCs, missing regions and noted rows
//! - **Exports**: Write the cleaned table and the rows with notes as CSV
//! - **Charts**: Top-N regions as bar and pie charts, plus a missing-value
//!   heatmap
//! - **Run Report**: Optional JSON record of the run
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use noc_report::{ReportConfig, ReportPipeline};
//!
//! let config = ReportConfig::builder()
//!     .input_path("data/noc_regions.csv")
//!     .output_dir("output")
//!     .build()?;
//!
//! let result = ReportPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! for region in &result.top_regions {
//!     println!("{}: {} ({:.1}%)", region.region, region.count, region.percentage);
//! }
//! ```
//!
//! # Modules
//!
//! - [`loader`]: CSV ingestion
//! - [`output`]: Output directory layout and conflict checks
//! - [`cleaner`]: Text normalization
//! - [`frequency`]: Region ranking
//! - [`notes`]: Rows with notes
//! - [`charts`]: Bar, pie and heatmap rendering
//! - [`reporting`]: CSV/JSON exports and console text
//! - [`pipeline`]: Orchestration and progress reporting

pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod frequency;
pub mod loader;
pub mod notes;
pub mod output;
pub mod pipeline;
pub mod reporting;
pub mod summary;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use cleaner::TextNormalizer;
pub use config::{ConfigValidationError, NotesExport, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, ResultExt};
pub use frequency::FrequencyTable;
pub use output::OutputLayout;
pub use pipeline::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportPipeline,
    ReportPipelineBuilder, ReportStage,
};
pub use reporting::{ReportGenerator, RunReport};
pub use types::{Artifact, ArtifactKind, RegionCount, ReportResult, SummaryStats};
