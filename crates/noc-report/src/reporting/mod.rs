//! Report output: CSV exports, the JSON run report and console text.
//!
//! # Example
//!
//! ```rust,ignore
//! use noc_report::output::OutputLayout;
//! use noc_report::reporting::ReportGenerator;
//!
//! let generator = ReportGenerator::new(OutputLayout::new("output"));
//! generator.save_cleaned(&mut cleaned)?;
//! ```

pub mod console;
mod generator;

pub use generator::{ReportGenerator, RunReport, RunReportParams, write_csv};
