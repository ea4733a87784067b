//! CLI entry point for the NOC region report.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use noc_report::{
    ArtifactKind, NotesExport, ReportConfig, ReportPipeline, ReportResult, config,
};
use std::process::ExitCode;
use tracing::{error, info};

/// CLI-compatible notes export enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNotesColumns {
    /// Every column of the rows with notes
    Full,
    /// Only NOC, region and notes
    Displayed,
}

impl From<CliNotesColumns> for NotesExport {
    fn from(cli: CliNotesColumns) -> Self {
        match cli {
            CliNotesColumns::Full => NotesExport::FullRow,
            CliNotesColumns::Displayed => NotesExport::DisplayedColumns,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "NOC region dataset report",
    long_about = "Cleans the NOC/region table, prints summary counts, and writes \
                  cleaned CSVs and charts.\n\n\
                  EXAMPLES:\n  \
                  # Default paths (data/noc_regions.csv -> output/)\n  \
                  noc-report\n\n  \
                  # CSV exports only, machine-readable result\n  \
                  noc-report --no-charts --json\n\n  \
                  # Open each chart after it is saved\n  \
                  noc-report --show"
)]
struct Args {
    /// Path to the NOC regions CSV
    #[arg(short, long, default_value = config::DEFAULT_INPUT_PATH)]
    input: String,

    /// Output directory for results
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output: String,

    /// Number of regions in the ranking and charts
    #[arg(long, default_value_t = config::DEFAULT_TOP_N)]
    top_n: usize,

    /// Columns written to the notes export
    #[arg(long, value_enum, default_value = "full")]
    notes_columns: CliNotesColumns,

    /// Open each chart in the system image viewer after saving
    #[arg(long)]
    show: bool,

    /// Skip chart rendering (CSV exports only)
    #[arg(long)]
    no_charts: bool,

    /// Write a JSON run report to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Output JSON to stdout instead of human-readable text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = ReportConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output)
        .top_n(args.top_n)
        .notes_export(args.notes_columns.into())
        .render_charts(!args.no_charts)
        .interactive(args.show)
        .console_output(!args.json)
        .emit_report(args.emit_report)
        .build()?;

    let pipeline = ReportPipeline::builder()
        .config(config)
        .on_progress(|update| {
            info!(
                "[{:>3.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        })
        .build()?;

    let result = match pipeline.run() {
        Ok(result) => result,
        Err(e) if e.is_path_conflict() => {
            println!("{}", e);
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            error!("Report failed: {}", e);
            return Err(e.into());
        }
    };

    if args.json {
        let report = pipeline.run_report(&result);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    print_artifacts(&result);
    Ok(ExitCode::SUCCESS)
}

fn print_artifacts(result: &ReportResult) {
    println!();
    println!("{}", "=".repeat(60));
    println!("REPORT COMPLETE ({} ms)", result.duration_ms);
    println!("{}", "=".repeat(60));

    for artifact in &result.artifacts {
        println!(
            "  {:<24} {}",
            artifact.kind.display_name(),
            artifact.path.display()
        );
    }

    if result.artifact(ArtifactKind::BarChart).is_none() {
        println!("  (charts not rendered)");
    }
}
