//! CSV ingestion for the NOC region table.

use crate::error::{ReportError, Result, ResultExt};
use crate::types::REQUIRED_COLUMNS;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Rows sampled for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Load the record table from a CSV file with a header row.
///
/// Empty fields are read as nulls. Fails if the file is missing, cannot be
/// parsed, or lacks one of the `NOC`, `region`, `notes` columns.
pub fn load_records(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(ReportError::InputNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());
    let df = csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish()
        .context(format!("Parsing {}", path.display()))?;

    let df = prepare_records(df)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Parse the record table from in-memory CSV text.
pub fn read_records_from_str(content: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(content.to_string());
    let df = csv_options()
        .into_reader_with_file_handle(cursor)
        .finish()
        .context("Parsing CSV content")?;
    prepare_records(df)
}

fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
}

/// Check the required columns and make sure they hold strings.
fn prepare_records(mut df: DataFrame) -> Result<DataFrame> {
    for name in REQUIRED_COLUMNS {
        let column = df
            .column(name)
            .map_err(|_| ReportError::ColumnNotFound(name.to_string()))?;

        // An all-empty column, or one of numeric-looking codes, may not be
        // inferred as String.
        if column.dtype() != &DataType::String {
            debug!("Casting column '{}' from {} to String", name, column.dtype());
            let converted = column.cast(&DataType::String)?.take_materialized_series();
            df.replace(name, converted)?;
        }
    }

    Ok(df)
}
