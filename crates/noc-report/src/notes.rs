//! Rows that carry a historical or alternative-name note.

use crate::config::NotesExport;
use crate::error::Result;
use crate::types::{NOC_COLUMN, NOTES_COLUMN, REGION_COLUMN};
use crate::utils::column_series;
use polars::prelude::*;

/// Columns shown in the console preview.
pub const PREVIEW_COLUMNS: [&str; 3] = [NOC_COLUMN, REGION_COLUMN, NOTES_COLUMN];

/// Keep only the rows whose `notes` is non-null, in table order.
pub fn rows_with_notes(df: &DataFrame) -> Result<DataFrame> {
    let mask = column_series(df, NOTES_COLUMN)?.is_not_null();
    Ok(df.filter(&mask)?)
}

/// The `NOC`, `region`, `notes` view of a table.
pub fn notes_preview(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.select(PREVIEW_COLUMNS)?)
}

/// The frame written to the notes export for the chosen column set.
pub fn notes_export_frame(notes: &DataFrame, export: NotesExport) -> Result<DataFrame> {
    match export {
        NotesExport::FullRow => Ok(notes.clone()),
        NotesExport::DisplayedColumns => notes_preview(notes),
    }
}
