//! Aggregate counts over the normalized table.

use crate::error::Result;
use crate::types::{NOC_COLUMN, NOTES_COLUMN, REGION_COLUMN, SummaryStats};
use crate::utils::{column_series, non_null_count};
use polars::prelude::*;
use tracing::{debug, warn};

impl SummaryStats {
    /// Compute the summary counts for a table.
    ///
    /// `missing_regions` is reported as-is; a non-zero value after
    /// normalization is logged but does not fail the run.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let nocs = column_series(df, NOC_COLUMN)?;
        let total_nocs = nocs.drop_nulls().n_unique()?;
        let missing_regions = column_series(df, REGION_COLUMN)?.null_count();
        let nocs_with_notes = non_null_count(column_series(df, NOTES_COLUMN)?);

        if missing_regions > 0 {
            warn!("{} regions still missing after normalization", missing_regions);
        }

        let stats = Self {
            total_rows: df.height(),
            total_columns: df.width(),
            total_nocs,
            missing_regions,
            nocs_with_notes,
        };
        debug!("Summary: {:?}", stats);
        Ok(stats)
    }
}
