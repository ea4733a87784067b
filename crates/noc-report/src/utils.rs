//! Shared utilities for the report pipeline.
//!
//! Small column helpers used by the cleaner, the summary and the charts.

use crate::error::{ReportError, Result};
use polars::prelude::*;

// =============================================================================
// Column Access
// =============================================================================

/// Borrow a column as a series, mapping a missing column to `ColumnNotFound`.
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|col| col.as_materialized_series())
        .map_err(|_| ReportError::ColumnNotFound(name.to_string()))
}

/// Borrow a string column.
pub fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    Ok(column_series(df, name)?.str()?)
}

/// Owned column names, in table order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a string Series with a specific value.
///
/// Returns the filled series and how many nulls were replaced.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<(Series, usize)> {
    let str_series = series.str()?;
    let mut filled = 0;
    let values: Vec<String> = str_series
        .into_iter()
        .map(|opt_val| match opt_val {
            Some(val) => val.to_string(),
            None => {
                filled += 1;
                fill_value.to_string()
            }
        })
        .collect();

    Ok((Series::new(series.name().clone(), values), filled))
}

/// Count non-null values in a column.
pub fn non_null_count(series: &Series) -> usize {
    series.len() - series.null_count()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_string_nulls() {
        let series = Series::new("region".into(), &[Some("France"), None, Some("Chad"), None]);
        let (filled, count) = fill_string_nulls(&series, "Unknown").unwrap();

        assert_eq!(count, 2);
        assert_eq!(filled.null_count(), 0);
        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();
        assert_eq!(
            values,
            vec![Some("France"), Some("Unknown"), Some("Chad"), Some("Unknown")]
        );
    }

    #[test]
    fn test_column_series_missing() {
        let df = df!("NOC" => ["USA"]).unwrap();
        let err = column_series(&df, "region").unwrap_err();
        assert!(matches!(err, ReportError::ColumnNotFound(name) if name == "region"));
    }

    #[test]
    fn test_non_null_count() {
        let series = Series::new("notes".into(), &[None, Some("Uk"), None]);
        assert_eq!(non_null_count(&series), 1);
    }

    #[test]
    fn test_column_names_order() {
        let df = df!("NOC" => ["A"], "region" => ["B"], "notes" => ["C"]).unwrap();
        assert_eq!(column_names(&df), vec!["NOC", "region", "notes"]);
    }
}
