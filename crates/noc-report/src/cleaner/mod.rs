//! Text normalization for the record table.
//!
//! This module provides functionality for:
//! - Trimming and title-casing the `region` and `notes` columns
//! - Filling missing regions with a placeholder
//!
//! No rows are added or removed, and other columns are left untouched.

mod sanitizers;

pub use sanitizers::{normalize_text, title_case};

use crate::types::{NOTES_COLUMN, REGION_COLUMN};
use crate::utils::{column_series, fill_string_nulls};
use anyhow::Result;
use polars::prelude::*;
use tracing::{debug, info};

/// Columns that get trimmed and title-cased.
pub const TEXT_COLUMNS: [&str; 2] = [REGION_COLUMN, NOTES_COLUMN];

/// Normalizes the text columns of the record table.
pub struct TextNormalizer {
    region_fill_value: String,
}

impl TextNormalizer {
    pub fn new(region_fill_value: impl Into<String>) -> Self {
        Self {
            region_fill_value: region_fill_value.into(),
        }
    }

    /// Normalize the table and describe what changed.
    ///
    /// 1. Trim and title-case `region` and `notes`
    /// 2. Replace null regions with the fill value
    pub fn normalize(&self, df: DataFrame) -> Result<(DataFrame, Vec<String>)> {
        let mut df = df;
        let mut cleaning_actions = Vec::new();

        info!("Normalizing text columns...");

        for col_name in TEXT_COLUMNS {
            let (cleaned, changed) = sanitizers::normalize_text_series(column_series(&df, col_name)?)?;
            df.replace(col_name, cleaned)?;

            debug!("Normalized {} values in '{}'", changed, col_name);
            cleaning_actions.push(format!(
                "Trimmed and title-cased '{}' ({} values changed)",
                col_name, changed
            ));
        }

        let (filled, fill_count) =
            fill_string_nulls(column_series(&df, REGION_COLUMN)?, &self.region_fill_value)?;
        df.replace(REGION_COLUMN, filled)?;

        if fill_count > 0 {
            debug!("Filled {} missing regions", fill_count);
            cleaning_actions.push(format!(
                "Filled {} missing '{}' values with '{}'",
                fill_count, REGION_COLUMN, self.region_fill_value
            ));
        } else {
            cleaning_actions.push(format!("No missing '{}' values found", REGION_COLUMN));
        }

        Ok((df, cleaning_actions))
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REGION_FILL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NOC_COLUMN;
    use pretty_assertions::assert_eq;

    fn sample() -> DataFrame {
        df!(
            NOC_COLUMN => ["USA", "GBR", "FRA"],
            REGION_COLUMN => [Some(" united states "), None, Some("france")],
            NOTES_COLUMN => [None, Some(" uk "), None]
        )
        .unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_normalize_reference_rows() {
        let (df, _) = TextNormalizer::default().normalize(sample()).unwrap();

        assert_eq!(
            strings(&df, REGION_COLUMN),
            vec![
                Some("United States".to_string()),
                Some("Unknown".to_string()),
                Some("France".to_string())
            ]
        );
        assert_eq!(
            strings(&df, NOTES_COLUMN),
            vec![None, Some("Uk".to_string()), None]
        );
    }

    #[test]
    fn test_region_never_null_after_normalize() {
        let (df, _) = TextNormalizer::default().normalize(sample()).unwrap();
        assert_eq!(df.column(REGION_COLUMN).unwrap().null_count(), 0);
    }

    #[test]
    fn test_row_count_and_other_columns_unchanged() {
        let (df, _) = TextNormalizer::default().normalize(sample()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(
            strings(&df, NOC_COLUMN),
            vec![
                Some("USA".to_string()),
                Some("GBR".to_string()),
                Some("FRA".to_string())
            ]
        );
    }

    #[test]
    fn test_custom_fill_value() {
        let (df, actions) = TextNormalizer::new("N/A").normalize(sample()).unwrap();
        assert_eq!(strings(&df, REGION_COLUMN)[1], Some("N/A".to_string()));
        assert!(actions.iter().any(|a| a.contains("Filled 1 missing")));
    }

    #[test]
    fn test_missing_text_column_fails() {
        let df = df!(NOC_COLUMN => ["USA"], REGION_COLUMN => ["x"]).unwrap();
        assert!(TextNormalizer::default().normalize(df).is_err());
    }
}
