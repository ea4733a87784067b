//! Value frequency ranking for a string column.
//!
//! The ranking is count-descending. Equal counts keep the order in which
//! the values first appear in the table.

use crate::error::Result;
use crate::types::RegionCount;
use crate::utils::string_column;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ranked occurrence counts of the values in one column. Nulls are not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    column: String,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Count values and rank them.
    pub fn from_values<'a>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Self {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut entries: Vec<(String, usize)> = Vec::new();

        for value in values.into_iter().flatten() {
            match index.get(value) {
                Some(&pos) => entries[pos].1 += 1,
                None => {
                    index.insert(value, entries.len());
                    entries.push((value.to_string(), 1));
                }
            }
        }

        // Stable: ties stay in first-seen order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            column: column.into(),
            entries,
        }
    }

    /// Count the values of a string column of `df`.
    pub fn from_column(df: &DataFrame, column: &str) -> Result<Self> {
        let values = string_column(df, column)?;
        Ok(Self::from_values(column, values.into_iter()))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Largest count, or 0 for an empty table.
    pub fn max_count(&self) -> usize {
        self.entries.first().map(|(_, count)| *count).unwrap_or(0)
    }

    /// The first `n` entries of the ranking.
    pub fn top(&self, n: usize) -> Self {
        Self {
            column: self.column.clone(),
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Entries with their share of this table's total.
    pub fn region_counts(&self) -> Vec<RegionCount> {
        let total = self.total();
        self.entries
            .iter()
            .map(|(region, count)| RegionCount {
                region: region.clone(),
                count: *count,
                percentage: if total == 0 {
                    0.0
                } else {
                    *count as f64 / total as f64 * 100.0
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[Option<&'static str>]) -> FrequencyTable {
        FrequencyTable::from_values("region", values.iter().copied())
    }

    #[test]
    fn test_counts_descending() {
        let freq = table(&[
            Some("Germany"),
            Some("Russia"),
            Some("Germany"),
            Some("Czech Republic"),
            Some("Germany"),
            Some("Russia"),
        ]);

        assert_eq!(
            freq.entries(),
            &[
                ("Germany".to_string(), 3),
                ("Russia".to_string(), 2),
                ("Czech Republic".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_nulls_are_not_counted() {
        let freq = table(&[Some("Chad"), None, None]);
        assert_eq!(freq.total(), 1);
        assert_eq!(freq.len(), 1);
    }

    #[test]
    fn test_total_matches_row_count() {
        let values = [Some("A"), Some("B"), Some("A"), Some("C"), Some("C"), Some("C")];
        assert_eq!(table(&values).total(), values.len());
    }

    #[test]
    fn test_top_n_truncates_ranking() {
        let mut values = Vec::new();
        for (i, region) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            for _ in 0..=i {
                values.push(Some(*region));
            }
        }
        let freq = table(&values);
        let top = freq.top(3);

        assert_eq!(top.len(), 3);
        let min_inside = top.entries().iter().map(|(_, c)| *c).min().unwrap();
        for (region, count) in &freq.entries()[3..] {
            assert!(
                *count <= min_inside,
                "{region} has {count} but is outside the top 3"
            );
        }
        assert!(top.entries().windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_top_larger_than_table() {
        let freq = table(&[Some("A"), Some("B")]);
        assert_eq!(freq.top(10).len(), 2);
    }

    #[test]
    fn test_region_counts_percentages() {
        let freq = table(&[Some("A"), Some("A"), Some("A"), Some("B")]);
        let counts = freq.region_counts();

        assert_eq!(counts[0].region, "A");
        assert!((counts[0].percentage - 75.0).abs() < 1e-9);
        assert!((counts[1].percentage - 25.0).abs() < 1e-9);
        let sum: f64 = counts.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_column() {
        let df = df!("region" => ["X", "Y", "X"]).unwrap();
        let freq = FrequencyTable::from_column(&df, "region").unwrap();
        assert_eq!(freq.max_count(), 2);
        assert_eq!(freq.column(), "region");
    }

    #[test]
    fn test_empty_table() {
        let freq = table(&[]);
        assert!(freq.is_empty());
        assert_eq!(freq.max_count(), 0);
        assert!(freq.region_counts().is_empty());
    }
}
