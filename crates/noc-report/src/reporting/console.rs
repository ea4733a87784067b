//! Plain-text blocks printed to stdout during a run.

use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::notes::PREVIEW_COLUMNS;
use crate::types::SummaryStats;
use crate::utils::string_column;
use polars::prelude::*;
use std::fmt::Write;

pub const NOTES_HEADING: &str = "NOCs with notes (historical or alternative names):";

const NULL_CELL: &str = "null";

pub fn format_summary(stats: &SummaryStats) -> String {
    format!(
        "Total NOCs: {}\nMissing regions: {}\nNOCs with notes: {}\n",
        stats.total_nocs, stats.missing_regions, stats.nocs_with_notes
    )
}

pub fn top_regions_heading(top_n: usize) -> String {
    format!("Top {} regions with most NOCs:", top_n)
}

/// Heading followed by one `region  count` line per ranked entry.
pub fn format_top_regions(top: &FrequencyTable, top_n: usize) -> String {
    let width = top
        .entries()
        .iter()
        .map(|(region, _)| region.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = top_regions_heading(top_n);
    out.push('\n');
    for (region, count) in top.entries() {
        let _ = writeln!(out, "{:<width$}  {}", region, count, width = width);
    }
    out
}

/// Heading followed by an aligned `NOC | region | notes` table.
pub fn format_notes_table(notes: &DataFrame) -> Result<String> {
    let mut columns: Vec<Vec<String>> = Vec::with_capacity(PREVIEW_COLUMNS.len());
    for name in PREVIEW_COLUMNS {
        let mut cells = vec![name.to_string()];
        cells.extend(
            string_column(notes, name)?
                .into_iter()
                .map(|v| v.unwrap_or(NULL_CELL).to_string()),
        );
        columns.push(cells);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|cells| cells.iter().map(|c| c.chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::from(NOTES_HEADING);
    out.push('\n');
    for row in 0..=notes.height() {
        let line = columns
            .iter()
            .zip(&widths)
            .map(|(cells, width)| format!("{:<width$}", cells[row], width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_summary() {
        let stats = SummaryStats {
            total_rows: 230,
            total_columns: 3,
            total_nocs: 230,
            missing_regions: 0,
            nocs_with_notes: 21,
        };
        assert_eq!(
            format_summary(&stats),
            "Total NOCs: 230\nMissing regions: 0\nNOCs with notes: 21\n"
        );
    }

    #[test]
    fn test_format_top_regions() {
        let freq = FrequencyTable::from_values(
            "region",
            [Some("Germany"), Some("Chad"), Some("Germany")],
        );
        assert_eq!(
            format_top_regions(&freq, 10),
            "Top 10 regions with most NOCs:\nGermany  2\nChad     1\n"
        );
    }

    #[test]
    fn test_format_notes_table() {
        let notes = df!(
            "NOC" => ["GBR", "AHO"],
            "region" => [Some("Uk"), None],
            "notes" => ["Uk", "Netherlands Antilles"]
        )
        .unwrap();

        let table = format_notes_table(&notes).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], NOTES_HEADING);
        assert_eq!(lines[1], "NOC  region  notes");
        assert_eq!(lines[2], "GBR  Uk      Uk");
        assert_eq!(lines[3], "AHO  null    Netherlands Antilles");
    }
}
