//! Horizontal bar chart of the top regions.

use super::axis::{category_range, slot_at, slot_band, top_down_slot};
use super::{FONT_FAMILY, viridis};
use crate::frequency::FrequencyTable;
use anyhow::{Result, bail};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1200, 720);
const BAR_GAP: f64 = 0.1;

/// Region labels in axis order: the last ranked region sits at the bottom,
/// the most frequent one at the top.
pub fn category_labels(top: &FrequencyTable) -> Vec<&str> {
    top.entries()
        .iter()
        .rev()
        .map(|(region, _)| region.as_str())
        .collect()
}

/// Vertical extent of the bar for rank `rank` (0 = most frequent) out of
/// `count` bars.
pub(crate) fn bar_band(rank: usize, count: usize) -> (f64, f64) {
    let (lo, hi) = slot_band(top_down_slot(rank, count));
    (lo + BAR_GAP, hi - BAR_GAP)
}

pub fn render_bar_chart(top: &FrequencyTable, title: &str, path: &Path) -> Result<()> {
    if top.is_empty() {
        bail!("no regions to plot");
    }

    let labels = category_labels(top);
    let count = labels.len();
    let max = top.max_count() as u32;
    let x_max = max + (max / 10).max(1);

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT_FAMILY, 32))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 220)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0u32..x_max, category_range(count))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .light_line_style(RGBColor(235, 235, 235))
        .x_desc("Number of NOCs")
        .y_desc("Region")
        .y_labels(count)
        .y_label_formatter(&|v| {
            slot_at(*v, count)
                .and_then(|slot| labels.get(slot))
                .map(|s| s.to_string())
                .unwrap_or_default()
        })
        .label_style((FONT_FAMILY, 18))
        .axis_desc_style((FONT_FAMILY, 22))
        .draw()?;

    chart.draw_series(top.entries().iter().enumerate().map(|(rank, (_, value))| {
        let (lo, hi) = bar_band(rank, count);
        Rectangle::new(
            [(0, lo), (*value as u32, hi)],
            viridis(rank, count).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::fonts_available;

    fn top() -> FrequencyTable {
        FrequencyTable::from_values(
            "region",
            [Some("A"), Some("B"), Some("A"), Some("C"), Some("A"), Some("B")],
        )
    }

    #[test]
    fn test_largest_category_on_top() {
        assert_eq!(category_labels(&top()), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_bars_fill_one_slot_each() {
        let table = top();
        let labels = category_labels(&table);
        for (rank, (region, _)) in table.entries().iter().enumerate() {
            let (lo, hi) = bar_band(rank, 3);
            let center = (lo + hi) / 2.0;
            let slot = slot_at(center, 3).unwrap();
            assert_eq!(labels[slot], region.as_str());
        }
        let (_, top_edge) = bar_band(0, 3);
        assert!(top_edge < category_range(3).end);
        assert!(top_edge > category_range(3).end - 0.5);
    }

    #[test]
    fn test_single_bar() {
        let (lo, hi) = bar_band(0, 1);
        let range = category_range(1);
        assert!(lo > range.start && hi < range.end);
        assert_eq!(slot_at((lo + hi) / 2.0, 1), Some(0));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let empty = FrequencyTable::from_values("region", std::iter::empty());
        let err = render_bar_chart(&empty, "t", &dir.path().join("bar.png")).unwrap_err();
        assert!(err.to_string().contains("no regions"));
    }

    #[test]
    fn test_render_writes_png() {
        if !fonts_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.png");
        render_bar_chart(&top(), "Top 3 Regions by Number of NOCs", &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
