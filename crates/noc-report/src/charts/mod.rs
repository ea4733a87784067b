//! Chart rendering for the region report.
//!
//! Each chart has a pure layout step (slice angles, bar order, null mask)
//! and a drawing step that writes a PNG through the plotters bitmap backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use noc_report::charts::ChartRenderer;
//!
//! let renderer = ChartRenderer::new(false);
//! renderer.bar_chart(&top_regions, 10, Path::new("output/plots/top_10_regions.png"))?;
//! ```

mod axis;
mod bar;
mod heatmap;
mod pie;
mod viewer;

pub use bar::{category_labels, render_bar_chart};
pub use heatmap::{MissingMatrix, render_heatmap};
pub use pie::{PIE_START_ANGLE, PieSlice, pie_slices, polar_point, render_pie_chart};
pub use viewer::show_in_viewer;

use crate::frequency::FrequencyTable;
use anyhow::Result;
use plotters::style::RGBColor;
use std::path::Path;
use tracing::info;

pub(crate) const FONT_FAMILY: &str = "sans-serif";

/// Ten evenly spaced stops of the viridis colormap.
pub(crate) const VIRIDIS: [RGBColor; 10] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 74, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(109, 205, 89),
    RGBColor(180, 222, 44),
    RGBColor(253, 231, 37),
];

/// Categorical palette for pie slices.
pub(crate) const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub const HEATMAP_TITLE: &str = "Missing Values Heatmap";

pub fn bar_chart_title(top_n: usize) -> String {
    format!("Top {} Regions by Number of NOCs", top_n)
}

pub fn pie_chart_title(top_n: usize) -> String {
    format!("Top {} Region Distribution (Pie Chart)", top_n)
}

/// Color for item `index` of `count`, spread across the viridis stops.
pub(crate) fn viridis(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return VIRIDIS[0];
    }
    let stop = index.min(count - 1) * (VIRIDIS.len() - 1) / (count - 1);
    VIRIDIS[stop]
}

/// Renders the report charts and optionally hands them to a viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartRenderer {
    interactive: bool,
}

impl ChartRenderer {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }

    pub fn bar_chart(&self, top: &FrequencyTable, top_n: usize, path: &Path) -> Result<()> {
        render_bar_chart(top, &bar_chart_title(top_n), path)?;
        self.finish(path);
        Ok(())
    }

    pub fn pie_chart(&self, top: &FrequencyTable, top_n: usize, path: &Path) -> Result<()> {
        render_pie_chart(top, &pie_chart_title(top_n), path)?;
        self.finish(path);
        Ok(())
    }

    pub fn heatmap(&self, matrix: &MissingMatrix, path: &Path) -> Result<()> {
        render_heatmap(matrix, HEATMAP_TITLE, path)?;
        self.finish(path);
        Ok(())
    }

    fn finish(&self, path: &Path) {
        info!("Chart saved: {}", path.display());
        if self.interactive {
            show_in_viewer(path);
        }
    }
}

/// Whether text can be laid out with the chart font on this machine.
#[cfg(test)]
pub(crate) fn fonts_available() -> bool {
    plotters::style::FontDesc::from((FONT_FAMILY, 16))
        .box_size("Region")
        .is_ok()
}
