//! Missing-value heatmap: one cell per (row, column), colored by null-ness.

use super::axis::{category_range, slot_at, slot_band, top_down_slot};
use super::{FONT_FAMILY, VIRIDIS};
use crate::error::Result;
use crate::utils::column_names;
use anyhow::bail;
use plotters::prelude::*;
use polars::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1000, 800);

/// Null mask of a table, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMatrix {
    columns: Vec<String>,
    cells: Vec<Vec<bool>>,
}

impl MissingMatrix {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let masks = df
            .get_columns()
            .iter()
            .map(|col| {
                col.as_materialized_series()
                    .is_null()
                    .into_iter()
                    .map(|v| v.unwrap_or(false))
                    .collect::<Vec<bool>>()
            })
            .collect::<Vec<_>>();

        let cells = (0..df.height())
            .map(|row| masks.iter().map(|mask| mask[row]).collect())
            .collect();

        Ok(Self {
            columns: column_names(df),
            cells,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn is_missing(&self, row: usize, column: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(false)
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().flatten().filter(|m| **m).count()
    }

    pub fn missing_per_column(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(c, name)| {
                let n = self.cells.iter().filter(|row| row[c]).count();
                (name.clone(), n)
            })
            .collect()
    }
}

const MAX_ROW_LABELS: usize = 10;

/// Rectangle corners of cell (`row`, `column`); row 0 is the top row.
pub(crate) fn cell_rect(row: usize, column: usize, rows: usize) -> [(f64, f64); 2] {
    let (x0, x1) = slot_band(column);
    let (y0, y1) = slot_band(top_down_slot(row, rows));
    [(x0, y0), (x1, y1)]
}

/// Row index shown at vertical axis value `value`.
pub(crate) fn row_label(value: f64, rows: usize) -> String {
    slot_at(value, rows)
        .map(|slot| top_down_slot(slot, rows).to_string())
        .unwrap_or_default()
}

pub fn render_heatmap(matrix: &MissingMatrix, title: &str, path: &Path) -> anyhow::Result<()> {
    if matrix.rows() == 0 || matrix.columns().is_empty() {
        bail!("no cells to plot");
    }

    let n_cols = matrix.columns().len();
    let n_rows = matrix.rows();
    let present = VIRIDIS[0];
    let missing = VIRIDIS[VIRIDIS.len() - 1];

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT_FAMILY, 32))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(category_range(n_cols), category_range(n_rows))?;

    let columns = matrix.columns();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n_cols)
        .x_label_formatter(&|v| {
            slot_at(*v, n_cols)
                .and_then(|slot| columns.get(slot))
                .cloned()
                .unwrap_or_default()
        })
        .y_labels(n_rows.min(MAX_ROW_LABELS))
        .y_label_formatter(&|v| row_label(*v, n_rows))
        .y_desc("Row")
        .label_style((FONT_FAMILY, 16))
        .draw()?;

    chart.draw_series((0..n_rows).flat_map(|row| {
        (0..n_cols).map(move |col| {
            let color = if matrix.is_missing(row, col) {
                missing
            } else {
                present
            };
            Rectangle::new(cell_rect(row, col, n_rows), color.filled())
        })
    }))?;

    root.present()?;
    Ok(())
}
