//! Pie chart of the top regions.
//!
//! Angles are in degrees, measured counter-clockwise from the positive x axis.
//! Slices are laid out counter-clockwise from [`PIE_START_ANGLE`] in ranking
//! order.

use super::{FONT_FAMILY, TAB10};
use crate::frequency::FrequencyTable;
use anyhow::{Result, bail};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const PIE_START_ANGLE: f64 = 140.0;

const SIZE: (u32, u32) = (900, 900);
const ARC_STEP_DEGREES: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
    /// Share of the plotted total, 0-100.
    pub percentage: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Lay out one slice per table entry. Percentages are relative to the
/// table's own total, so they sum to 100 for any non-empty table.
pub fn pie_slices(table: &FrequencyTable, start_angle: f64) -> Vec<PieSlice> {
    let total = table.total();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = start_angle;
    table
        .entries()
        .iter()
        .map(|(label, value)| {
            let fraction = *value as f64 / total as f64;
            let slice = PieSlice {
                label: label.clone(),
                value: *value,
                percentage: fraction * 100.0,
                start_angle: angle,
                sweep: fraction * 360.0,
            };
            angle += slice.sweep;
            slice
        })
        .collect()
}

/// Pixel coordinates of a point on a circle. Screen y grows downward.
pub fn polar_point(center: (i32, i32), radius: f64, angle_degrees: f64) -> (i32, i32) {
    let theta = angle_degrees.to_radians();
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 - (radius * theta.sin()).round() as i32,
    )
}

fn wedge(center: (i32, i32), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    let steps = (slice.sweep / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = slice.start_angle + slice.sweep * i as f64 / steps as f64;
        points.push(polar_point(center, radius, angle));
    }
    points
}

pub fn render_pie_chart(top: &FrequencyTable, title: &str, path: &Path) -> Result<()> {
    let slices = pie_slices(top, PIE_START_ANGLE);
    if slices.is_empty() {
        bail!("no regions to plot");
    }

    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(title, (FONT_FAMILY, 32))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.32;

    for (i, slice) in slices.iter().enumerate() {
        let color = TAB10[i % TAB10.len()];
        let points = wedge(center, radius, slice);
        area.draw(&Polygon::new(points.clone(), color.filled()))?;
        area.draw(&PathElement::new(points, WHITE.stroke_width(1)))?;
    }

    for slice in &slices {
        let mid = slice.mid_angle();
        let h_pos = if mid.to_radians().cos() >= 0.0 {
            HPos::Left
        } else {
            HPos::Right
        };

        let label_style = TextStyle::from((FONT_FAMILY, 18).into_font())
            .pos(Pos::new(h_pos, VPos::Center));
        area.draw(&Text::new(
            slice.label.clone(),
            polar_point(center, radius * 1.15, mid),
            label_style,
        ))?;

        let pct_style = TextStyle::from((FONT_FAMILY, 16).into_font())
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            slice.percent_label(),
            polar_point(center, radius * 0.6, mid),
            pct_style,
        ))?;
    }

    root.present()?;
    Ok(())
}
