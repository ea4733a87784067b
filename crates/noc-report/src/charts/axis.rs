//! Category axis geometry shared by the bar chart and the heatmap.
//!
//! A category axis with `n` slots is the continuous range `-0.5..n - 0.5`;
//! slot `i` covers `[i - 0.5, i + 0.5]` and its label sits on the integer
//! `i`. This keeps exactly `n` equal slots, including `n == 1`.

use std::ops::Range;

/// Axis range holding `slots` categories.
pub(crate) fn category_range(slots: usize) -> Range<f64> {
    -0.5..slots as f64 - 0.5
}

/// Lower and upper edge of slot `slot`.
pub(crate) fn slot_band(slot: usize) -> (f64, f64) {
    let center = slot as f64;
    (center - 0.5, center + 0.5)
}

/// Slot index for an axis value, if it falls on a slot center.
pub(crate) fn slot_at(value: f64, slots: usize) -> Option<usize> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 || rounded >= slots as f64 {
        return None;
    }
    Some(rounded as usize)
}

/// Slot for item `index` of `count` when item 0 is drawn at the top of a
/// vertical axis.
pub(crate) fn top_down_slot(index: usize, count: usize) -> usize {
    count - 1 - index.min(count - 1)
}
