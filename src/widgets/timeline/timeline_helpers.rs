//! Timeline math helpers: pixel <-> column conversion.
//!
//! The grid is `width_px` wide and split into `columns` equal slots, one per
//! day of the visible window.

use serde::{Deserialize, Serialize};

use super::window::Placement;
use crate::entities::Boundary;

/// Rendered grid size, supplied by the presentation layer on each event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub width_px: f32,
    pub columns: usize,
}

impl GridGeometry {
    pub fn new(width_px: f32, columns: usize) -> Self {
        Self { width_px, columns }
    }

    /// Pixel width of one column; `None` for a degenerate grid.
    pub fn column_width(&self) -> Option<f32> {
        if self.columns == 0 || !(self.width_px > 0.0) {
            return None;
        }
        Some(self.width_px / self.columns as f32)
    }

    /// Whole-column offset for a pixel distance (rounded, half away from zero).
    pub fn pixels_to_columns(&self, delta_px: f32) -> Option<i64> {
        let col_w = self.column_width()?;
        Some((delta_px / col_w).round() as i64)
    }

    /// Left edge of a column in grid coordinates.
    pub fn column_to_x(&self, column: usize) -> Option<f32> {
        Some(column as f32 * self.column_width()?)
    }

    /// Grid x of an item's resize handle (left edge of start, right edge of end).
    pub fn handle_x(&self, placement: Placement, which: Boundary) -> Option<f32> {
        match which {
            Boundary::Start => self.column_to_x(placement.offset),
            Boundary::End => self.column_to_x(placement.offset + placement.span),
        }
    }
}

/// Which resize handle (if any) is under the pointer.
///
/// Grabbing slightly outside the bar is allowed so short items stay resizable.
pub fn detect_handle(
    x: f32,
    placement: Placement,
    geometry: &GridGeometry,
    edge_threshold: f32,
) -> Option<Boundary> {
    let left = geometry.handle_x(placement, Boundary::Start)?;
    let right = geometry.handle_x(placement, Boundary::End)?;
    if x < left - edge_threshold || x > right + edge_threshold {
        return None;
    }

    let dist_to_left = (x - left).abs();
    let dist_to_right = (x - right).abs();
    if dist_to_left < edge_threshold && dist_to_left <= dist_to_right {
        Some(Boundary::Start)
    } else if dist_to_right < edge_threshold {
        Some(Boundary::End)
    } else {
        None
    }
}
