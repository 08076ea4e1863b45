//! Timeline widget - state and configuration.
//!
//! `TimelineState` is the persisted view (window + grid width). The host feeds
//! it navigation input, asks it for columns, and hands its geometry to the
//! drag controller on every pointer event.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::navigation::{self, Direction};
use super::timeline_helpers::GridGeometry;
use super::window::{self, Columns, Granularity, Window};
use crate::entities::Item;

/// Configuration for the text renderer
#[derive(Clone, Debug)]
pub struct TimelineConfig {
    pub lane_label_width: usize,
    pub cell_width: usize,
    pub edge_threshold_px: f32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            lane_label_width: 8,
            cell_width: 3,
            edge_threshold_px: 6.0,
        }
    }
}

/// Timeline state (persistent between runs)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineState {
    pub window: Window,
    /// Rendered grid width in pixels, used to turn pointer motion into days
    pub grid_width: f32,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            window: Window::new(navigation::today(), Granularity::Month),
            grid_width: 840.0,
        }
    }
}

impl TimelineState {
    pub fn new(window: Window, grid_width: f32) -> Self {
        Self { window, grid_width }
    }

    /// Set the grid width; non-finite or non-positive widths are refused.
    pub fn set_grid_width(&mut self, width: f32) -> bool {
        if !width.is_finite() || width <= 0.0 {
            warn!("Grid width {} refused, keeping {}", width, self.grid_width);
            return false;
        }
        self.grid_width = width;
        true
    }

    /// Replace an unusable grid width (e.g. from a hand-edited file) with the default.
    pub fn sanitized(mut self) -> Self {
        if !self.grid_width.is_finite() || self.grid_width <= 0.0 {
            warn!("Stored grid width {} is unusable, using default", self.grid_width);
            self.grid_width = Self::default().grid_width;
        }
        self
    }

    pub fn columns(&self) -> Columns {
        window::columns_for(&self.window)
    }

    pub fn label(&self) -> String {
        window::header_label(&self.window)
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.grid_width, self.columns().len())
    }

    /// Step `steps` window units; negative goes back.
    pub fn step(&mut self, steps: i32) {
        let direction = if steps < 0 { Direction::Previous } else { Direction::Next };
        for _ in 0..steps.unsigned_abs() {
            self.window = navigation::advance(&self.window, direction);
        }
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.window = navigation::set_granularity(&self.window, granularity);
    }

    pub fn navigate_to(&mut self, date: NaiveDate) {
        self.window = navigation::navigate_to(&self.window, date);
    }

    /// Jump to the nearest item in `direction`; false if there is none.
    pub fn jump_to_closest<'a>(&mut self, items: impl IntoIterator<Item = &'a Item>, direction: Direction) -> bool {
        match navigation::jump_to_closest(&self.window, items, direction) {
            Some(window) => {
                self.window = window;
                true
            }
            None => false,
        }
    }
}
