//! Timeline widget - lanes of items over a day/week/month column window
//!
//! Window mapping, navigation and drag-resize logic, plus a text renderer

pub mod drag;
pub mod navigation;
mod timeline;
pub mod timeline_events;
pub mod timeline_helpers;
mod timeline_ui;
pub mod window;

pub use drag::{DragPreview, DragResizeController, DragSession, DragUpdate, Pointer};
pub use navigation::Direction;
pub use timeline::{TimelineConfig, TimelineState};
pub use timeline_helpers::{GridGeometry, detect_handle};
pub use timeline_ui::render_timeline;
pub use window::{Columns, Granularity, Placement, Window};
