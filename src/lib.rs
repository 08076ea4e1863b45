//! TIMELANE - timeline lane layout library
//!
//! Re-exports all modules for use by the binary target.

// Core infrastructure (events)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod entities;
pub mod widgets;

pub use crate::core::event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};

// Re-export entities
pub use entities::{Boundary, Item, ItemId, ItemStore, Lane, assign_lanes};
pub use widgets::timeline::{DragResizeController, Granularity, TimelineState, Window};
