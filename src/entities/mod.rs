//! Entities module - timeline data model
//!
//! - `Item`: named, inclusive day interval
//! - `ItemStore`: owned ordered collection, the single source of truth
//! - `Lane`: row of non-overlapping items produced by `assign_lanes()`

pub mod item;
pub mod lane;
pub mod store;

pub use item::{Boundary, Item, ItemId};
pub use lane::{Lane, assign_lanes, max_overlap};
pub use store::ItemStore;
