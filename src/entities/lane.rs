//! Lanes: rows of mutually non-overlapping items.
//!
//! # Algorithm
//!
//! Greedy interval partitioning (`assign_lanes()`):
//! 1. Sort items by `start`, then `end`, then input position (stable sort)
//! 2. For each item, scan lanes in index order and take the first one whose
//!    last item ends strictly before the item starts
//! 3. No such lane: open a new one
//!
//! The lane count equals the maximum number of items overlapping on any
//! single day (`max_overlap()`), so the result is minimal.
//!
//! Lanes are recomputed from scratch after every mutation. A resized item may
//! land in a different lane on the next pass; that is expected.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::item::Item;

/// One row on the timeline.
///
/// # Invariants
///
/// - Items never overlap (closed day ranges, shared day = overlap)
/// - Items are in placement order, which is ascending `start`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    items: Vec<Item>,
}

impl Lane {
    fn with_item(item: Item) -> Self {
        Self { items: vec![item] }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// End date of the most recently placed item.
    pub fn last_end(&self) -> Option<NaiveDate> {
        self.items.last().map(|i| i.end)
    }

    /// Check if an interval fits without touching any item in this lane
    pub fn can_place(&self, start: NaiveDate, end: NaiveDate) -> bool {
        !self.items.iter().any(|item| start <= item.end && end >= item.start)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pack items into the minimum number of ordered lanes.
///
/// Deterministic and pure; zero items produce zero lanes.
pub fn assign_lanes(items: &[Item]) -> Vec<Lane> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    // sort_by is stable: equal (start, end) keep input order
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    let mut lanes: Vec<Lane> = Vec::new();
    for item in sorted {
        let free = lanes
            .iter_mut()
            .find(|lane| lane.last_end().is_some_and(|end| end < item.start));
        match free {
            Some(lane) => lane.items.push(item.clone()),
            None => lanes.push(Lane::with_item(item.clone())),
        }
    }
    lanes
}

/// Maximum number of items covering a single day (sweep line).
pub fn max_overlap(items: &[Item]) -> usize {
    // (day, delta): +1 on start, -1 the day after end
    let mut edges: Vec<(NaiveDate, i32)> = Vec::with_capacity(items.len() * 2);
    for item in items {
        edges.push((item.start, 1));
        let after = item.end.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
        edges.push((after, -1));
    }
    // Closing edges first on the same day
    edges.sort();

    let mut current = 0i32;
    let mut best = 0i32;
    for (_, delta) in edges {
        current += delta;
        best = best.max(current);
    }
    best as usize
}
