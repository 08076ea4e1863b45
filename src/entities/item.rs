//! Timeline item: a named interval of whole calendar days.
//!
//! # Coordinate System
//!
//! - `start` / `end` are local calendar days (`NaiveDate`), time-of-day never enters
//! - Both ends are INCLUSIVE: `start == end` is a single-day item spanning one column
//! - Two items sharing a boundary day overlap (a day is an indivisible unit)
//!
//! # Dependencies
//!
//! - Used by: `ItemStore` (ownership), `assign_lanes()` (packing),
//!   `window` (placement), `navigation` (nearest item), `drag` (resize)

use std::fmt;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable item identifier, unique within one `ItemStore`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which edge of an item a resize handle grabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    Start,
    End,
}

impl Boundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Start => "start",
            Boundary::End => "end",
        }
    }
}

impl std::str::FromStr for Boundary {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "start" | "s" => Ok(Boundary::Start),
            "end" | "e" => Ok(Boundary::End),
            other => bail!("Unknown boundary '{}', expected 'start' or 'end'", other),
        }
    }
}

/// Single event on the timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Item {
    /// Create item, rejecting inverted intervals.
    pub fn new(id: ItemId, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let name = name.into();
        if start > end {
            bail!("Item {} '{}' ends ({}) before it starts ({})", id, name, end, start);
        }
        Ok(Self { id, name, start, end })
    }

    /// Date at the given boundary.
    pub fn boundary(&self, which: Boundary) -> NaiveDate {
        match which {
            Boundary::Start => self.start,
            Boundary::End => self.end,
        }
    }

    /// Closed-range overlap test (shared boundary day counts as overlap).
    pub fn overlaps(&self, other: &Item) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True if the item touches any day in `first..=last`.
    pub fn intersects(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start <= last && self.end >= first
    }

    /// Number of days covered, inclusive (always >= 1 for a valid item).
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[cfg(test)]
pub(crate) fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[cfg(test)]
pub(crate) fn make_item(id: u32, name: &str, start: NaiveDate, end: NaiveDate) -> Item {
    Item::new(ItemId(id), name, start, end).expect("valid test item")
}
