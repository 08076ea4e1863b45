//! ItemStore: the owned, ordered item collection.
//!
//! Single source of truth for timeline items. Lane packing, window placement
//! and navigation read it; only the drag controller writes it, and only through
//! `set_boundary()` which replaces one boundary of one item in place.
//!
//! Items are loaded from a JSON array:
//! ```json
//! [{ "id": 1, "name": "Kickoff", "start": "2024-01-01", "end": "2024-01-03" }]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, info};

use super::item::{Boundary, Item, ItemId};

/// Bundled demo items used when no file is given.
const SEED_JSON: &str = include_str!("../../demos/timeline_items.json");

#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    items: IndexMap<ItemId, Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build store from items, validating unique ids and `start <= end`.
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        let mut map = IndexMap::with_capacity(items.len());
        for item in items {
            if item.start > item.end {
                bail!(
                    "Item {} '{}' ends ({}) before it starts ({})",
                    item.id, item.name, item.end, item.start
                );
            }
            if map.contains_key(&item.id) {
                bail!("Duplicate item id {}", item.id);
            }
            map.insert(item.id, item);
        }
        Ok(Self { items: map })
    }

    /// Parse a JSON array of items.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json).context("Parse items error")?;
        Self::from_items(items)
    }

    /// Load items from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Read items error: {}", path.display()))?;
        let store = Self::from_json_str(&json)
            .with_context(|| format!("Invalid items file: {}", path.display()))?;
        info!("Loaded {} items from {}", store.len(), path.display());
        Ok(store)
    }

    /// Bundled demo collection.
    pub fn seed() -> Result<Self> {
        Self::from_json_str(SEED_JSON).context("Bundled seed items are invalid")
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Items in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Snapshot of items in input order (for the pure algorithms).
    pub fn to_vec(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace one boundary of one item.
    ///
    /// Returns false (and leaves the item untouched) if the id is unknown or
    /// the new value would invert the interval.
    pub fn set_boundary(&mut self, id: ItemId, which: Boundary, date: NaiveDate) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        let (start, end) = match which {
            Boundary::Start => (date, item.end),
            Boundary::End => (item.start, date),
        };
        if start > end {
            debug!("set_boundary {} {}={} refused: {}..{}", id, which.as_str(), date, start, end);
            return false;
        }
        item.start = start;
        item.end = end;
        true
    }

    /// Earliest start and latest end over all items.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.items.values().map(|i| i.start).min()?;
        let last = self.items.values().map(|i| i.end).max()?;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{make_item, ymd};

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![
            make_item(1, "A", ymd(2024, 1, 1), ymd(2024, 1, 2)),
            make_item(1, "B", ymd(2024, 1, 3), ymd(2024, 1, 4)),
        ];
        assert!(ItemStore::from_items(items).is_err());
    }

    #[test]
    fn test_inverted_json_rejected() {
        let json = r#"[{"id":1,"name":"x","start":"2024-01-05","end":"2024-01-01"}]"#;
        assert!(ItemStore::from_json_str(json).is_err());
    }

    #[test]
    fn test_order_preserved() {
        let store = ItemStore::from_items(vec![
            make_item(3, "C", ymd(2024, 1, 5), ymd(2024, 1, 6)),
            make_item(1, "A", ymd(2024, 1, 1), ymd(2024, 1, 3)),
        ])
        .unwrap();
        let ids: Vec<u32> = store.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_set_boundary() {
        let mut store =
            ItemStore::from_items(vec![make_item(1, "A", ymd(2024, 1, 10), ymd(2024, 1, 15))]).unwrap();

        assert!(store.set_boundary(ItemId(1), Boundary::End, ymd(2024, 1, 17)));
        assert_eq!(store.get(ItemId(1)).unwrap().end, ymd(2024, 1, 17));

        // Would invert: refused, unchanged
        assert!(!store.set_boundary(ItemId(1), Boundary::Start, ymd(2024, 1, 18)));
        assert_eq!(store.get(ItemId(1)).unwrap().start, ymd(2024, 1, 10));

        // Unknown id
        assert!(!store.set_boundary(ItemId(9), Boundary::Start, ymd(2024, 1, 1)));
    }

    #[test]
    fn test_seed_loads() {
        let store = ItemStore::seed().unwrap();
        assert!(!store.is_empty());
        let (first, last) = store.date_range().unwrap();
        assert!(first <= last);
    }
}
