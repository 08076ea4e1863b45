//! Visible window: focus date + granularity -> ordered day columns.
//!
//! - `Day`: one column, the focus date
//! - `Week`: seven columns, Sunday through Saturday around the focus date
//! - `Month`: every day of the focus date's month
//!
//! Placement is all-or-nothing: an item whose start or end falls outside the
//! window is not placed at all, even if it covers the window's middle.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entities::Item;

/// Window unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub focus: NaiveDate,
    pub granularity: Granularity,
}

impl Window {
    pub fn new(focus: NaiveDate, granularity: Granularity) -> Self {
        Self { focus, granularity }
    }
}

/// Contiguous ascending run of calendar days, one per grid column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Columns {
    days: Vec<NaiveDate>,
}

impl Columns {
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<NaiveDate> {
        self.days.get(idx).copied()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }
}

/// Offset/span of an item inside the window (span >= 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub offset: usize,
    pub span: usize,
}

/// First day of the date's month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the date's month (28..=31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = month_start(date);
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (next - first).num_days() as u32
}

/// Most recent Sunday at or before the date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Day columns for a window.
pub fn columns_for(window: &Window) -> Columns {
    let (first, count) = match window.granularity {
        Granularity::Day => (window.focus, 1),
        Granularity::Week => (week_start(window.focus), 7),
        Granularity::Month => (month_start(window.focus), days_in_month(window.focus)),
    };
    let days = first.iter_days().take(count as usize).collect();
    Columns { days }
}

/// Zero-based column of a date, or `None` if outside the window.
pub fn column_index(columns: &Columns, date: NaiveDate) -> Option<usize> {
    columns.days.iter().position(|d| *d == date)
}

/// Offset/span of an item; `None` unless both ends are inside the window.
pub fn item_placement(columns: &Columns, item: &Item) -> Option<Placement> {
    let offset = column_index(columns, item.start)?;
    let end_idx = column_index(columns, item.end)?;
    Some(Placement {
        offset,
        span: end_idx - offset + 1,
    })
}

/// Human-readable window title, en-US formatting.
///
/// ```text
/// month: February 2024
/// week:  Feb 11 - Feb 17, 2024
/// day:   February 15, 2024
/// ```
pub fn header_label(window: &Window) -> String {
    match window.granularity {
        Granularity::Month => window.focus.format("%B %Y").to_string(),
        Granularity::Day => window.focus.format("%B %-d, %Y").to_string(),
        Granularity::Week => {
            let first = week_start(window.focus);
            let last = first.checked_add_days(Days::new(6)).unwrap_or(first);
            if first.year() == last.year() {
                format!("{} - {}, {}", first.format("%b %-d"), last.format("%b %-d"), last.year())
            } else {
                format!("{} - {}", first.format("%b %-d, %Y"), last.format("%b %-d, %Y"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{make_item, ymd};
    use chrono::Weekday;

    #[test]
    fn test_day_single_column() {
        let cols = columns_for(&Window::new(ymd(2024, 3, 9), Granularity::Day));
        assert_eq!(cols.days(), &[ymd(2024, 3, 9)]);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        for d in 1..=31 {
            let focus = ymd(2024, 3, d);
            let cols = columns_for(&Window::new(focus, Granularity::Week));
            assert_eq!(cols.len(), 7);
            assert_eq!(cols.first().unwrap().weekday(), Weekday::Sun);
            assert_eq!(cols.last().unwrap().weekday(), Weekday::Sat);
            assert!(column_index(&cols, focus).is_some());
        }
        // Sunday itself starts its own week
        let cols = columns_for(&Window::new(ymd(2024, 3, 10), Granularity::Week));
        assert_eq!(cols.first(), Some(ymd(2024, 3, 10)));
    }

    #[test]
    fn test_week_crosses_year() {
        let cols = columns_for(&Window::new(ymd(2025, 1, 1), Granularity::Week));
        assert_eq!(cols.first(), Some(ymd(2024, 12, 29)));
        assert_eq!(cols.last(), Some(ymd(2025, 1, 4)));
    }

    #[test]
    fn test_month_lengths() {
        let cases = [
            (ymd(2024, 2, 15), 29),
            (ymd(2023, 2, 1), 28),
            (ymd(1900, 2, 10), 28),
            (ymd(2000, 2, 10), 29),
            (ymd(2024, 4, 30), 30),
            (ymd(2024, 12, 31), 31),
        ];
        for (focus, expected) in cases {
            let cols = columns_for(&Window::new(focus, Granularity::Month));
            assert_eq!(cols.len(), expected, "{}", focus);
            assert_eq!(cols.first().unwrap().day(), 1);
            assert_eq!(cols.last().unwrap().month(), focus.month());
        }
    }

    #[test]
    fn test_leap_february() {
        let cols = columns_for(&Window::new(ymd(2024, 2, 15), Granularity::Month));
        assert_eq!(cols.len(), 29);
        assert_eq!(cols.first(), Some(ymd(2024, 2, 1)));
        assert_eq!(cols.last(), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_column_index_absent() {
        let cols = columns_for(&Window::new(ymd(2024, 2, 15), Granularity::Month));
        assert_eq!(column_index(&cols, ymd(2024, 2, 1)), Some(0));
        assert_eq!(column_index(&cols, ymd(2024, 3, 1)), None);
    }

    #[test]
    fn test_placement_inside() {
        let cols = columns_for(&Window::new(ymd(2024, 2, 15), Granularity::Month));
        let item = make_item(1, "A", ymd(2024, 2, 3), ymd(2024, 2, 7));
        let p = item_placement(&cols, &item).unwrap();
        assert_eq!(p, Placement { offset: 2, span: 5 });
        assert_eq!(cols.get(p.offset), Some(item.start));
        assert_eq!(cols.get(p.offset + p.span - 1), Some(item.end));

        let single = make_item(2, "B", ymd(2024, 2, 29), ymd(2024, 2, 29));
        assert_eq!(item_placement(&cols, &single), Some(Placement { offset: 28, span: 1 }));
    }

    #[test]
    fn test_partial_overlap_not_placed() {
        let cols = columns_for(&Window::new(ymd(2024, 2, 15), Granularity::Month));
        let straddle = make_item(1, "A", ymd(2024, 1, 30), ymd(2024, 2, 2));
        let covering = make_item(2, "B", ymd(2024, 1, 1), ymd(2024, 3, 31));
        assert_eq!(item_placement(&cols, &straddle), None);
        assert_eq!(item_placement(&cols, &covering), None);
    }

    #[test]
    fn test_header_labels() {
        let focus = ymd(2024, 2, 15);
        assert_eq!(header_label(&Window::new(focus, Granularity::Month)), "February 2024");
        assert_eq!(header_label(&Window::new(focus, Granularity::Day)), "February 15, 2024");
        assert_eq!(header_label(&Window::new(focus, Granularity::Week)), "Feb 11 - Feb 17, 2024");
        assert_eq!(
            header_label(&Window::new(ymd(2025, 1, 1), Granularity::Week)),
            "Dec 29, 2024 - Jan 4, 2025"
        );
    }
}
