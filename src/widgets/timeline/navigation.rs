//! Window navigation and nearest-item lookup.
//!
//! Previous/next steps move by one window unit. When the window shows no items
//! at all, `closest_past()` / `closest_future()` find where to jump.

use chrono::{Days, Local, Months, NaiveDate};
use log::debug;

use super::window::{Columns, Granularity, Window, month_start};
use crate::entities::Item;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Today's local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Step the window by one unit.
///
/// Month steps land on the 1st of the adjacent month; week and day steps keep
/// the weekday. Dates at the edge of chrono's range stay where they are.
pub fn advance(window: &Window, direction: Direction) -> Window {
    let focus = window.focus;
    let moved = match (window.granularity, direction) {
        (Granularity::Month, Direction::Next) => month_start(focus).checked_add_months(Months::new(1)),
        (Granularity::Month, Direction::Previous) => month_start(focus).checked_sub_months(Months::new(1)),
        (Granularity::Week, Direction::Next) => focus.checked_add_days(Days::new(7)),
        (Granularity::Week, Direction::Previous) => focus.checked_sub_days(Days::new(7)),
        (Granularity::Day, Direction::Next) => focus.checked_add_days(Days::new(1)),
        (Granularity::Day, Direction::Previous) => focus.checked_sub_days(Days::new(1)),
    };
    Window::new(moved.unwrap_or(focus), window.granularity)
}

/// Jump to a date, keeping granularity.
pub fn navigate_to(window: &Window, date: NaiveDate) -> Window {
    Window::new(date, window.granularity)
}

/// Switch granularity; focus date is untouched.
pub fn set_granularity(window: &Window, granularity: Granularity) -> Window {
    Window::new(window.focus, granularity)
}

/// True if any item touches any visible day.
///
/// Looser than `item_placement()`: an item straddling the window edge counts.
pub fn has_visible_items<'a>(items: impl IntoIterator<Item = &'a Item>, columns: &Columns) -> bool {
    let (Some(first), Some(last)) = (columns.first(), columns.last()) else {
        return false;
    };
    items.into_iter().any(|item| item.intersects(first, last))
}

/// Nearest item starting strictly before `reference`; ties go to the earlier input.
pub fn closest_past<'a>(items: impl IntoIterator<Item = &'a Item>, reference: NaiveDate) -> Option<&'a Item> {
    closest_by(items, reference, |start| start < reference)
}

/// Nearest item starting strictly after `reference`; ties go to the earlier input.
pub fn closest_future<'a>(items: impl IntoIterator<Item = &'a Item>, reference: NaiveDate) -> Option<&'a Item> {
    closest_by(items, reference, |start| start > reference)
}

fn closest_by<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    reference: NaiveDate,
    keep: impl Fn(NaiveDate) -> bool,
) -> Option<&'a Item> {
    let mut best: Option<(i64, &'a Item)> = None;
    for item in items.into_iter().filter(|i| keep(i.start)) {
        let distance = (item.start - reference).num_days().abs();
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, item));
        }
    }
    best.map(|(_, item)| item)
}

/// Move the focus to the nearest item start in `direction`.
///
/// Returns `None` if no item lies that way.
pub fn jump_to_closest<'a>(
    window: &Window,
    items: impl IntoIterator<Item = &'a Item>,
    direction: Direction,
) -> Option<Window> {
    let target = match direction {
        Direction::Previous => closest_past(items, window.focus),
        Direction::Next => closest_future(items, window.focus),
    }?;
    debug!("Jump {:?} to {} '{}' at {}", direction, target.id, target.name, target.start);
    Some(navigate_to(window, target.start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{make_item, ymd};
    use crate::widgets::timeline::window::columns_for;

    #[test]
    fn test_advance_month_lands_on_first() {
        let w = Window::new(ymd(2024, 1, 31), Granularity::Month);
        assert_eq!(advance(&w, Direction::Next).focus, ymd(2024, 2, 1));
        assert_eq!(advance(&w, Direction::Previous).focus, ymd(2023, 12, 1));
    }

    #[test]
    fn test_advance_week_and_day() {
        let w = Window::new(ymd(2024, 2, 27), Granularity::Week);
        assert_eq!(advance(&w, Direction::Next).focus, ymd(2024, 3, 5));
        assert_eq!(advance(&w, Direction::Previous).focus, ymd(2024, 2, 20));

        let d = Window::new(ymd(2024, 2, 29), Granularity::Day);
        assert_eq!(advance(&d, Direction::Next).focus, ymd(2024, 3, 1));
        assert_eq!(advance(&d, Direction::Previous).focus, ymd(2024, 2, 28));
        assert_eq!(advance(&d, Direction::Next).granularity, Granularity::Day);
    }

    #[test]
    fn test_granularity_switch_keeps_focus() {
        let w = Window::new(ymd(2024, 5, 17), Granularity::Month);
        let week = set_granularity(&w, Granularity::Week);
        assert_eq!(week.focus, ymd(2024, 5, 17));
        assert_eq!(navigate_to(&week, ymd(2020, 1, 1)), Window::new(ymd(2020, 1, 1), Granularity::Week));
    }

    #[test]
    fn test_has_visible_items_looser_than_placement() {
        let cols = columns_for(&Window::new(ymd(2024, 2, 15), Granularity::Month));
        let straddle = make_item(1, "A", ymd(2024, 1, 25), ymd(2024, 2, 1));
        let before = make_item(2, "B", ymd(2024, 1, 1), ymd(2024, 1, 31));
        assert!(has_visible_items([&straddle], &cols));
        assert!(!has_visible_items([&before], &cols));
        assert!(!has_visible_items(std::iter::empty(), &cols));
    }

    #[test]
    fn test_closest_future_excludes_past() {
        let items = vec![
            make_item(1, "Jan", ymd(2024, 1, 1), ymd(2024, 1, 2)),
            make_item(2, "Mar", ymd(2024, 3, 1), ymd(2024, 3, 2)),
        ];
        let found = closest_future(&items, ymd(2024, 2, 1)).unwrap();
        assert_eq!(found.name, "Mar");
        let found = closest_past(&items, ymd(2024, 2, 1)).unwrap();
        assert_eq!(found.name, "Jan");
    }

    #[test]
    fn test_closest_same_day_excluded() {
        let items = vec![make_item(1, "Today", ymd(2024, 2, 1), ymd(2024, 2, 3))];
        assert!(closest_future(&items, ymd(2024, 2, 1)).is_none());
        assert!(closest_past(&items, ymd(2024, 2, 1)).is_none());
    }

    #[test]
    fn test_closest_tie_first_wins() {
        let items = vec![
            make_item(1, "first", ymd(2024, 2, 10), ymd(2024, 2, 10)),
            make_item(2, "second", ymd(2024, 2, 10), ymd(2024, 2, 12)),
            make_item(3, "far", ymd(2024, 2, 20), ymd(2024, 2, 21)),
        ];
        assert_eq!(closest_future(&items, ymd(2024, 2, 1)).unwrap().name, "first");
    }

    #[test]
    fn test_jump_to_closest() {
        let items = vec![make_item(1, "later", ymd(2024, 6, 3), ymd(2024, 6, 9))];
        let w = Window::new(ymd(2024, 2, 1), Granularity::Week);
        let jumped = jump_to_closest(&w, &items, Direction::Next).unwrap();
        assert_eq!(jumped, Window::new(ymd(2024, 6, 3), Granularity::Week));
        assert!(jump_to_closest(&w, &items, Direction::Previous).is_none());
    }
}
