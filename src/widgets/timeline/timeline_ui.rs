//! Timeline text rendering for the terminal host.
//!
//! Layout:
//! - **Header**: window label
//! - **Ruler**: day-of-month per column
//! - **Lanes**: one row per lane with at least one placed item, bars as `[name==]`
//! - **Footer**: nearest-item hints when the window is empty, live drag preview

use std::fmt::Write as _;

use chrono::Datelike;

use super::drag::DragPreview;
use super::navigation::{closest_future, closest_past, has_visible_items};
use super::window::item_placement;
use super::{TimelineConfig, TimelineState};
use crate::entities::{ItemStore, assign_lanes};

/// Render the whole timeline into a string.
pub fn render_timeline(
    store: &ItemStore,
    state: &TimelineState,
    config: &TimelineConfig,
    preview: Option<&DragPreview>,
) -> String {
    let columns = state.columns();
    let cw = config.cell_width.max(1);
    let label_w = config.lane_label_width;
    let mut out = String::new();

    let _ = writeln!(out, "{}", state.label());

    let mut ruler = " ".repeat(label_w);
    for day in columns.days() {
        let _ = write!(ruler, "{:>width$}", day.day(), width = cw);
    }
    let _ = writeln!(out, "{}", ruler.trim_end());

    let items = store.to_vec();
    let lanes = assign_lanes(&items);
    let window_range = columns.first().zip(columns.last());
    let mut hidden = 0usize;
    for (lane_idx, lane) in lanes.iter().enumerate() {
        let mut row: Vec<char> = vec![' '; columns.len() * cw];
        let mut placed_any = false;
        for item in lane.items() {
            match item_placement(&columns, item) {
                Some(p) => {
                    draw_bar(&mut row, p.offset * cw, p.span * cw, &item.name);
                    placed_any = true;
                }
                None if window_range.is_some_and(|(first, last)| item.intersects(first, last)) => {
                    hidden += 1;
                }
                None => {}
            }
        }
        if placed_any {
            let row: String = row.into_iter().collect();
            let _ = writeln!(out, "{:<width$}{}", format!("L{}", lane_idx), row.trim_end(), width = label_w);
        }
    }

    if hidden > 0 {
        let _ = writeln!(out, "({} item(s) cross the window edge and are not shown)", hidden);
    }

    if !has_visible_items(store.iter(), &columns) {
        let _ = writeln!(out, "No events in this view.");
        if let Some(item) = closest_past(store.iter(), state.window.focus) {
            let _ = writeln!(out, "  < previous: {} ({})", item.name, item.start);
        }
        if let Some(item) = closest_future(store.iter(), state.window.focus) {
            let _ = writeln!(out, "  > next: {} ({})", item.name, item.start);
        }
    }

    if let Some(p) = preview {
        let _ = writeln!(out, "Resizing '{}': {} .. {}", p.name, p.start, p.end);
    }
    out
}

/// Draw `[name===]` into `row[start..start+len]`, truncating the name.
fn draw_bar(row: &mut [char], start: usize, len: usize, name: &str) {
    let end = (start + len).min(row.len());
    if start >= end {
        return;
    }
    let cells = &mut row[start..end];
    cells.fill('=');
    cells[0] = '[';
    let last = cells.len() - 1;
    cells[last] = ']';
    for (slot, ch) in cells.iter_mut().skip(1).take(last.saturating_sub(1)).zip(name.chars()) {
        *slot = ch;
    }
}
