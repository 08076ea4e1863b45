//! Drag-resize of an item's start or end date.
//!
//! Two states: Idle (`session == None`) and Dragging (`session == Some`).
//!
//! ```text
//! Idle --begin(handle)--> Dragging --pointer_move--> Dragging
//!                            |
//!                            +--release / cancel / drop--> Idle
//! ```
//!
//! Pointer math:
//! - pixel deltas are taken between consecutive moves and accumulated
//! - the day delta is `round(accumulated / column_width)` and is always applied
//!   to the boundary captured at drag start, so rounding never drifts
//!
//! A candidate that would put start on/after end (or end on/before start) is
//! silently rejected for that move; the item keeps its last accepted value.
//!
//! Move/release input is held by a `PointerCapture` guard owned by the session.
//! Dropping the session by any path (release, cancel, controller dropped
//! mid-gesture) drops the guard and publishes `PointerReleasedEvent`.

use chrono::{Days, NaiveDate};
use log::{debug, trace, warn};

use super::timeline_events::{
    DragEndReason, DragEndedEvent, DragPreviewChangedEvent, ItemResizedEvent, PointerCapturedEvent,
    PointerReleasedEvent,
};
use super::timeline_helpers::GridGeometry;
use crate::core::event_bus::EventEmitter;
use crate::entities::{Boundary, ItemId, ItemStore};

/// Pointer position in grid coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// In-progress values for tooltip rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPreview {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub name: String,
}

/// Outcome of one pointer move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragUpdate {
    /// No session, or geometry unusable.
    Ignored,
    /// Candidate would invert the interval; item unchanged.
    Rejected,
    /// Candidate equals the current boundary.
    Unchanged,
    /// Boundary replaced in the store.
    Accepted { start: NaiveDate, end: NaiveDate },
}

/// Scoped ownership of pointer move/release input.
///
/// Publishes capture on creation and release on drop.
struct PointerCapture {
    item_id: ItemId,
    emitter: EventEmitter,
}

impl PointerCapture {
    fn acquire(emitter: &EventEmitter, item_id: ItemId, handle: Boundary) -> Self {
        emitter.emit(PointerCapturedEvent { item_id, handle });
        Self {
            item_id,
            emitter: emitter.clone(),
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        trace!("Pointer capture released for {}", self.item_id);
        self.emitter.emit(PointerReleasedEvent { item_id: self.item_id });
    }
}

/// Transient state of one resize gesture.
pub struct DragSession {
    pub item_id: ItemId,
    pub handle: Boundary,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    pub pointer_origin: Pointer,
    pub accumulated_px: f32,
    last_x: f32,
    _capture: PointerCapture,
}

impl std::fmt::Debug for DragSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragSession")
            .field("item_id", &self.item_id)
            .field("handle", &self.handle)
            .field("original_start", &self.original_start)
            .field("original_end", &self.original_end)
            .field("pointer_origin", &self.pointer_origin)
            .field("accumulated_px", &self.accumulated_px)
            .finish()
    }
}

impl DragSession {
    fn original(&self) -> NaiveDate {
        match self.handle {
            Boundary::Start => self.original_start,
            Boundary::End => self.original_end,
        }
    }
}

/// Resize state machine. At most one session at a time.
#[derive(Debug)]
pub struct DragResizeController {
    session: Option<DragSession>,
    preview: Option<DragPreview>,
    emitter: EventEmitter,
}

impl DragResizeController {
    pub fn new(emitter: EventEmitter) -> Self {
        Self {
            session: None,
            preview: None,
            emitter,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn preview(&self) -> Option<&DragPreview> {
        self.preview.as_ref()
    }

    /// Pointer-down on a handle. Returns false (no session) for an unknown id.
    ///
    /// Starting while already dragging is not a supported transition; the
    /// running session is kept and the new request refused.
    pub fn begin(&mut self, store: &ItemStore, item_id: ItemId, handle: Boundary, pointer: Pointer) -> bool {
        if let Some(active) = &self.session {
            warn!(
                "Drag on {} requested while {} is being dragged, ignoring",
                item_id, active.item_id
            );
            return false;
        }
        let Some(item) = store.get(item_id) else {
            debug!("Drag start on unknown item {}, ignoring", item_id);
            return false;
        };

        debug!(
            "[DRAG] begin {} '{}' handle={} at ({}, {}) range={}..{}",
            item_id,
            item.name,
            handle.as_str(),
            pointer.x,
            pointer.y,
            item.start,
            item.end
        );
        self.session = Some(DragSession {
            item_id,
            handle,
            original_start: item.start,
            original_end: item.end,
            pointer_origin: pointer,
            accumulated_px: 0.0,
            last_x: pointer.x,
            _capture: PointerCapture::acquire(&self.emitter, item_id, handle),
        });
        self.set_preview(Some(DragPreview {
            start: item.start,
            end: item.end,
            name: item.name.clone(),
        }));
        true
    }

    /// Pointer moved while dragging. Moves must arrive in delivery order.
    pub fn pointer_move(&mut self, store: &mut ItemStore, pointer: Pointer, geometry: GridGeometry) -> DragUpdate {
        let Some(session) = self.session.as_mut() else {
            return DragUpdate::Ignored;
        };

        debug_assert!(geometry.columns > 0, "drag move with zero-column grid");
        let accumulated_px = session.accumulated_px + (pointer.x - session.last_x);
        let Some(day_delta) = geometry.pixels_to_columns(accumulated_px) else {
            warn!("Drag move ignored: degenerate grid {:?}", geometry);
            return DragUpdate::Ignored;
        };
        session.accumulated_px = accumulated_px;
        session.last_x = pointer.x;

        let Some(candidate) = shift_days(session.original(), day_delta) else {
            return DragUpdate::Rejected;
        };
        let Some(current) = store.get(session.item_id) else {
            warn!("Dragged item {} vanished from store", session.item_id);
            return DragUpdate::Ignored;
        };

        let valid = match session.handle {
            Boundary::Start => candidate < current.end,
            Boundary::End => candidate > current.start,
        };
        if !valid {
            trace!("[DRAG] {} candidate {} rejected", session.item_id, candidate);
            return DragUpdate::Rejected;
        }
        if current.boundary(session.handle) == candidate {
            return DragUpdate::Unchanged;
        }

        let item_id = session.item_id;
        let handle = session.handle;
        if !store.set_boundary(item_id, handle, candidate) {
            return DragUpdate::Rejected;
        }
        let Some(item) = store.get(item_id) else {
            return DragUpdate::Ignored;
        };
        let (start, end) = (item.start, item.end);
        let name = item.name.clone();

        debug!("[DRAG] {} {} -> {} ({} days)", item_id, handle.as_str(), candidate, day_delta);
        self.emitter.emit(ItemResizedEvent { item_id, start, end });
        self.set_preview(Some(DragPreview { start, end, name }));
        DragUpdate::Accepted { start, end }
    }

    /// Pointer-up: end the session, keeping the last accepted value.
    pub fn release(&mut self) -> Option<ItemId> {
        self.finish(DragEndReason::Released)
    }

    /// Abort the gesture. Accepted steps stay committed.
    pub fn cancel(&mut self) -> Option<ItemId> {
        self.finish(DragEndReason::Cancelled)
    }

    fn finish(&mut self, reason: DragEndReason) -> Option<ItemId> {
        let session = self.session.take()?;
        let item_id = session.item_id;
        debug!("[DRAG] end {} ({:?})", item_id, reason);
        // Capture guard goes first so release precedes the end notification
        drop(session);
        self.set_preview(None);
        self.emitter.emit(DragEndedEvent { item_id, reason });
        Some(item_id)
    }

    fn set_preview(&mut self, preview: Option<DragPreview>) {
        if self.preview != preview {
            self.preview = preview;
            self.emitter.emit(DragPreviewChangedEvent(self.preview.clone()));
        }
    }
}

fn shift_days(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64))
    } else {
        date.checked_sub_days(Days::new(delta.unsigned_abs()))
    }
}
