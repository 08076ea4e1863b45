//! Timeline events published on the EventBus.

use chrono::NaiveDate;

use super::window::Window;
use crate::entities::{Boundary, ItemId};

/// Drag session took ownership of pointer move/release input.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerCapturedEvent {
    pub item_id: ItemId,
    pub handle: Boundary,
}

/// Pointer move/release input returned to the host. Always follows a capture.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerReleasedEvent {
    pub item_id: ItemId,
}

/// An accepted drag step replaced one boundary of an item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemResizedEvent {
    pub item_id: ItemId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Live tooltip value changed (`None` once the drag is over).
#[derive(Clone, Debug, PartialEq)]
pub struct DragPreviewChangedEvent(pub Option<super::drag::DragPreview>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEndReason {
    Released,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragEndedEvent {
    pub item_id: ItemId,
    pub reason: DragEndReason,
}

/// Visible window moved or changed granularity.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowChangedEvent(pub Window);
