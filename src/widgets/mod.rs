//! UI Widgets - timeline logic and its terminal rendering
//!
//! Widgets publish interaction results via EventBus

pub mod timeline;
