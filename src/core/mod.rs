//! Core infrastructure shared by widgets and the host application.

pub mod event_bus;

pub use event_bus::EventBus;
