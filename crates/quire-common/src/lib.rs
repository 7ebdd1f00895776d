//! Common utilities for quire.
//!
//! This crate provides shared infrastructure used by all quire components:
//! - **Warning System** - deduplicated warnings routed through the `log` facade
//! - **Validation Events** - the single reporting channel for structural and
//!   property-resolution problems

pub mod event;
pub mod warning;

pub use event::{
    CollectingListener, EventKind, EventListener, Locator, LoggingListener, Severity,
    ValidationEvent, ValidationMode,
};
