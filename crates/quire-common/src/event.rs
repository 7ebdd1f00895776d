//! Validation events.
//!
//! Structural violations and property-resolution problems are raised through
//! a single reporting channel. Each [`ValidationEvent`] carries a severity, a
//! human-readable description, the offending node and property names, and
//! the source location when the event source provided one. The caller decides
//! whether to keep processing ([`ValidationMode::Lenient`]) or abort
//! ([`ValidationMode::Strict`]).

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

/// How bad an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Something was ignored or substituted; output is still meaningful.
    Warning,
    /// The document is not valid; output may be degraded.
    Error,
    /// Processing cannot continue.
    Fatal,
}

/// Which part of the pipeline produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    /// Illegal child, missing required child, out-of-order child.
    Structural,
    /// Unparsable value, unknown keyword, failed computation.
    Property,
    /// Malformed input: mismatched tags, premature end.
    EventStream,
    /// An element no registered factory knows about.
    UnknownNode,
    /// Duplicate or dangling `id`/`ref-id`.
    IdReference,
}

/// Source position of an event, as reported by the markup event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Locator {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Locator {
    /// Create a locator for `line`:`column`.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Whether structural and property violations abort the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum ValidationMode {
    /// Violations are fatal.
    Strict,
    /// Violations are reported and processing continues, best-effort.
    #[default]
    Lenient,
}

impl ValidationMode {
    /// Returns true for [`ValidationMode::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationEvent {
    /// How bad it is.
    pub severity: Severity,
    /// Where it came from.
    pub kind: EventKind,
    /// Human-readable description.
    pub description: String,
    /// Offending node, e.g. `fo:block`.
    pub node_name: Option<String>,
    /// Offending property, e.g. `space-before.minimum`.
    pub property_name: Option<String>,
    /// Source location, when known.
    pub locator: Option<Locator>,
}

impl ValidationEvent {
    /// Create an event with no node, property or location attached.
    pub fn new(severity: Severity, kind: EventKind, description: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            description: description.into(),
            node_name: None,
            property_name: None,
            locator: None,
        }
    }

    /// Attach the offending node name.
    #[must_use]
    pub fn with_node(mut self, node_name: impl Into<String>) -> Self {
        self.node_name = Some(node_name.into());
        self
    }

    /// Attach the offending property name.
    #[must_use]
    pub fn with_property(mut self, property_name: impl Into<String>) -> Self {
        self.property_name = Some(property_name.into());
        self
    }

    /// Attach a source location.
    #[must_use]
    pub const fn with_locator(mut self, locator: Option<Locator>) -> Self {
        self.locator = locator;
        self
    }

    /// Returns true if the event is at least [`Severity::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for ValidationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.severity, self.kind)?;
        if let Some(locator) = &self.locator {
            write!(f, " at {locator}")?;
        }
        if let Some(node) = &self.node_name {
            write!(f, " on {node}")?;
        }
        if let Some(property) = &self.property_name {
            write!(f, " [{property}]")?;
        }
        write!(f, ": {}", self.description)
    }
}

/// Receiver side of the reporting channel.
pub trait EventListener {
    /// Called once for every event, in the order events are raised.
    fn handle(&mut self, event: &ValidationEvent);
}

/// Forwards events to the `log` facade at a level matching their severity.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl EventListener for LoggingListener {
    fn handle(&mut self, event: &ValidationEvent) {
        match event.severity {
            Severity::Info => log::info!(target: "quire", "{event}"),
            Severity::Warning => log::warn!(target: "quire", "{event}"),
            Severity::Error | Severity::Fatal => log::error!(target: "quire", "{event}"),
        }
    }
}

/// Keeps every event for later inspection.
#[derive(Debug, Default, Clone)]
pub struct CollectingListener {
    events: Vec<ValidationEvent>,
}

impl CollectingListener {
    /// Create an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events received so far.
    #[must_use]
    pub fn events(&self) -> &[ValidationEvent] {
        &self.events
    }

    /// Consume the collector and return its events.
    #[must_use]
    pub fn into_events(self) -> Vec<ValidationEvent> {
        self.events
    }
}

impl EventListener for CollectingListener {
    fn handle(&mut self, event: &ValidationEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = ValidationEvent::new(
            Severity::Error,
            EventKind::Structural,
            "fo:flow is not a valid child of fo:root",
        )
        .with_node("fo:root")
        .with_locator(Some(Locator::new(3, 7)));

        assert_eq!(
            event.to_string(),
            "error (structural) at 3:7 on fo:root: fo:flow is not a valid child of fo:root"
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Fatal > Severity::Error);
        assert!(Severity::Error > Severity::Warning);
        assert!(ValidationEvent::new(Severity::Fatal, EventKind::EventStream, "x").is_error());
        assert!(!ValidationEvent::new(Severity::Warning, EventKind::Property, "x").is_error());
    }

    #[test]
    fn test_collecting_listener() {
        let mut listener = CollectingListener::new();
        listener.handle(&ValidationEvent::new(
            Severity::Warning,
            EventKind::UnknownNode,
            "unknown element",
        ));
        assert_eq!(listener.events().len(), 1);
        assert_eq!(listener.into_events()[0].kind, EventKind::UnknownNode);
    }
}
