//! Tree construction errors.

use quire_common::ValidationEvent;
use quire_properties::PropertyError;
use thiserror::Error;

/// Why a document could not be built.
///
/// In lenient mode only [`BuildError::EventStream`], [`BuildError::Reuse`]
/// and [`BuildError::Cancelled`] stop the builder; structural and property
/// problems are reported and skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A content-model violation, fatal in strict mode.
    #[error("{0}")]
    Structural(ValidationEvent),

    /// A property could not be bound, fatal in strict mode.
    #[error("property error on {node}: {source}")]
    Property {
        /// The element the attribute belongs to, e.g. `fo:block`.
        node: String,
        /// The underlying resolution failure.
        #[source]
        source: PropertyError,
    },

    /// The event sequence itself is malformed: mismatched or unclosed tags.
    #[error("malformed event stream: {0}")]
    EventStream(String),

    /// `start_document` on a builder that has already been used.
    #[error("a tree builder consumes exactly one document")]
    Reuse,

    /// The build stopped after an earlier fatal error or an external cancel.
    #[error("tree construction was cancelled")]
    Cancelled,
}
