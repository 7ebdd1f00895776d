//! The markup event interface.
//!
//! Any namespace-aware XML reader can drive a builder by calling these
//! methods in document order. The builder never parses markup itself.

use quire_common::Locator;

use crate::error::BuildError;

/// One attribute of a start-element event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name as written, including any prefix: `font-size`, `fox:alt-text`.
    pub qualified_name: String,
    /// Namespace URI of the attribute, empty when unprefixed.
    pub namespace: String,
    /// Value with entities already expanded.
    pub value: String,
}

impl Attribute {
    /// An unprefixed attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            qualified_name: name.into(),
            namespace: String::new(),
            value: value.into(),
        }
    }

    /// A namespaced attribute.
    pub fn namespaced(
        namespace: impl Into<String>,
        qualified_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            namespace: namespace.into(),
            value: value.into(),
        }
    }

    /// The part of the name after any prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        self.qualified_name
            .rsplit_once(':')
            .map_or(self.qualified_name.as_str(), |(_, local)| local)
    }
}

/// Receiver of markup events.
///
/// Events arrive in document order. Element events carry the resolved
/// namespace URI and the local name; prefixes are the reader's business.
pub trait ContentHandler {
    /// What a successful document produces.
    type Output;

    /// Where the next event comes from. Readers that track positions call
    /// this before each event.
    fn set_locator(&mut self, locator: Locator) {
        let _ = locator;
    }

    /// The document begins.
    ///
    /// # Errors
    /// Implementations reject a second document.
    fn start_document(&mut self) -> Result<(), BuildError>;

    /// An element begins.
    ///
    /// # Errors
    /// Fatal structural, property or event-stream problems.
    fn start_element(
        &mut self,
        namespace: &str,
        local_name: &str,
        attributes: &[Attribute],
    ) -> Result<(), BuildError>;

    /// Character data. A single text node may arrive in several calls.
    ///
    /// # Errors
    /// Fatal structural problems.
    fn characters(&mut self, text: &str) -> Result<(), BuildError>;

    /// An element ends.
    ///
    /// # Errors
    /// Mismatched tags and fatal content-model violations.
    fn end_element(&mut self, namespace: &str, local_name: &str) -> Result<(), BuildError>;

    /// The document ends.
    ///
    /// # Errors
    /// Unclosed elements or an earlier fatal error.
    fn end_document(&mut self) -> Result<Self::Output, BuildError>;
}
