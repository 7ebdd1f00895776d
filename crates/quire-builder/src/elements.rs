//! Element factories.
//!
//! The builder never matches on element names itself. Each
//! `(namespace, local-name)` pair maps to a factory closure that produces
//! the node for that element; a namespace can also have a catch-all factory
//! for every local name in it (how SVG and MathML are captured).

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use quire_fotree::{FO_NAMESPACE, FoNode, NodeData, NodeKind, XmlElement};
use strum::IntoEnumIterator;

/// The SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// The `MathML` namespace URI.
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Creates a detached node for an element with the given local name.
pub type ElementFactory = Arc<dyn Fn(&str) -> FoNode + Send + Sync>;

/// Immutable table from element names to factories.
#[derive(Clone, Default)]
pub struct ElementRegistry {
    elements: HashMap<(String, String), ElementFactory>,
    namespaces: HashMap<String, ElementFactory>,
}

impl ElementRegistry {
    /// A registry with no factories at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every formatting object of the catalog, plus SVG and `MathML` as
    /// foreign content.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in NodeKind::iter().filter(|kind| kind.is_formatting_object()) {
            registry = registry.with_element(
                FO_NAMESPACE,
                kind.name(),
                Arc::new(move |_: &str| FoNode::new(kind, NodeData::FormattingObject)),
            );
        }
        registry
            .with_foreign_namespace(SVG_NAMESPACE)
            .with_foreign_namespace(MATHML_NAMESPACE)
    }

    /// The standard registry, built once per process.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ElementRegistry>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::standard())))
    }

    /// Register a factory for one element.
    #[must_use]
    pub fn with_element(
        mut self,
        namespace: &str,
        local_name: &str,
        factory: ElementFactory,
    ) -> Self {
        let _ = self
            .elements
            .insert((namespace.to_string(), local_name.to_string()), factory);
        self
    }

    /// Register a factory for every element of a namespace without its own
    /// entry.
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str, factory: ElementFactory) -> Self {
        let _ = self.namespaces.insert(namespace.to_string(), factory);
        self
    }

    /// Treat every element of `namespace` as foreign content.
    #[must_use]
    pub fn with_foreign_namespace(self, namespace: &str) -> Self {
        let uri = namespace.to_string();
        self.with_namespace(
            namespace,
            Arc::new(move |local_name: &str| {
                FoNode::new(
                    NodeKind::Foreign,
                    NodeData::Foreign(XmlElement::new(uri.clone(), local_name)),
                )
            }),
        )
    }

    /// The factory for an element, if any.
    #[must_use]
    pub fn lookup(&self, namespace: &str, local_name: &str) -> Option<&ElementFactory> {
        self.elements
            .get(&(namespace.to_string(), local_name.to_string()))
            .or_else(|| self.namespaces.get(namespace))
    }

    /// Create the node for an element. Elements nobody registered become
    /// [`NodeKind::Unknown`] placeholders.
    #[must_use]
    pub fn create(&self, namespace: &str, local_name: &str) -> FoNode {
        self.lookup(namespace, local_name).map_or_else(
            || {
                FoNode::new(
                    NodeKind::Unknown,
                    NodeData::Unknown {
                        namespace: namespace.to_string(),
                        local_name: local_name.to_string(),
                    },
                )
            },
            |factory| factory(local_name),
        )
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("elements", &self.elements.len())
            .field("namespaces", &self.namespaces.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = ElementRegistry::standard();
        assert_eq!(registry.create(FO_NAMESPACE, "block").kind, NodeKind::Block);
        assert_eq!(
            registry.create(FO_NAMESPACE, "table-cell").kind,
            NodeKind::TableCell
        );
        assert_eq!(registry.create(SVG_NAMESPACE, "rect").kind, NodeKind::Foreign);
        assert_eq!(
            registry.create(FO_NAMESPACE, "paragraph").kind,
            NodeKind::Unknown
        );
        assert_eq!(
            registry.create("urn:other", "thing").kind,
            NodeKind::Unknown
        );
    }

    #[test]
    fn test_custom_factory_overrides_namespace() {
        let registry = ElementRegistry::empty()
            .with_foreign_namespace("urn:ext")
            .with_element(
                "urn:ext",
                "inline",
                Arc::new(|_: &str| FoNode::new(NodeKind::Inline, NodeData::FormattingObject)),
            );
        assert_eq!(registry.create("urn:ext", "inline").kind, NodeKind::Inline);
        assert_eq!(registry.create("urn:ext", "other").kind, NodeKind::Foreign);
    }
}
