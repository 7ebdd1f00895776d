//! What the builder hands downstream.
//!
//! Layout consumes the tree incrementally through [`FoEventHandler`], and
//! the finished [`FoDocument`] carries the tree together with the side
//! registries collected while building it.

use std::collections::{BTreeMap, BTreeSet};

use quire_common::ValidationEvent;
use quire_fotree::{FoTree, NodeId, NodeKind};
use quire_properties::{PropertyId, PropertyList};
use serde::Serialize;

/// Downstream receiver of tree-construction progress.
///
/// Nodes are complete (properties bound, children present) by the time
/// [`FoEventHandler::end_node`] is called for them.
pub trait FoEventHandler {
    /// The document begins.
    fn start_document(&mut self) {}

    /// The document is complete.
    fn end_document(&mut self) {}

    /// `node` was appended and its properties bound.
    fn start_node(&mut self, kind: NodeKind, node: NodeId, tree: &FoTree) {
        let _ = (kind, node, tree);
    }

    /// `node` and its whole sub-tree are complete.
    fn end_node(&mut self, kind: NodeKind, node: NodeId, tree: &FoTree) {
        let _ = (kind, node, tree);
    }

    /// A text run was created.
    fn characters(&mut self, node: NodeId, tree: &FoTree) {
        let _ = (node, tree);
    }
}

/// Ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandler;

impl FoEventHandler for NullHandler {}

/// One notification seen by a [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Notification {
    /// [`FoEventHandler::start_document`]
    StartDocument,
    /// [`FoEventHandler::end_document`]
    EndDocument,
    /// [`FoEventHandler::start_node`]
    StartNode {
        /// Kind of the node.
        kind: NodeKind,
        /// The node.
        node: NodeId,
    },
    /// [`FoEventHandler::end_node`]
    EndNode {
        /// Kind of the node.
        kind: NodeKind,
        /// The node.
        node: NodeId,
    },
    /// [`FoEventHandler::characters`]
    Characters {
        /// The text run.
        node: NodeId,
        /// Its text when the run was created.
        text: String,
    },
}

/// Records every notification in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingHandler {
    notifications: Vec<Notification>,
}

impl RecordingHandler {
    /// An empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notifications: Vec::new(),
        }
    }

    /// Notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}

impl FoEventHandler for RecordingHandler {
    fn start_document(&mut self) {
        self.notifications.push(Notification::StartDocument);
    }

    fn end_document(&mut self) {
        self.notifications.push(Notification::EndDocument);
    }

    fn start_node(&mut self, kind: NodeKind, node: NodeId, _tree: &FoTree) {
        self.notifications.push(Notification::StartNode { kind, node });
    }

    fn end_node(&mut self, kind: NodeKind, node: NodeId, _tree: &FoTree) {
        self.notifications.push(Notification::EndNode { kind, node });
    }

    fn characters(&mut self, node: NodeId, tree: &FoTree) {
        let text = tree.as_text(node).unwrap_or_default().to_string();
        self.notifications.push(Notification::Characters { node, text });
    }
}

/// [§ 7.30.8 "id"](https://www.w3.org/TR/xsl11/)
///
/// "An identifier unique within all objects in the result tree with the fo:
/// namespace."
///
/// Records every `id` defined and every `ref-id` referenced.
#[derive(Debug, Default, Clone, Serialize)]
pub struct IdRegistry {
    defined: BTreeMap<String, NodeId>,
    referenced: BTreeSet<String>,
}

impl IdRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            defined: BTreeMap::new(),
            referenced: BTreeSet::new(),
        }
    }

    /// Record that `node` defines `id`.
    ///
    /// # Errors
    /// Returns the node that already defines `id`; the first definition is
    /// kept.
    pub fn define(&mut self, id: &str, node: NodeId) -> Result<(), NodeId> {
        if let Some(&existing) = self.defined.get(id) {
            return Err(existing);
        }
        let _ = self.defined.insert(id.to_string(), node);
        Ok(())
    }

    /// Record a reference to `id`.
    pub fn reference(&mut self, id: &str) {
        let _ = self.referenced.insert(id.to_string());
    }

    /// The node defining `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.defined.get(id).copied()
    }

    /// Every defined id, sorted.
    pub fn defined(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.defined.iter().map(|(id, &node)| (id.as_str(), node))
    }

    /// Every referenced id, sorted.
    pub fn referenced(&self) -> impl Iterator<Item = &str> {
        self.referenced.iter().map(String::as_str)
    }

    /// References with no matching definition, sorted.
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        self.referenced
            .iter()
            .filter(|id| !self.defined.contains_key(*id))
            .map(String::as_str)
            .collect()
    }
}

/// One font a document needs: the family, style, weight and size triplet
/// layout asks font metrics for.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FontTriplet {
    /// `font-family` as specified.
    pub family: String,
    /// `font-style` keyword.
    pub style: String,
    /// `font-weight`, 100 to 900.
    pub weight: u16,
    /// `font-size` in millipoints.
    pub size: i64,
}

impl FontTriplet {
    /// The triplet resolved on `list`, if all four properties resolve.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resolve(list: &PropertyList) -> Option<Self> {
        let family = list.get(PropertyId::FontFamily).ok()?.to_string();
        let style = list.get(PropertyId::FontStyle).ok()?.to_string();
        let weight = list
            .get(PropertyId::FontWeight)
            .ok()?
            .as_number()?
            .clamp(100.0, 900.0) as u16;
        let size = list
            .get(PropertyId::FontSize)
            .ok()?
            .as_numeric_length()?
            .millipoints()?;
        Some(Self {
            family,
            style,
            weight,
            size,
        })
    }
}

/// Every distinct font used by text-bearing nodes.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FontRegistry {
    fonts: BTreeSet<FontTriplet>,
}

impl FontRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fonts: BTreeSet::new(),
        }
    }

    /// Record the font in effect on `list`. Returns true if it was new.
    pub fn record(&mut self, list: &PropertyList) -> bool {
        FontTriplet::resolve(list).is_some_and(|font| self.fonts.insert(font))
    }

    /// Number of distinct fonts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns true if no font was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// The fonts, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &FontTriplet> {
        self.fonts.iter()
    }
}

/// The result of building one document.
#[derive(Debug, Clone)]
pub struct FoDocument {
    /// The node tree.
    pub tree: FoTree,
    /// Every event reported while building, in order.
    pub events: Vec<ValidationEvent>,
    /// Ids and id references.
    pub ids: IdRegistry,
    /// Fonts used by text.
    pub fonts: FontRegistry,
}

impl FoDocument {
    /// `fo:root`.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.tree.document_element()
    }

    /// Events of at least error severity.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationEvent> {
        self.events.iter().filter(|event| event.is_error())
    }
}
