//! Nodes of the formatting-object tree.

use std::rc::Rc;

use quire_common::Locator;
use quire_properties::PropertyList;
use serde::Serialize;

use crate::foreign::XmlElement;
use crate::kind::NodeKind;

/// A type-safe index into the [`FoTree`](crate::FoTree) arena.
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Whether the builder has seen a node's end event yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    /// Children may still be appended.
    #[default]
    Open,
    /// The node is complete.
    Closed,
}

/// A run of character data.
///
/// Runs are linked to the previous and next run inside the same block-like
/// ancestor so that text-transform can look across run boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextRun {
    /// The characters of this run.
    pub text: String,
    /// The nearest block-like ancestor, if there is one.
    pub block: Option<NodeId>,
    /// The previous run in the same block.
    pub prev_in_block: Option<NodeId>,
    /// The next run in the same block.
    pub next_in_block: Option<NodeId>,
}

impl TextRun {
    /// A detached run holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Number of characters (not bytes) in the run.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Kind-specific payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The document node.
    Document,
    /// A formatting object; everything it knows lives in its property list.
    FormattingObject,
    /// A text run.
    Text(TextRun),
    /// A foreign element and its captured sub-tree.
    Foreign(XmlElement),
    /// Placeholder for an element nothing recognised.
    Unknown {
        /// Namespace URI of the element.
        namespace: String,
        /// Local name of the element.
        local_name: String,
    },
}

/// One node of the tree.
///
/// Relationships are stored as [`NodeId`]s so traversal in any direction is
/// O(1) and the tree owns every node.
#[derive(Debug, Clone)]
pub struct FoNode {
    /// What the node is.
    pub kind: NodeKind,
    /// Kind-specific payload.
    pub data: NodeData,
    /// The parent node. `None` only for the document node and detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,
    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
    /// Resolved properties; formatting objects and placeholders only.
    pub properties: Option<Rc<PropertyList>>,
    /// Where the start event was seen.
    pub locator: Option<Locator>,
    /// Open until the end event has been processed.
    pub state: NodeState,
}

impl FoNode {
    /// A detached, open node.
    #[must_use]
    pub const fn new(kind: NodeKind, data: NodeData) -> Self {
        Self {
            kind,
            data,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            properties: None,
            locator: None,
            state: NodeState::Open,
        }
    }

    /// Attach a property list.
    #[must_use]
    pub fn with_properties(mut self, properties: Rc<PropertyList>) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Attach a source location.
    #[must_use]
    pub const fn with_locator(mut self, locator: Option<Locator>) -> Self {
        self.locator = locator;
        self
    }

    /// The name used in messages: `fo:block`, `svg:svg`-style local names
    /// for foreign and unknown elements, `#text` for text.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.data {
            NodeData::Foreign(element) => element.local_name.clone(),
            NodeData::Unknown { local_name, .. } => local_name.clone(),
            NodeData::Document | NodeData::FormattingObject | NodeData::Text(_) => {
                self.kind.qualified_name()
            }
        }
    }

    /// The text run, if this is a text node.
    #[must_use]
    pub const fn text_run(&self) -> Option<&TextRun> {
        match &self.data {
            NodeData::Text(run) => Some(run),
            _ => None,
        }
    }
}
