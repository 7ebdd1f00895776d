//! The arena that owns every node of one document.

use std::collections::HashMap;
use std::rc::Rc;

use quire_common::Locator;
use quire_properties::PropertyList;

use crate::kind::NodeKind;
use crate::node::{FoNode, NodeData, NodeId, NodeState, TextRun};

/// Arena-based formatting-object tree with O(1) node access and traversal.
///
/// All nodes live in one contiguous vector and refer to each other by
/// [`NodeId`]. The document node is always at [`NodeId::ROOT`]; `fo:root`
/// is its only element child.
#[derive(Debug, Clone)]
pub struct FoTree {
    nodes: Vec<FoNode>,
    /// First and last text run of each block-like node.
    text_chains: HashMap<NodeId, (NodeId, NodeId)>,
}

impl FoTree {
    /// Create a tree holding just the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![FoNode::new(NodeKind::Document, NodeData::Document)],
            text_chains: HashMap::new(),
        }
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&FoNode> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut FoNode> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes, including the document node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Move `node` into the arena and return its id. The node is not yet
    /// attached to the tree.
    pub fn alloc(&mut self, node: FoNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`, updating all links.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Create a text run under `parent` and link it after the last run of
    /// the nearest block-like ancestor (or `parent` itself).
    pub fn append_text(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
        locator: Option<Locator>,
    ) -> NodeId {
        let block = self.nearest_block(parent);
        let mut run = TextRun::new(text);
        run.block = block;

        let node = FoNode::new(NodeKind::Text, NodeData::Text(run)).with_locator(locator);
        let id = self.alloc(node);
        self.append_child(parent, id);

        if let Some(block) = block {
            match self.text_chains.get(&block).copied() {
                Some((head, tail)) => {
                    if let Some(NodeData::Text(prev)) = self.get_mut(tail).map(|n| &mut n.data) {
                        prev.next_in_block = Some(id);
                    }
                    if let Some(NodeData::Text(run)) = self.get_mut(id).map(|n| &mut n.data) {
                        run.prev_in_block = Some(tail);
                    }
                    let _ = self.text_chains.insert(block, (head, id));
                }
                None => {
                    let _ = self.text_chains.insert(block, (id, id));
                }
            }
        }
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// The kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(|n| n.kind)
    }

    /// The property list of a node.
    #[must_use]
    pub fn properties(&self, id: NodeId) -> Option<&Rc<PropertyList>> {
        self.get(id).and_then(|n| n.properties.as_ref())
    }

    /// Get text content if this node is a text run.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.text_run(id).map(|run| run.text.as_str())
    }

    /// The text run, if this node is one.
    #[must_use]
    pub fn text_run(&self, id: NodeId) -> Option<&TextRun> {
        self.get(id).and_then(FoNode::text_run)
    }

    /// Replace the characters of a text run. Other nodes are left alone.
    pub fn set_text(&mut self, id: NodeId, text: String) {
        if let Some(NodeData::Text(run)) = self.get_mut(id).map(|n| &mut n.data) {
            run.text = text;
        }
    }

    /// Mark a node closed.
    pub fn close(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.state = NodeState::Closed;
        }
    }

    /// Check if `ancestor` is a proper ancestor of `descendant`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to document.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and its descendants in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: vec![id],
        }
    }

    /// The node itself if it is block-like, else its nearest block-like
    /// ancestor.
    #[must_use]
    pub fn nearest_block(&self, id: NodeId) -> Option<NodeId> {
        core::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&node| self.kind(node).is_some_and(NodeKind::is_block_like))
    }

    /// Iterate over the text runs chained to a block-like node, first to last.
    #[must_use]
    pub fn runs_in_block(&self, block: NodeId) -> RunIterator<'_> {
        RunIterator {
            tree: self,
            current: self.text_chains.get(&block).map(|&(head, _)| head),
        }
    }

    /// `fo:root`, once it has been appended.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.kind(id) == Some(NodeKind::Root))
            .copied()
    }

    /// Concatenated text of every run below `id`, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.as_text(node))
            .collect()
    }

    /// Ids of every node of `kind`, in document order.
    #[must_use]
    pub fn find_all(&self, kind: NodeKind) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .filter(|&id| self.kind(id) == Some(kind))
            .collect()
    }
}

impl Default for FoTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a FoTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a sub-tree.
pub struct DescendantIterator<'a> {
    tree: &'a FoTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterator over the text runs of one block.
pub struct RunIterator<'a> {
    tree: &'a FoTree,
    current: Option<NodeId>,
}

impl Iterator for RunIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.text_run(id).and_then(|run| run.next_in_block);
        Some(id)
    }
}
