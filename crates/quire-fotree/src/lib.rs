//! Formatting-object tree for quire.
//!
//! This crate provides the arena-based node tree that the builder fills in
//! and layout later walks. It follows the object model of
//! [XSL 1.1 § 6](https://www.w3.org/TR/xsl11/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Each formatting object shares its [`PropertyList`] through an
//! `Rc`, since child lists hold a pointer to their parent's list.
//!
//! [`PropertyList`]: quire_properties::PropertyList

pub mod foreign;
pub mod kind;
pub mod node;
pub mod text;
pub mod tree;

pub use foreign::{XmlAttribute, XmlContent, XmlElement};
pub use kind::{FO_NAMESPACE, NodeKind};
pub use node::{FoNode, NodeData, NodeId, NodeState, TextRun};
pub use text::apply_text_transform;
pub use tree::{AncestorIterator, DescendantIterator, FoTree, RunIterator};
