//! Content models of the formatting objects.
//!
//! [§ 6.2 Formatting Object Content](https://www.w3.org/TR/xsl11/)
//!
//! "The content of a formatting object is described using XML content-model
//! syntax."
//!
//! Each check works on the children already in the tree, so it runs as a
//! child is about to be appended ([`validate_child`]) and again when its
//! parent ends ([`check_end`]).

use core::fmt;

use quire_fotree::{FoTree, NodeId, NodeKind};
use strum_macros::Display;

/// What is wrong with a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ViolationKind {
    /// The child may not appear in this parent at all.
    InvalidChild,
    /// The child may appear, but not at this position.
    OutOfOrder,
    /// The child may appear only once (or a bounded number of times).
    TooMany,
    /// A required child never appeared.
    MissingChild,
}

/// A content-model violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// What went wrong.
    pub kind: ViolationKind,
    /// The parent's element name.
    pub parent: String,
    /// The offending or missing child's element name.
    pub child: String,
}

impl Violation {
    fn new(kind: ViolationKind, parent: NodeKind, child: impl Into<String>) -> Self {
        Self {
            kind,
            parent: parent.qualified_name(),
            child: child.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            kind,
            parent,
            child,
        } = self;
        match kind {
            ViolationKind::InvalidChild => write!(f, "{child} is not a valid child of {parent}"),
            ViolationKind::OutOfOrder => write!(f, "{child} is out of order in {parent}"),
            ViolationKind::TooMany => write!(f, "{parent} may not contain another {child}"),
            ViolationKind::MissingChild => write!(f, "{parent} is missing a required {child}"),
        }
    }
}

/// `%block;` in the XSL content models.
const fn is_block(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Block | NodeKind::BlockContainer | NodeKind::Table | NodeKind::ListBlock
    )
}

/// `%inline;` in the XSL content models.
const fn is_inline(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Inline
            | NodeKind::InlineContainer
            | NodeKind::Character
            | NodeKind::Leader
            | NodeKind::PageNumber
            | NodeKind::PageNumberCitation
            | NodeKind::BasicLink
            | NodeKind::ExternalGraphic
            | NodeKind::InstreamForeignObject
            | NodeKind::Footnote
    )
}

/// `%neutral;`: allowed wherever `#PCDATA`, `%inline;` or `%block;` is.
const fn is_neutral(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Wrapper | NodeKind::RetrieveMarker)
}

/// Kinds whose content model begins with `(marker)*`.
const fn accepts_markers(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Flow
            | NodeKind::Block
            | NodeKind::BlockContainer
            | NodeKind::Inline
            | NodeKind::InlineContainer
            | NodeKind::Wrapper
            | NodeKind::BasicLink
            | NodeKind::ListBlock
            | NodeKind::ListItem
            | NodeKind::ListItemLabel
            | NodeKind::ListItemBody
            | NodeKind::Table
            | NodeKind::TableHeader
            | NodeKind::TableFooter
            | NodeKind::TableBody
            | NodeKind::TableRow
            | NodeKind::TableCell
    )
}

/// Returns true if character data (other than whitespace) may appear
/// directly in `kind`.
#[must_use]
pub const fn accepts_text(kind: NodeKind) -> bool {
    kind.accepts_text() || matches!(kind, NodeKind::Unknown)
}

fn child_kinds(tree: &FoTree, parent: NodeId) -> impl Iterator<Item = NodeKind> + '_ {
    tree.children(parent)
        .iter()
        .filter_map(|&id| tree.kind(id))
        .filter(|&kind| kind != NodeKind::Text)
}

fn count(tree: &FoTree, parent: NodeId, kind: NodeKind) -> usize {
    child_kinds(tree, parent).filter(|&k| k == kind).count()
}

fn any_of(tree: &FoTree, parent: NodeId, kinds: &[NodeKind]) -> bool {
    child_kinds(tree, parent).any(|k| kinds.contains(&k))
}

/// Check that a child of kind `child` may be appended to `parent` now.
///
/// Foreign and unknown children are accepted everywhere except where the
/// model is empty; their own problems are reported when they are created.
///
/// # Errors
/// The first violation found.
#[allow(clippy::match_same_arms)]
pub fn validate_child(tree: &FoTree, parent: NodeId, child: NodeKind) -> Result<(), Violation> {
    let Some(parent_kind) = tree.kind(parent) else {
        return Ok(());
    };
    let invalid = || Violation::new(ViolationKind::InvalidChild, parent_kind, child.qualified_name());
    let out_of_order =
        || Violation::new(ViolationKind::OutOfOrder, parent_kind, child.qualified_name());
    let too_many = || Violation::new(ViolationKind::TooMany, parent_kind, child.qualified_name());

    if parent_kind == NodeKind::Unknown {
        return Ok(());
    }

    if child == NodeKind::Marker {
        if !accepts_markers(parent_kind) {
            return Err(invalid());
        }
        if child_kinds(tree, parent).any(|k| k != NodeKind::Marker) {
            return Err(out_of_order());
        }
        return Ok(());
    }

    if matches!(child, NodeKind::Foreign | NodeKind::Unknown) {
        return match parent_kind {
            NodeKind::Document
            | NodeKind::Text
            | NodeKind::Foreign
            | NodeKind::Character
            | NodeKind::PageNumber
            | NodeKind::PageNumberCitation
            | NodeKind::ExternalGraphic
            | NodeKind::TableColumn
            | NodeKind::RegionBody
            | NodeKind::RegionBefore
            | NodeKind::RegionAfter
            | NodeKind::RegionStart
            | NodeKind::RegionEnd
            | NodeKind::SinglePageMasterReference
            | NodeKind::RepeatablePageMasterReference
            | NodeKind::RetrieveMarker => Err(invalid()),
            NodeKind::InstreamForeignObject
                if any_of(tree, parent, &[NodeKind::Foreign, NodeKind::Unknown]) =>
            {
                Err(too_many())
            }
            _ => Ok(()),
        };
    }

    let flow_content = is_block(child) || is_neutral(child);
    let mixed_content = is_block(child) || is_inline(child) || is_neutral(child);

    match parent_kind {
        NodeKind::Document => match child {
            NodeKind::Root if count(tree, parent, NodeKind::Root) > 0 => Err(too_many()),
            NodeKind::Root => Ok(()),
            _ => Err(invalid()),
        },
        // (layout-master-set, declarations?, page-sequence+)
        NodeKind::Root => match child {
            NodeKind::LayoutMasterSet if count(tree, parent, child) > 0 => Err(too_many()),
            NodeKind::LayoutMasterSet => Ok(()),
            NodeKind::Declarations if count(tree, parent, child) > 0 => Err(too_many()),
            NodeKind::Declarations | NodeKind::PageSequence
                if count(tree, parent, NodeKind::LayoutMasterSet) == 0 =>
            {
                Err(out_of_order())
            }
            NodeKind::Declarations if count(tree, parent, NodeKind::PageSequence) > 0 => {
                Err(out_of_order())
            }
            NodeKind::Declarations | NodeKind::PageSequence => Ok(()),
            _ => Err(invalid()),
        },
        NodeKind::Declarations => Err(invalid()),
        // (simple-page-master|page-sequence-master)+
        NodeKind::LayoutMasterSet => match child {
            NodeKind::SimplePageMaster | NodeKind::PageSequenceMaster => Ok(()),
            _ => Err(invalid()),
        },
        // (region-body, region-before?, region-after?, region-start?, region-end?)
        NodeKind::SimplePageMaster => match child {
            NodeKind::RegionBody
            | NodeKind::RegionBefore
            | NodeKind::RegionAfter
            | NodeKind::RegionStart
            | NodeKind::RegionEnd
                if count(tree, parent, child) > 0 =>
            {
                Err(too_many())
            }
            NodeKind::RegionBody => Ok(()),
            NodeKind::RegionBefore
            | NodeKind::RegionAfter
            | NodeKind::RegionStart
            | NodeKind::RegionEnd
                if count(tree, parent, NodeKind::RegionBody) == 0 =>
            {
                Err(out_of_order())
            }
            NodeKind::RegionBefore
            | NodeKind::RegionAfter
            | NodeKind::RegionStart
            | NodeKind::RegionEnd => Ok(()),
            _ => Err(invalid()),
        },
        // (single-page-master-reference|repeatable-page-master-reference)+
        NodeKind::PageSequenceMaster => match child {
            NodeKind::SinglePageMasterReference | NodeKind::RepeatablePageMasterReference => {
                Ok(())
            }
            _ => Err(invalid()),
        },
        // (title?, static-content*, flow)
        NodeKind::PageSequence => match child {
            NodeKind::Title if count(tree, parent, child) > 0 => Err(too_many()),
            NodeKind::Title
                if any_of(tree, parent, &[NodeKind::StaticContent, NodeKind::Flow]) =>
            {
                Err(out_of_order())
            }
            NodeKind::Flow if count(tree, parent, child) > 0 => Err(too_many()),
            NodeKind::StaticContent if count(tree, parent, NodeKind::Flow) > 0 => {
                Err(out_of_order())
            }
            NodeKind::Title | NodeKind::StaticContent | NodeKind::Flow => Ok(()),
            _ => Err(invalid()),
        },
        // (%block;)+
        NodeKind::Flow
        | NodeKind::StaticContent
        | NodeKind::BlockContainer
        | NodeKind::InlineContainer
        | NodeKind::ListItemLabel
        | NodeKind::ListItemBody
        | NodeKind::FootnoteBody
        | NodeKind::TableCell => {
            if flow_content {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        // (#PCDATA|%inline;|%block;)*
        NodeKind::Block
        | NodeKind::Inline
        | NodeKind::Wrapper
        | NodeKind::BasicLink
        | NodeKind::Marker => {
            if mixed_content {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        // (#PCDATA|%inline;)*
        NodeKind::Title | NodeKind::Leader => {
            if is_inline(child) || is_neutral(child) {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        // (list-item+)
        NodeKind::ListBlock => match child {
            NodeKind::ListItem => Ok(()),
            _ => Err(invalid()),
        },
        // (list-item-label, list-item-body)
        NodeKind::ListItem => match child {
            NodeKind::ListItemLabel | NodeKind::ListItemBody
                if count(tree, parent, child) > 0 =>
            {
                Err(too_many())
            }
            NodeKind::ListItemLabel if count(tree, parent, NodeKind::ListItemBody) > 0 => {
                Err(out_of_order())
            }
            NodeKind::ListItemBody if count(tree, parent, NodeKind::ListItemLabel) == 0 => {
                Err(out_of_order())
            }
            NodeKind::ListItemLabel | NodeKind::ListItemBody => Ok(()),
            _ => Err(invalid()),
        },
        // (table-column*, table-header?, table-footer?, table-body+)
        NodeKind::Table => match child {
            NodeKind::TableColumn
                if any_of(
                    tree,
                    parent,
                    &[
                        NodeKind::TableHeader,
                        NodeKind::TableFooter,
                        NodeKind::TableBody,
                    ],
                ) =>
            {
                Err(out_of_order())
            }
            NodeKind::TableHeader | NodeKind::TableFooter if count(tree, parent, child) > 0 => {
                Err(too_many())
            }
            NodeKind::TableHeader
                if any_of(tree, parent, &[NodeKind::TableFooter, NodeKind::TableBody]) =>
            {
                Err(out_of_order())
            }
            NodeKind::TableFooter if count(tree, parent, NodeKind::TableBody) > 0 => {
                Err(out_of_order())
            }
            NodeKind::TableColumn
            | NodeKind::TableHeader
            | NodeKind::TableFooter
            | NodeKind::TableBody => Ok(()),
            _ => Err(invalid()),
        },
        // (table-row+|table-cell+)
        NodeKind::TableHeader | NodeKind::TableFooter | NodeKind::TableBody => match child {
            NodeKind::TableRow if count(tree, parent, NodeKind::TableCell) > 0 => Err(invalid()),
            NodeKind::TableCell if count(tree, parent, NodeKind::TableRow) > 0 => Err(invalid()),
            NodeKind::TableRow | NodeKind::TableCell => Ok(()),
            _ => Err(invalid()),
        },
        // (table-cell+)
        NodeKind::TableRow => match child {
            NodeKind::TableCell => Ok(()),
            _ => Err(invalid()),
        },
        // (inline, footnote-body)
        NodeKind::Footnote => match child {
            NodeKind::Inline | NodeKind::FootnoteBody if count(tree, parent, child) > 0 => {
                Err(too_many())
            }
            NodeKind::Inline if count(tree, parent, NodeKind::FootnoteBody) > 0 => {
                Err(out_of_order())
            }
            NodeKind::FootnoteBody if count(tree, parent, NodeKind::Inline) == 0 => {
                Err(out_of_order())
            }
            NodeKind::Inline | NodeKind::FootnoteBody => Ok(()),
            _ => Err(invalid()),
        },
        // EMPTY, or content that is never interpreted.
        NodeKind::InstreamForeignObject
        | NodeKind::Text
        | NodeKind::Foreign
        | NodeKind::Unknown
        | NodeKind::Character
        | NodeKind::PageNumber
        | NodeKind::PageNumberCitation
        | NodeKind::ExternalGraphic
        | NodeKind::TableColumn
        | NodeKind::RegionBody
        | NodeKind::RegionBefore
        | NodeKind::RegionAfter
        | NodeKind::RegionStart
        | NodeKind::RegionEnd
        | NodeKind::SinglePageMasterReference
        | NodeKind::RepeatablePageMasterReference
        | NodeKind::RetrieveMarker => Err(invalid()),
    }
}

/// Report required children that never appeared, once `node` has ended.
#[must_use]
pub fn check_end(tree: &FoTree, node: NodeId) -> Vec<Violation> {
    let Some(kind) = tree.kind(node) else {
        return Vec::new();
    };
    let required: &[NodeKind] = match kind {
        NodeKind::Root => &[NodeKind::LayoutMasterSet, NodeKind::PageSequence],
        NodeKind::LayoutMasterSet => &[NodeKind::SimplePageMaster],
        NodeKind::SimplePageMaster => &[NodeKind::RegionBody],
        NodeKind::PageSequence => &[NodeKind::Flow],
        NodeKind::ListBlock => &[NodeKind::ListItem],
        NodeKind::ListItem => &[NodeKind::ListItemLabel, NodeKind::ListItemBody],
        NodeKind::Table => &[NodeKind::TableBody],
        NodeKind::TableRow => &[NodeKind::TableCell],
        NodeKind::Footnote => &[NodeKind::Inline, NodeKind::FootnoteBody],
        NodeKind::InstreamForeignObject => &[NodeKind::Foreign],
        _ => &[],
    };

    required
        .iter()
        .filter(|&&child| {
            // Either kind of page master satisfies the layout-master-set.
            if kind == NodeKind::LayoutMasterSet {
                !any_of(
                    tree,
                    node,
                    &[NodeKind::SimplePageMaster, NodeKind::PageSequenceMaster],
                )
            } else {
                count(tree, node, child) == 0
            }
        })
        .map(|&child| {
            let name = if child == NodeKind::Foreign {
                "foreign object".to_string()
            } else {
                child.qualified_name()
            };
            Violation::new(ViolationKind::MissingChild, kind, name)
        })
        .collect()
}
