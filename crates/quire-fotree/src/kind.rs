//! The formatting-object catalog.
//!
//! [§ 6 Formatting Object Descriptions](https://www.w3.org/TR/xsl11/)
//!
//! Every node in an [`FoTree`](crate::FoTree) carries a [`NodeKind`]. The
//! formatting objects keep their XSL local names (`block`, `table-row`) so a
//! kind can be looked up straight from an element event; the non-FO kinds
//! (document, text, foreign, unknown) use `#`-prefixed names that no element
//! can have.

use core::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The XSL-FO namespace URI.
pub const FO_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Format";

/// What a node in the formatting-object tree is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    IntoStaticStr,
    EnumIter,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// The document node above `fo:root`.
    #[strum(serialize = "#document")]
    Document,
    /// A run of character data.
    #[strum(serialize = "#text")]
    Text,
    /// An element from a non-FO namespace, kept as an XML fragment.
    #[strum(serialize = "#foreign")]
    Foreign,
    /// An element no factory recognised.
    #[strum(serialize = "#unknown")]
    Unknown,

    // Declarations and pagination
    /// `fo:root`
    Root,
    /// `fo:declarations`
    Declarations,
    /// `fo:layout-master-set`
    LayoutMasterSet,
    /// `fo:simple-page-master`
    SimplePageMaster,
    /// `fo:page-sequence-master`
    PageSequenceMaster,
    /// `fo:single-page-master-reference`
    SinglePageMasterReference,
    /// `fo:repeatable-page-master-reference`
    RepeatablePageMasterReference,
    /// `fo:region-body`
    RegionBody,
    /// `fo:region-before`
    RegionBefore,
    /// `fo:region-after`
    RegionAfter,
    /// `fo:region-start`
    RegionStart,
    /// `fo:region-end`
    RegionEnd,
    /// `fo:page-sequence`
    PageSequence,
    /// `fo:title`
    Title,
    /// `fo:flow`
    Flow,
    /// `fo:static-content`
    StaticContent,

    // Blocks
    /// `fo:block`
    Block,
    /// `fo:block-container`
    BlockContainer,

    // Inlines
    /// `fo:inline`
    Inline,
    /// `fo:inline-container`
    InlineContainer,
    /// `fo:wrapper`
    Wrapper,
    /// `fo:character`
    Character,
    /// `fo:leader`
    Leader,
    /// `fo:page-number`
    PageNumber,
    /// `fo:page-number-citation`
    PageNumberCitation,
    /// `fo:basic-link`
    BasicLink,
    /// `fo:external-graphic`
    ExternalGraphic,
    /// `fo:instream-foreign-object`
    InstreamForeignObject,

    // Lists
    /// `fo:list-block`
    ListBlock,
    /// `fo:list-item`
    ListItem,
    /// `fo:list-item-label`
    ListItemLabel,
    /// `fo:list-item-body`
    ListItemBody,

    // Tables
    /// `fo:table`
    Table,
    /// `fo:table-column`
    TableColumn,
    /// `fo:table-header`
    TableHeader,
    /// `fo:table-footer`
    TableFooter,
    /// `fo:table-body`
    TableBody,
    /// `fo:table-row`
    TableRow,
    /// `fo:table-cell`
    TableCell,

    // Out-of-line and markers
    /// `fo:footnote`
    Footnote,
    /// `fo:footnote-body`
    FootnoteBody,
    /// `fo:marker`
    Marker,
    /// `fo:retrieve-marker`
    RetrieveMarker,
}

impl NodeKind {
    /// Look up a formatting object by its local name in the FO namespace.
    #[must_use]
    pub fn from_local_name(local_name: &str) -> Option<Self> {
        Self::from_str(local_name)
            .ok()
            .filter(|kind| kind.is_formatting_object())
    }

    /// The name as written, e.g. `block` or `#text`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The prefixed element name used in messages, e.g. `fo:block`.
    #[must_use]
    pub fn qualified_name(self) -> String {
        if self.is_formatting_object() {
            format!("fo:{}", self.name())
        } else {
            self.name().to_string()
        }
    }

    /// Returns true for kinds that come from an element in the FO namespace.
    #[must_use]
    pub const fn is_formatting_object(self) -> bool {
        !matches!(
            self,
            Self::Document | Self::Text | Self::Foreign | Self::Unknown
        )
    }

    /// Returns true for kinds that own a chain of text runs.
    ///
    /// Text-transform and whitespace handling treat all the text inside one
    /// of these as a single unit.
    #[must_use]
    pub const fn is_block_like(self) -> bool {
        matches!(self, Self::Block | Self::Title)
    }

    /// Returns true for kinds that start a new block boundary inside their
    /// parent's text.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::BlockContainer
                | Self::ListBlock
                | Self::ListItem
                | Self::Table
                | Self::TableRow
                | Self::TableCell
        )
    }

    /// [§ 6.2 Formatting Object Content](https://www.w3.org/TR/xsl11/)
    ///
    /// "#PCDATA" appears in the content model of these objects.
    #[must_use]
    pub const fn accepts_text(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::Title
                | Self::Inline
                | Self::Wrapper
                | Self::Leader
                | Self::BasicLink
                | Self::Marker
        )
    }

    /// Returns true if the object places inline areas in the line stack.
    #[must_use]
    pub const fn generates_inline_areas(self) -> bool {
        match self {
            Self::Block
            | Self::Title
            | Self::Inline
            | Self::Wrapper
            | Self::Character
            | Self::Leader
            | Self::PageNumber
            | Self::PageNumberCitation
            | Self::BasicLink
            | Self::ExternalGraphic
            | Self::InstreamForeignObject
            | Self::InlineContainer
            | Self::Text => true,
            Self::Document
            | Self::Foreign
            | Self::Unknown
            | Self::Root
            | Self::Declarations
            | Self::LayoutMasterSet
            | Self::SimplePageMaster
            | Self::PageSequenceMaster
            | Self::SinglePageMasterReference
            | Self::RepeatablePageMasterReference
            | Self::RegionBody
            | Self::RegionBefore
            | Self::RegionAfter
            | Self::RegionStart
            | Self::RegionEnd
            | Self::PageSequence
            | Self::Flow
            | Self::StaticContent
            | Self::BlockContainer
            | Self::ListBlock
            | Self::ListItem
            | Self::ListItemLabel
            | Self::ListItemBody
            | Self::Table
            | Self::TableColumn
            | Self::TableHeader
            | Self::TableFooter
            | Self::TableBody
            | Self::TableRow
            | Self::TableCell
            | Self::Footnote
            | Self::FootnoteBody
            | Self::Marker
            | Self::RetrieveMarker => false,
        }
    }

    /// Returns true if the object establishes a reference area, which
    /// resets the inline-progression direction for its content.
    #[must_use]
    pub const fn generates_reference_areas(self) -> bool {
        matches!(
            self,
            Self::SimplePageMaster
                | Self::RegionBody
                | Self::RegionBefore
                | Self::RegionAfter
                | Self::RegionStart
                | Self::RegionEnd
                | Self::BlockContainer
                | Self::InlineContainer
                | Self::Table
        )
    }

    /// Returns true for `fo:marker`, whose content is re-parented at layout
    /// time and so does not extend the property inheritance chain.
    #[must_use]
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::Marker)
    }

    /// Returns true for objects that group content at block or inline
    /// level and carry font properties worth registering.
    #[must_use]
    pub const fn carries_fonts(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::Title
                | Self::Inline
                | Self::Leader
                | Self::BasicLink
                | Self::Character
                | Self::PageNumber
                | Self::PageNumberCitation
        )
    }
}
