//! Property identifiers.
//!
//! [XSL 1.1 § 7 Formatting Properties](https://www.w3.org/TR/xsl11/)
//!
//! Every property is a dense integer id from a fixed catalog. Components of
//! compound properties ("space-before.minimum") are addressed by packing a
//! [`Subproperty`] into the bits above [`COMPOUND_SHIFT`]:
//!
//! ```text
//!   15        9 8           0
//!  +-----------+-------------+
//!  | component |  property   |
//!  +-----------+-------------+
//! ```
//!
//! `slot = ((id & COMPOUND_MASK) >> COMPOUND_SHIFT) - 1` recovers the 0-based
//! index of a component inside a compound maker.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Number of bits reserved for the base property id.
pub const COMPOUND_SHIFT: u16 = 9;

/// Mask selecting the base property id.
pub const PROPERTY_MASK: u16 = (1 << COMPOUND_SHIFT) - 1;

/// Mask selecting the compound component.
pub const COMPOUND_MASK: u16 = !PROPERTY_MASK;

/// Number of distinct compound components.
pub const COMPOUND_COUNT: usize = 11;

/// The property catalog. Names are the XSL attribute names.
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
    EnumCount,
    FromRepr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[repr(u16)]
pub enum PropertyId {
    // Fonts
    /// `font-family`
    FontFamily = 1,
    /// `font-size`
    FontSize,
    /// `font-style`
    FontStyle,
    /// `font-weight`
    FontWeight,
    /// `font-variant`
    FontVariant,
    /// `line-height`
    LineHeight,

    // Color
    /// `color`
    Color,
    /// `background-color`
    BackgroundColor,

    // Text
    /// `text-align`
    TextAlign,
    /// `text-indent`
    TextIndent,
    /// `text-transform`
    TextTransform,
    /// `white-space-collapse`
    WhiteSpaceCollapse,
    /// `white-space-treatment`
    WhiteSpaceTreatment,
    /// `linefeed-treatment`
    LinefeedTreatment,
    /// `wrap-option`
    WrapOption,

    /// `writing-mode`
    WritingMode,

    // Margins
    /// `margin-top`
    MarginTop,
    /// `margin-bottom`
    MarginBottom,
    /// `margin-left`
    MarginLeft,
    /// `margin-right`
    MarginRight,
    /// `margin` (shorthand)
    Margin,

    // Padding
    /// `padding-top`
    PaddingTop,
    /// `padding-bottom`
    PaddingBottom,
    /// `padding-left`
    PaddingLeft,
    /// `padding-right`
    PaddingRight,
    /// `padding-before`
    PaddingBefore,
    /// `padding-after`
    PaddingAfter,
    /// `padding-start`
    PaddingStart,
    /// `padding-end`
    PaddingEnd,
    /// `padding` (shorthand)
    Padding,

    // Border widths
    /// `border-top-width`
    BorderTopWidth,
    /// `border-bottom-width`
    BorderBottomWidth,
    /// `border-left-width`
    BorderLeftWidth,
    /// `border-right-width`
    BorderRightWidth,
    /// `border-before-width`
    BorderBeforeWidth,
    /// `border-after-width`
    BorderAfterWidth,
    /// `border-start-width`
    BorderStartWidth,
    /// `border-end-width`
    BorderEndWidth,

    // Border styles
    /// `border-top-style`
    BorderTopStyle,
    /// `border-bottom-style`
    BorderBottomStyle,
    /// `border-left-style`
    BorderLeftStyle,
    /// `border-right-style`
    BorderRightStyle,
    /// `border-before-style`
    BorderBeforeStyle,
    /// `border-after-style`
    BorderAfterStyle,
    /// `border-start-style`
    BorderStartStyle,
    /// `border-end-style`
    BorderEndStyle,

    // Border colors
    /// `border-top-color`
    BorderTopColor,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-color`
    BorderLeftColor,
    /// `border-right-color`
    BorderRightColor,
    /// `border-before-color`
    BorderBeforeColor,
    /// `border-after-color`
    BorderAfterColor,
    /// `border-start-color`
    BorderStartColor,
    /// `border-end-color`
    BorderEndColor,

    // Border shorthands
    /// `border` (shorthand)
    Border,
    /// `border-top` (shorthand)
    BorderTop,
    /// `border-bottom` (shorthand)
    BorderBottom,
    /// `border-left` (shorthand)
    BorderLeft,
    /// `border-right` (shorthand)
    BorderRight,
    /// `border-width` (shorthand)
    BorderWidth,
    /// `border-style` (shorthand)
    BorderStyle,
    /// `border-color` (shorthand)
    BorderColor,

    // Space and indents
    /// `space-before`
    SpaceBefore,
    /// `space-after`
    SpaceAfter,
    /// `space-start`
    SpaceStart,
    /// `space-end`
    SpaceEnd,
    /// `start-indent`
    StartIndent,
    /// `end-indent`
    EndIndent,

    // Dimensions
    /// `width`
    Width,
    /// `height`
    Height,
    /// `min-width`
    MinWidth,
    /// `min-height`
    MinHeight,
    /// `max-width`
    MaxWidth,
    /// `max-height`
    MaxHeight,
    /// `block-progression-dimension`
    BlockProgressionDimension,
    /// `inline-progression-dimension`
    InlineProgressionDimension,

    // Keeps and breaks
    /// `keep-together`
    KeepTogether,
    /// `keep-with-next`
    KeepWithNext,
    /// `keep-with-previous`
    KeepWithPrevious,
    /// `break-before`
    BreakBefore,
    /// `break-after`
    BreakAfter,

    // Tables
    /// `border-separation`
    BorderSeparation,
    /// `border-spacing` (shorthand)
    BorderSpacing,
    /// `column-number`
    ColumnNumber,
    /// `number-columns-spanned`
    NumberColumnsSpanned,
    /// `column-width`
    ColumnWidth,

    // References
    /// `id`
    Id,
    /// `ref-id`
    RefId,

    // Page masters
    /// `master-name`
    MasterName,
    /// `master-reference`
    MasterReference,
    /// `flow-name`
    FlowName,
    /// `region-name`
    RegionName,
    /// `page-height`
    PageHeight,
    /// `page-width`
    PageWidth,

    // Markers
    /// `marker-class-name`
    MarkerClassName,
    /// `retrieve-class-name`
    RetrieveClassName,
}

impl PropertyId {
    /// The XSL attribute name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Look up a property by its attribute name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// The raw catalog index.
    #[must_use]
    pub const fn index(self) -> u16 {
        self as u16
    }
}

/// Components of compound properties.
///
/// [XSL 1.1 § 5.11 Property Datatypes](https://www.w3.org/TR/xsl11/)
/// "A compound datatype is a collection of components."
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
    FromRepr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[repr(u16)]
pub enum Subproperty {
    /// `.block-progression-direction` of a length-pair
    BlockProgressionDirection = 1,
    /// `.conditionality` of a space or conditional length
    Conditionality,
    /// `.inline-progression-direction` of a length-pair
    InlineProgressionDirection,
    /// `.length` of a conditional length
    Length,
    /// `.maximum` of a space or length-range
    Maximum,
    /// `.minimum` of a space or length-range
    Minimum,
    /// `.optimum` of a space or length-range
    Optimum,
    /// `.precedence` of a space
    Precedence,
    /// `.within-column` of a keep
    WithinColumn,
    /// `.within-line` of a keep
    WithinLine,
    /// `.within-page` of a keep
    WithinPage,
}

impl Subproperty {
    /// The component name as written after the dot.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// 0-based slot inside a compound maker.
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize - 1
    }

    /// Inverse of [`Subproperty::slot`].
    #[must_use]
    pub fn from_slot(slot: usize) -> Option<Self> {
        u16::try_from(slot + 1).ok().and_then(Self::from_repr)
    }
}

/// A base property, optionally narrowed to one compound component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PropertyRef {
    /// The base property.
    pub base: PropertyId,
    /// The component, if any.
    pub sub: Option<Subproperty>,
}

impl PropertyRef {
    /// Refer to a whole property.
    #[must_use]
    pub const fn new(base: PropertyId) -> Self {
        Self { base, sub: None }
    }

    /// Refer to one component of a compound property.
    #[must_use]
    pub const fn component(base: PropertyId, sub: Subproperty) -> Self {
        Self {
            base,
            sub: Some(sub),
        }
    }

    /// Pack into the masked integer form.
    #[must_use]
    pub const fn encode(self) -> u16 {
        let sub = match self.sub {
            Some(sub) => (sub as u16) << COMPOUND_SHIFT,
            None => 0,
        };
        self.base as u16 | sub
    }

    /// Unpack the masked integer form. Returns `None` for ids outside the
    /// catalog.
    #[must_use]
    pub fn decode(raw: u16) -> Option<Self> {
        let base = PropertyId::from_repr(raw & PROPERTY_MASK)?;
        let sub = match (raw & COMPOUND_MASK) >> COMPOUND_SHIFT {
            0 => None,
            n => Some(Subproperty::from_repr(n)?),
        };
        Some(Self { base, sub })
    }

    /// 0-based component slot, `None` for a whole property.
    #[must_use]
    pub fn slot(self) -> Option<usize> {
        let component = (self.encode() & COMPOUND_MASK) >> COMPOUND_SHIFT;
        usize::from(component).checked_sub(1)
    }

    /// Move this reference's component onto another base property, keeping
    /// the component bits and replacing the base bits.
    #[must_use]
    pub fn rebase(self, base: PropertyId) -> Self {
        let raw = (self.encode() & COMPOUND_MASK) | (base.index() & PROPERTY_MASK);
        Self::decode(raw).unwrap_or(Self {
            base,
            sub: self.sub,
        })
    }

    /// Parse an attribute name such as `space-before` or
    /// `space-before.minimum`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.split_once('.') {
            Some((base, sub)) => Some(Self::component(
                PropertyId::from_name(base)?,
                Subproperty::from_str(sub).ok()?,
            )),
            None => PropertyId::from_name(name).map(Self::new),
        }
    }
}

impl From<PropertyId> for PropertyRef {
    fn from(id: PropertyId) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            Some(sub) => write!(f, "{}.{}", self.base, sub),
            None => write!(f, "{}", self.base),
        }
    }
}
