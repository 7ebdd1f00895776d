//! Writing modes and the logical-to-physical direction mapping.
//!
//! [XSL 1.1 § 7.29.7 "writing-mode"](https://www.w3.org/TR/xsl11/#writing-mode)
//!
//! Logical properties (`padding-start`, `border-before-width`, `space-after`)
//! correspond to one absolute property (`padding-left`, `border-top-width`,
//! `margin-bottom`) per writing-mode family. Every corresponding-property
//! rule is built on [`WritingMode::select`].

use serde::Serialize;
use strum_macros::Display;

use crate::values::EnumValue;

/// [§ 7.29.7](https://www.w3.org/TR/xsl11/#writing-mode)
///
/// The text-flow direction family of a formatting object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum WritingMode {
    /// Lines left-to-right, blocks top-to-bottom.
    ///
    /// Mapping:
    ///   - before → top
    ///   - after  → bottom
    ///   - start  → left
    ///   - end    → right
    #[default]
    LrTb,

    /// Lines right-to-left, blocks top-to-bottom.
    ///
    /// Mapping:
    ///   - before → top
    ///   - after  → bottom
    ///   - start  → right
    ///   - end    → left
    RlTb,

    /// Lines top-to-bottom, blocks right-to-left.
    ///
    /// Mapping:
    ///   - before → right
    ///   - after  → left
    ///   - start  → top
    ///   - end    → bottom
    TbRl,
}

/// Physical side of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PhysicalSide {
    /// Top edge
    Top,
    /// Right edge
    Right,
    /// Bottom edge
    Bottom,
    /// Left edge
    Left,
}

/// Writing-mode-relative side of an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogicalSide {
    /// Where blocks begin.
    Before,
    /// Where blocks end.
    After,
    /// Where lines begin.
    Start,
    /// Where lines end.
    End,
}

impl WritingMode {
    /// The writing mode named by a resolved `writing-mode` keyword.
    #[must_use]
    pub const fn from_enum(value: EnumValue) -> Option<Self> {
        match value {
            EnumValue::LrTb => Some(Self::LrTb),
            EnumValue::RlTb => Some(Self::RlTb),
            EnumValue::TbRl => Some(Self::TbRl),
            _ => None,
        }
    }

    /// Pick the value belonging to this writing mode's family.
    #[must_use]
    pub const fn select<T: Copy>(self, lr_tb: T, rl_tb: T, tb_rl: T) -> T {
        match self {
            Self::LrTb => lr_tb,
            Self::RlTb => rl_tb,
            Self::TbRl => tb_rl,
        }
    }

    /// Map a logical side to the physical side it occupies.
    ///
    /// | writing-mode | before | after  | start | end    |
    /// |--------------|--------|--------|-------|--------|
    /// | lr-tb        | top    | bottom | left  | right  |
    /// | rl-tb        | top    | bottom | right | left   |
    /// | tb-rl        | right  | left   | top   | bottom |
    #[must_use]
    pub const fn physical(self, side: LogicalSide) -> PhysicalSide {
        match (self, side) {
            (Self::LrTb | Self::RlTb, LogicalSide::Before) | (Self::TbRl, LogicalSide::Start) => {
                PhysicalSide::Top
            }
            (Self::LrTb | Self::RlTb, LogicalSide::After) | (Self::TbRl, LogicalSide::End) => {
                PhysicalSide::Bottom
            }
            (Self::LrTb, LogicalSide::Start) | (Self::RlTb, LogicalSide::End) => PhysicalSide::Left,
            (Self::LrTb, LogicalSide::End) | (Self::RlTb, LogicalSide::Start) => {
                PhysicalSide::Right
            }
            (Self::TbRl, LogicalSide::Before) => PhysicalSide::Right,
            (Self::TbRl, LogicalSide::After) => PhysicalSide::Left,
        }
    }

    /// True for the vertical family, where block progression is horizontal.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::TbRl)
    }
}
