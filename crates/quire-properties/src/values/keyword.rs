//! Enumerated property keywords.
//!
//! Each maker carries its own table of accepted keywords; this enum is the
//! union of all of them so that resolved values can be matched exhaustively
//! by downstream consumers.

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// A keyword accepted by at least one enumerated property.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EnumValue {
    // Generic
    /// `auto`
    Auto,
    /// `always`
    Always,
    /// `none`
    None,
    /// `normal`
    Normal,

    // Space components
    /// `discard` (conditionality)
    Discard,
    /// `retain` (conditionality)
    Retain,
    /// `force` (precedence)
    Force,

    // Writing modes
    /// `lr-tb`
    LrTb,
    /// `rl-tb`
    RlTb,
    /// `tb-rl`
    TbRl,

    // Border styles
    /// `hidden`
    Hidden,
    /// `dotted`
    Dotted,
    /// `dashed`
    Dashed,
    /// `solid`
    Solid,
    /// `double`
    Double,
    /// `groove`
    Groove,
    /// `ridge`
    Ridge,
    /// `inset`
    Inset,
    /// `outset`
    Outset,

    // Fonts
    /// `bolder`
    Bolder,
    /// `lighter`
    Lighter,
    /// `italic`
    Italic,
    /// `oblique`
    Oblique,
    /// `backslant`
    Backslant,
    /// `small-caps`
    SmallCaps,

    // Alignment
    /// `start`
    Start,
    /// `center`
    Center,
    /// `end`
    End,
    /// `justify`
    Justify,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `inside`
    Inside,
    /// `outside`
    Outside,

    // Text transform
    /// `uppercase`
    Uppercase,
    /// `lowercase`
    Lowercase,
    /// `capitalize`
    Capitalize,

    // Whitespace
    /// `true`
    True,
    /// `false`
    False,
    /// `ignore`
    Ignore,
    /// `preserve`
    Preserve,
    /// `treat-as-space`
    TreatAsSpace,
    /// `treat-as-zero-width-space`
    TreatAsZeroWidthSpace,
    /// `ignore-if-before-linefeed`
    IgnoreIfBeforeLinefeed,
    /// `ignore-if-after-linefeed`
    IgnoreIfAfterLinefeed,
    /// `ignore-if-surrounding-linefeed`
    IgnoreIfSurroundingLinefeed,
    /// `wrap`
    Wrap,
    /// `no-wrap`
    NoWrap,

    // Breaks
    /// `column`
    Column,
    /// `page`
    Page,
    /// `even-page`
    EvenPage,
    /// `odd-page`
    OddPage,
}

impl EnumValue {
    /// The keyword as written in an attribute.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        self.into()
    }
}
