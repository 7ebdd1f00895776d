//! The property catalog: one maker per property id.
//!
//! [XSL 1.1 § 7 Formatting Properties](https://www.w3.org/TR/xsl11/)
//!
//! Makers that share a configuration (all paddings, all border colors) are
//! copied from a generic template with [`PropertyMaker::use_generic`], then
//! given their own shorthands and corresponding properties. The registry is
//! immutable once built and is shared by every document.

use std::sync::{Arc, OnceLock};

use strum::IntoEnumIterator;

use crate::id::{PropertyId, Subproperty};
use crate::maker::{
    CompoundMaker, CorrespondingFlavor, CorrespondingMaker, Datatype, DimensionExtra,
    IndentCorresponding, IndentRule, PropertyMaker,
};
use crate::shorthand::ShorthandParser;
use crate::values::{CompoundKind, EnumValue, PercentBase};

use PropertyId as P;

/// Options fixed when the registry is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryOptions {
    /// Treatment of the margin term of `start-indent` and `end-indent`.
    pub indent_rule: IndentRule,
}

/// The makers for every property in the catalog.
#[derive(Debug)]
pub struct PropertyRegistry {
    makers: Vec<PropertyMaker>,
    options: RegistryOptions,
}

impl PropertyRegistry {
    /// The registry with default options.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// The process-wide registry with default options.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<PropertyRegistry>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::standard())))
    }

    /// A registry built with `options`.
    #[must_use]
    pub fn with_options(options: RegistryOptions) -> Self {
        let generics = Generics::new();
        let makers = PropertyId::iter()
            .map(|id| build_maker(id, &generics, options))
            .collect();
        Self { makers, options }
    }

    /// The maker for `id`.
    #[must_use]
    pub fn maker(&self, id: PropertyId) -> &PropertyMaker {
        // Ids are dense from 1 and every id has a maker.
        &self.makers[usize::from(id.index()) - 1]
    }

    /// The options this registry was built with.
    #[must_use]
    pub const fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Every maker, in catalog order.
    pub fn makers(&self) -> impl Iterator<Item = &PropertyMaker> {
        self.makers.iter()
    }
}

/// The eight properties of one box-side family, in the order top, bottom,
/// left, right, before, after, start, end.
type Family = [PropertyId; 8];

const PADDING: Family = [
    P::PaddingTop,
    P::PaddingBottom,
    P::PaddingLeft,
    P::PaddingRight,
    P::PaddingBefore,
    P::PaddingAfter,
    P::PaddingStart,
    P::PaddingEnd,
];

const BORDER_WIDTH: Family = [
    P::BorderTopWidth,
    P::BorderBottomWidth,
    P::BorderLeftWidth,
    P::BorderRightWidth,
    P::BorderBeforeWidth,
    P::BorderAfterWidth,
    P::BorderStartWidth,
    P::BorderEndWidth,
];

const BORDER_STYLE: Family = [
    P::BorderTopStyle,
    P::BorderBottomStyle,
    P::BorderLeftStyle,
    P::BorderRightStyle,
    P::BorderBeforeStyle,
    P::BorderAfterStyle,
    P::BorderStartStyle,
    P::BorderEndStyle,
];

const BORDER_COLOR: Family = [
    P::BorderTopColor,
    P::BorderBottomColor,
    P::BorderLeftColor,
    P::BorderRightColor,
    P::BorderBeforeColor,
    P::BorderAfterColor,
    P::BorderStartColor,
    P::BorderEndColor,
];

/// Per-side border shorthands, top, bottom, left, right.
const BORDER_SIDES: [PropertyId; 4] = [P::BorderTop, P::BorderBottom, P::BorderLeft, P::BorderRight];

const BORDER_STYLES: [EnumValue; 10] = [
    EnumValue::None,
    EnumValue::Hidden,
    EnumValue::Dotted,
    EnumValue::Dashed,
    EnumValue::Solid,
    EnumValue::Double,
    EnumValue::Groove,
    EnumValue::Ridge,
    EnumValue::Inset,
    EnumValue::Outset,
];

/// The corresponding property of member `index` of `family`.
///
/// | side   | lr-tb  | rl-tb  | tb-rl  |
/// |--------|--------|--------|--------|
/// | before | top    | top    | right  |
/// | after  | bottom | bottom | left   |
/// | start  | left   | right  | top    |
/// | end    | right  | left   | bottom |
/// | top    | before | before | start  |
/// | bottom | after  | after  | end    |
/// | left   | start  | end    | after  |
/// | right  | end    | start  | before |
const fn family_corresponding(family: &Family, index: usize) -> CorrespondingMaker {
    let [top, bottom, left, right, before, after, start, end] = *family;
    match index {
        0 => CorrespondingMaker::new(before, before, start),
        1 => CorrespondingMaker::new(after, after, end),
        2 => CorrespondingMaker::new(start, end, after),
        3 => CorrespondingMaker::new(end, start, before),
        4 => CorrespondingMaker::new(top, top, right).relative(),
        5 => CorrespondingMaker::new(bottom, bottom, left).relative(),
        6 => CorrespondingMaker::new(left, right, top).relative(),
        _ => CorrespondingMaker::new(right, left, bottom).relative(),
    }
}

fn border_width_keywords(maker: PropertyMaker) -> PropertyMaker {
    maker
        .keyword("thin", "0.5pt")
        .keyword("medium", "1pt")
        .keyword("thick", "2pt")
}

/// Templates shared by several makers.
struct Generics {
    padding: PropertyMaker,
    cond_padding: PropertyMaker,
    border_width: PropertyMaker,
    cond_border_width: PropertyMaker,
    border_style: PropertyMaker,
    border_color: PropertyMaker,
    margin: PropertyMaker,
    space: PropertyMaker,
    keep: PropertyMaker,
    brk: PropertyMaker,
    min_dimension: PropertyMaker,
    max_dimension: PropertyMaker,
}

impl Generics {
    fn new() -> Self {
        let padding = PropertyMaker::new(P::PaddingTop, Datatype::Length)
            .default_value("0pt")
            .percent_base(PercentBase::ContainingBlockWidth);

        let border_width = border_width_keywords(
            PropertyMaker::new(P::BorderTopWidth, Datatype::Length).default_value("0pt"),
        );

        Self {
            cond_padding: PropertyMaker::new(P::PaddingBefore, Datatype::Compound)
                .percent_base(PercentBase::ContainingBlockWidth)
                .compound(length_conditional(P::PaddingBefore, &padding)),
            cond_border_width: PropertyMaker::new(P::BorderBeforeWidth, Datatype::Compound)
                .compound(length_conditional(P::BorderBeforeWidth, &border_width)),
            padding,
            border_width,
            border_style: PropertyMaker::new(P::BorderTopStyle, Datatype::Enum)
                .enums(&BORDER_STYLES)
                .default_value("none"),
            border_color: PropertyMaker::new(P::BorderTopColor, Datatype::Color)
                .default_value("black"),
            margin: PropertyMaker::new(P::MarginTop, Datatype::Length)
                .default_value("0pt")
                .percent_base(PercentBase::ContainingBlockWidth)
                .enums(&[EnumValue::Auto])
                .shorthands(&[P::Margin]),
            space: PropertyMaker::new(P::SpaceBefore, Datatype::Compound)
                .percent_base(PercentBase::ContainingBlockWidth)
                .compound(space(P::SpaceBefore)),
            keep: PropertyMaker::new(P::KeepTogether, Datatype::Compound).compound(keep()),
            brk: PropertyMaker::new(P::BreakBefore, Datatype::Enum)
                .enums(&[
                    EnumValue::Auto,
                    EnumValue::Column,
                    EnumValue::Page,
                    EnumValue::EvenPage,
                    EnumValue::OddPage,
                ])
                .default_value("auto"),
            min_dimension: PropertyMaker::new(P::MinWidth, Datatype::Length)
                .default_value("0pt")
                .percent_base(PercentBase::ContainingBlockWidth),
            max_dimension: PropertyMaker::new(P::MaxWidth, Datatype::Length)
                .enums(&[EnumValue::None])
                .default_value("none")
                .percent_base(PercentBase::ContainingBlockWidth),
        }
    }
}

/// `<length-conditional>`: `.length` from `length`, `.conditionality`
/// discard or retain.
fn length_conditional(base: PropertyId, length: &PropertyMaker) -> CompoundMaker {
    CompoundMaker::new(CompoundKind::LengthConditional)
        .add_subprop_maker(
            base,
            PropertyMaker::component(base, Subproperty::Length, Datatype::Length)
                .use_generic(length)
                .set_by_shorthand(),
        )
        .add_subprop_maker(base, conditionality(base))
}

fn conditionality(base: PropertyId) -> PropertyMaker {
    PropertyMaker::component(base, Subproperty::Conditionality, Datatype::Enum)
        .enums(&[EnumValue::Discard, EnumValue::Retain])
        .default_value("discard")
}

/// `<space>`: minimum, optimum, maximum, precedence, conditionality.
fn space(base: PropertyId) -> CompoundMaker {
    let length = |sub| {
        PropertyMaker::component(base, sub, Datatype::Length)
            .default_value("0pt")
            .percent_base(PercentBase::ContainingBlockWidth)
            .set_by_shorthand()
    };
    CompoundMaker::new(CompoundKind::Space)
        .add_subprop_maker(base, length(Subproperty::Minimum))
        .add_subprop_maker(base, length(Subproperty::Optimum))
        .add_subprop_maker(base, length(Subproperty::Maximum))
        .add_subprop_maker(
            base,
            PropertyMaker::component(base, Subproperty::Precedence, Datatype::Number)
                .enums(&[EnumValue::Force])
                .default_value("0"),
        )
        .add_subprop_maker(base, conditionality(base))
}

/// `<keep>`: an integer strength or `auto`/`always` per context.
fn keep() -> CompoundMaker {
    let base = P::KeepTogether;
    let strength = |sub| {
        PropertyMaker::component(base, sub, Datatype::Number)
            .enums(&[EnumValue::Auto, EnumValue::Always])
            .default_value("auto")
            .set_by_shorthand()
    };
    CompoundMaker::new(CompoundKind::Keep)
        .add_subprop_maker(base, strength(Subproperty::WithinLine))
        .add_subprop_maker(base, strength(Subproperty::WithinColumn))
        .add_subprop_maker(base, strength(Subproperty::WithinPage))
}

/// `<length-range>` of a progression dimension.
fn length_range(base: PropertyId, percent_base: PercentBase) -> CompoundMaker {
    let length = |sub| {
        PropertyMaker::component(base, sub, Datatype::Length)
            .enums(&[EnumValue::Auto])
            .default_value("auto")
            .percent_base(percent_base)
            .set_by_shorthand()
    };
    CompoundMaker::new(CompoundKind::LengthRange)
        .add_subprop_maker(base, length(Subproperty::Minimum))
        .add_subprop_maker(base, length(Subproperty::Optimum))
        .add_subprop_maker(base, length(Subproperty::Maximum))
}

/// `<length-bp-ip-direction>`
fn length_pair(base: PropertyId) -> CompoundMaker {
    let length = |sub| {
        PropertyMaker::component(base, sub, Datatype::Length)
            .default_value("0pt")
            .set_by_shorthand()
    };
    CompoundMaker::new(CompoundKind::LengthPair)
        .add_subprop_maker(base, length(Subproperty::BlockProgressionDirection))
        .add_subprop_maker(base, length(Subproperty::InlineProgressionDirection))
}

fn family_member(id: PropertyId, family: &Family) -> Option<usize> {
    family.iter().position(|member| *member == id)
}

/// A member of a box-side family: absolute sides (index < 4) are plain
/// makers with shorthands, logical sides are relative.
fn box_side(
    id: PropertyId,
    family: &Family,
    absolute: &PropertyMaker,
    logical: &PropertyMaker,
    box_shorthand: PropertyId,
    per_side: bool,
) -> PropertyMaker {
    let Some(index) = family_member(id, family) else {
        return PropertyMaker::new(id, Datatype::String);
    };
    let corresponding = family_corresponding(family, index);
    if index < 4 {
        let maker = PropertyMaker::new(id, absolute.datatype()).use_generic(absolute);
        let maker = if per_side {
            maker.shorthands(&[BORDER_SIDES[index], box_shorthand, P::Border])
        } else {
            maker.shorthands(&[box_shorthand])
        };
        maker.corresponding(corresponding)
    } else {
        PropertyMaker::new(id, logical.datatype())
            .use_generic(logical)
            .corresponding(corresponding)
    }
}

#[allow(clippy::match_same_arms)]
fn build_maker(id: PropertyId, g: &Generics, options: RegistryOptions) -> PropertyMaker {
    match id {
        // Fonts
        P::FontFamily => PropertyMaker::new(id, Datatype::String)
            .inherited(true)
            .default_value("sans-serif"),
        P::FontSize => PropertyMaker::new(id, Datatype::Length)
            .inherited(true)
            .default_value("12pt")
            .percent_base(PercentBase::ParentFontSize)
            .keyword("xx-small", "6.944pt")
            .keyword("x-small", "8.333pt")
            .keyword("small", "10pt")
            .keyword("medium", "12pt")
            .keyword("large", "14.4pt")
            .keyword("x-large", "17.28pt")
            .keyword("xx-large", "20.736pt")
            .keyword("larger", "1.2em")
            .keyword("smaller", "0.8333em"),
        P::FontStyle => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[
                EnumValue::Normal,
                EnumValue::Italic,
                EnumValue::Oblique,
                EnumValue::Backslant,
            ])
            .default_value("normal"),
        P::FontWeight => PropertyMaker::new(id, Datatype::Number)
            .inherited(true)
            .enums(&[EnumValue::Bolder, EnumValue::Lighter])
            .keyword("normal", "400")
            .keyword("bold", "700")
            .default_value("normal"),
        P::FontVariant => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[EnumValue::Normal, EnumValue::SmallCaps])
            .default_value("normal"),
        P::LineHeight => PropertyMaker::new(id, Datatype::Compound)
            .inherited(true)
            .percent_base(PercentBase::FontSize)
            .keyword("normal", "1.2")
            .default_value("normal")
            .context_dependent()
            .line_height(space(id)),

        // Color
        P::Color => PropertyMaker::new(id, Datatype::Color)
            .inherited(true)
            .default_value("black"),
        P::BackgroundColor => PropertyMaker::new(id, Datatype::Color).default_value("transparent"),

        // Text
        P::TextAlign => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[
                EnumValue::Start,
                EnumValue::Center,
                EnumValue::End,
                EnumValue::Justify,
                EnumValue::Left,
                EnumValue::Right,
                EnumValue::Inside,
                EnumValue::Outside,
            ])
            .default_value("start"),
        P::TextIndent => PropertyMaker::new(id, Datatype::Length)
            .inherited(true)
            .percent_base(PercentBase::ContainingBlockWidth)
            .default_value("0pt"),
        P::TextTransform => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[
                EnumValue::None,
                EnumValue::Uppercase,
                EnumValue::Lowercase,
                EnumValue::Capitalize,
            ])
            .default_value("none"),
        P::WhiteSpaceCollapse => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[EnumValue::True, EnumValue::False])
            .default_value("true"),
        P::WhiteSpaceTreatment => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[
                EnumValue::Ignore,
                EnumValue::Preserve,
                EnumValue::IgnoreIfBeforeLinefeed,
                EnumValue::IgnoreIfAfterLinefeed,
                EnumValue::IgnoreIfSurroundingLinefeed,
            ])
            .default_value("ignore-if-surrounding-linefeed"),
        P::LinefeedTreatment => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[
                EnumValue::Ignore,
                EnumValue::Preserve,
                EnumValue::TreatAsSpace,
                EnumValue::TreatAsZeroWidthSpace,
            ])
            .default_value("treat-as-space"),
        P::WrapOption => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[EnumValue::Wrap, EnumValue::NoWrap])
            .default_value("wrap"),
        P::WritingMode => PropertyMaker::new(id, Datatype::Enum)
            .inherited(true)
            .enums(&[EnumValue::LrTb, EnumValue::RlTb, EnumValue::TbRl])
            .keyword("lr", "lr-tb")
            .keyword("rl", "rl-tb")
            .keyword("tb", "tb-rl")
            .default_value("lr-tb"),

        // Margins
        P::MarginTop | P::MarginBottom | P::MarginLeft | P::MarginRight => {
            PropertyMaker::new(id, Datatype::Length).use_generic(&g.margin)
        }
        P::Margin => PropertyMaker::new(id, Datatype::Shorthand)
            .shorthand_parser(ShorthandParser::BoxProperty),

        // Padding
        P::PaddingTop
        | P::PaddingBottom
        | P::PaddingLeft
        | P::PaddingRight
        | P::PaddingBefore
        | P::PaddingAfter
        | P::PaddingStart
        | P::PaddingEnd => box_side(id, &PADDING, &g.padding, &g.cond_padding, P::Padding, false),
        P::Padding => PropertyMaker::new(id, Datatype::Shorthand)
            .shorthand_parser(ShorthandParser::BoxProperty),

        // Borders
        P::BorderTopWidth
        | P::BorderBottomWidth
        | P::BorderLeftWidth
        | P::BorderRightWidth
        | P::BorderBeforeWidth
        | P::BorderAfterWidth
        | P::BorderStartWidth
        | P::BorderEndWidth => box_side(
            id,
            &BORDER_WIDTH,
            &g.border_width,
            &g.cond_border_width,
            P::BorderWidth,
            true,
        ),
        P::BorderTopStyle
        | P::BorderBottomStyle
        | P::BorderLeftStyle
        | P::BorderRightStyle
        | P::BorderBeforeStyle
        | P::BorderAfterStyle
        | P::BorderStartStyle
        | P::BorderEndStyle => box_side(
            id,
            &BORDER_STYLE,
            &g.border_style,
            &g.border_style,
            P::BorderStyle,
            true,
        ),
        P::BorderTopColor
        | P::BorderBottomColor
        | P::BorderLeftColor
        | P::BorderRightColor
        | P::BorderBeforeColor
        | P::BorderAfterColor
        | P::BorderStartColor
        | P::BorderEndColor => box_side(
            id,
            &BORDER_COLOR,
            &g.border_color,
            &g.border_color,
            P::BorderColor,
            true,
        ),
        P::Border | P::BorderTop | P::BorderBottom | P::BorderLeft | P::BorderRight => {
            PropertyMaker::new(id, Datatype::Shorthand).shorthand_parser(ShorthandParser::Generic)
        }
        P::BorderWidth | P::BorderStyle | P::BorderColor => {
            PropertyMaker::new(id, Datatype::Shorthand)
                .shorthand_parser(ShorthandParser::BoxProperty)
        }

        // Space and indents
        P::SpaceBefore => PropertyMaker::new(id, Datatype::Compound)
            .use_generic(&g.space)
            .corresponding(
                CorrespondingMaker::new(P::MarginTop, P::MarginTop, P::MarginRight)
                    .use_parent()
                    .relative(),
            ),
        P::SpaceAfter => PropertyMaker::new(id, Datatype::Compound)
            .use_generic(&g.space)
            .corresponding(
                CorrespondingMaker::new(P::MarginBottom, P::MarginBottom, P::MarginLeft)
                    .use_parent()
                    .relative(),
            ),
        P::SpaceStart => PropertyMaker::new(id, Datatype::Compound)
            .use_generic(&g.space)
            .corresponding(
                CorrespondingMaker::new(P::MarginLeft, P::MarginRight, P::MarginTop)
                    .use_parent()
                    .relative(),
            ),
        P::SpaceEnd => PropertyMaker::new(id, Datatype::Compound)
            .use_generic(&g.space)
            .corresponding(
                CorrespondingMaker::new(P::MarginRight, P::MarginLeft, P::MarginBottom)
                    .use_parent()
                    .relative(),
            ),
        P::StartIndent => indent(
            id,
            [P::MarginLeft, P::MarginRight, P::MarginTop],
            IndentCorresponding {
                padding: [P::PaddingLeft, P::PaddingRight, P::PaddingTop],
                border_width: [P::BorderLeftWidth, P::BorderRightWidth, P::BorderTopWidth],
                rule: options.indent_rule,
            },
        ),
        P::EndIndent => indent(
            id,
            [P::MarginRight, P::MarginLeft, P::MarginBottom],
            IndentCorresponding {
                padding: [P::PaddingRight, P::PaddingLeft, P::PaddingBottom],
                border_width: [P::BorderRightWidth, P::BorderLeftWidth, P::BorderBottomWidth],
                rule: options.indent_rule,
            },
        ),

        // Dimensions
        P::Width | P::Height | P::PageWidth | P::PageHeight | P::ColumnWidth => {
            let percent_base = if matches!(id, P::Height | P::PageHeight) {
                PercentBase::ContainingBlockHeight
            } else {
                PercentBase::ContainingBlockWidth
            };
            PropertyMaker::new(id, Datatype::Length)
                .enums(&[EnumValue::Auto])
                .default_value("auto")
                .percent_base(percent_base)
        }
        P::MinWidth | P::MinHeight => {
            PropertyMaker::new(id, Datatype::Length).use_generic(&g.min_dimension)
        }
        P::MaxWidth | P::MaxHeight => {
            PropertyMaker::new(id, Datatype::Length).use_generic(&g.max_dimension)
        }
        P::BlockProgressionDimension => dimension(
            id,
            PercentBase::ContainingBlockHeight,
            [P::Height, P::Height, P::Width],
            DimensionExtra {
                minimum: [P::MinHeight, P::MinHeight, P::MinWidth],
                maximum: [P::MaxHeight, P::MaxHeight, P::MaxWidth],
            },
        ),
        P::InlineProgressionDimension => dimension(
            id,
            PercentBase::ContainingBlockWidth,
            [P::Width, P::Width, P::Height],
            DimensionExtra {
                minimum: [P::MinWidth, P::MinWidth, P::MinHeight],
                maximum: [P::MaxWidth, P::MaxWidth, P::MaxHeight],
            },
        ),

        // Keeps and breaks
        P::KeepTogether => PropertyMaker::new(id, Datatype::Compound)
            .use_generic(&g.keep)
            .inherited(true),
        P::KeepWithNext | P::KeepWithPrevious => {
            PropertyMaker::new(id, Datatype::Compound).use_generic(&g.keep)
        }
        P::BreakBefore | P::BreakAfter => PropertyMaker::new(id, Datatype::Enum).use_generic(&g.brk),

        // Tables
        P::BorderSeparation => PropertyMaker::new(id, Datatype::Compound)
            .inherited(true)
            .shorthands(&[P::BorderSpacing])
            .compound(length_pair(id)),
        P::BorderSpacing => PropertyMaker::new(id, Datatype::Shorthand)
            .shorthand_parser(ShorthandParser::BorderSpacing),
        P::ColumnNumber => PropertyMaker::new(id, Datatype::Number),
        P::NumberColumnsSpanned => PropertyMaker::new(id, Datatype::Number).default_value("1"),

        // Identifiers and names
        P::Id
        | P::RefId
        | P::MasterName
        | P::MasterReference
        | P::FlowName
        | P::RegionName
        | P::MarkerClassName
        | P::RetrieveClassName => PropertyMaker::new(id, Datatype::String).default_value(""),
    }
}

fn indent(id: PropertyId, margins: [PropertyId; 3], extra: IndentCorresponding) -> PropertyMaker {
    let [lr_tb, rl_tb, tb_rl] = margins;
    PropertyMaker::new(id, Datatype::Length)
        .inherited(true)
        .default_value("0pt")
        .percent_base(PercentBase::ContainingBlockWidth)
        .corresponding(
            CorrespondingMaker::new(lr_tb, rl_tb, tb_rl)
                .use_parent()
                .relative()
                .flavor(CorrespondingFlavor::Indent(extra)),
        )
}

fn dimension(
    id: PropertyId,
    percent_base: PercentBase,
    analogues: [PropertyId; 3],
    extra: DimensionExtra,
) -> PropertyMaker {
    let [lr_tb, rl_tb, tb_rl] = analogues;
    PropertyMaker::new(id, Datatype::Compound)
        .percent_base(percent_base)
        .compound(length_range(id, percent_base))
        .corresponding(
            CorrespondingMaker::new(lr_tb, rl_tb, tb_rl)
                .relative()
                .flavor(CorrespondingFlavor::Dimension(extra)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_has_its_own_maker() {
        let registry = PropertyRegistry::standard();
        for id in PropertyId::iter() {
            assert_eq!(registry.maker(id).id().base, id);
            assert_eq!(registry.maker(id).id().sub, None);
        }
    }

    #[test]
    fn test_generic_copies_are_rebased() {
        let registry = PropertyRegistry::standard();
        let compound = registry
            .maker(P::SpaceAfter)
            .compound_maker()
            .expect("space-after is compound");
        let optimum = compound.subproperty(Subproperty::Optimum).unwrap();
        assert_eq!(optimum.id().base, P::SpaceAfter);
    }

    #[test]
    fn test_family_corresponding_tables() {
        assert_eq!(
            family_corresponding(&PADDING, 6).ids(),
            [P::PaddingLeft, P::PaddingRight, P::PaddingTop]
        );
        assert!(family_corresponding(&PADDING, 6).is_relative());
        assert_eq!(
            family_corresponding(&BORDER_WIDTH, 2).ids(),
            [P::BorderStartWidth, P::BorderEndWidth, P::BorderAfterWidth]
        );
        assert!(!family_corresponding(&BORDER_WIDTH, 2).is_relative());
    }

    #[test]
    fn test_shared_registry_is_reused() {
        assert!(Arc::ptr_eq(
            &PropertyRegistry::shared(),
            &PropertyRegistry::shared()
        ));
    }
}
