//! Start and end indents.
//!
//! See [XSL 1.1 § 5.3.2 Margin, Space, and Indent Properties](https://www.w3.org/TR/xsl11/).
//!
//! When the corresponding margin is specified, an indent is computed here as
//! the sum of that margin, the corresponding padding and the corresponding
//! border width. The inherited indent is not added; nested blocks pick it up
//! through ordinary inheritance when no margin forces the computation.

use serde::Serialize;

use super::PropertyMaker;
use super::corresponding::CorrespondingMaker;
use crate::error::PropertyError;
use crate::id::PropertyId;
use crate::list::PropertyList;
use crate::values::{Length, Property};

/// Whether the margin term of an indent applies on formatting objects that
/// generate no inline areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentRule {
    /// The margin term is always part of the sum.
    #[default]
    MarginAlwaysIncluded,
    /// The margin term is dropped on formatting objects that generate no
    /// inline areas.
    SkipMarginWithoutInlineAreas,
}

/// The padding and border-width analogues of an indent, per writing-mode
/// family.
#[derive(Debug, Clone, Copy)]
pub struct IndentCorresponding {
    /// Padding analogues: lr-tb, rl-tb, tb-rl.
    pub padding: [PropertyId; 3],
    /// Border-width analogues: lr-tb, rl-tb, tb-rl.
    pub border_width: [PropertyId; 3],
    /// Treatment of the margin term.
    pub rule: IndentRule,
}

pub(super) fn compute(
    corresponding: &CorrespondingMaker,
    extra: &IndentCorresponding,
    owner: &PropertyMaker,
    list: &PropertyList,
) -> Result<Option<Property>, PropertyError> {
    let Some(wm_list) = corresponding.wm_list(list) else {
        return Ok(None);
    };

    let [lr_tb, rl_tb, tb_rl] = corresponding.ids();
    let margin_id = wm_list.wm_map(lr_tb, rl_tb, tb_rl)?;
    if list.get_explicit_or_shorthand(margin_id)?.is_none() {
        return Ok(list.get_explicit(owner.id().base).cloned());
    }

    let [lr_tb, rl_tb, tb_rl] = extra.padding;
    let padding_id = wm_list.wm_map(lr_tb, rl_tb, tb_rl)?;
    let [lr_tb, rl_tb, tb_rl] = extra.border_width;
    let border_id = wm_list.wm_map(lr_tb, rl_tb, tb_rl)?;

    let skip_margin = extra.rule == IndentRule::SkipMarginWithoutInlineAreas
        && !list.traits().generates_inline_areas;

    let mut sum = Length::ZERO;
    let terms = [(margin_id, !skip_margin), (padding_id, true), (border_id, true)];
    for (id, included) in terms {
        if !included {
            continue;
        }
        let term = numeric_term(list, id)?;
        sum = sum
            .checked_add(term)
            .ok_or_else(|| PropertyError::Computation {
                property: id.to_string(),
                reason: format!("cannot add {term} to {sum}"),
            })?;
    }
    Ok(Some(Property::Length(sum)))
}

fn numeric_term(list: &PropertyList, id: PropertyId) -> Result<Length, PropertyError> {
    let value = list.get(id)?;
    value
        .as_numeric_length()
        .ok_or_else(|| PropertyError::Computation {
            property: id.to_string(),
            reason: format!("\"{value}\" is not a length"),
        })
}
