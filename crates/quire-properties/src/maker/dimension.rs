//! Progression dimensions.
//!
//! [XSL 1.1 § 7.15.3 "block-progression-dimension"](https://www.w3.org/TR/xsl11/)
//!
//! `block-progression-dimension` corresponds to `height` (or `width` in a
//! vertical writing mode). Its `.minimum` and `.maximum` components also
//! correspond, to `min-height` and `max-height`.

use super::PropertyMaker;
use super::corresponding::CorrespondingMaker;
use crate::error::PropertyError;
use crate::id::{PropertyId, Subproperty};
use crate::list::PropertyList;
use crate::values::Property;

/// The `min-*` and `max-*` analogues of a dimension, per writing-mode family.
#[derive(Debug, Clone, Copy)]
pub struct DimensionExtra {
    /// Analogues of `.minimum`: lr-tb, rl-tb, tb-rl.
    pub minimum: [PropertyId; 3],
    /// Analogues of `.maximum`: lr-tb, rl-tb, tb-rl.
    pub maximum: [PropertyId; 3],
}

impl DimensionExtra {
    fn extras(&self) -> [(Subproperty, [PropertyId; 3]); 2] {
        [
            (Subproperty::Minimum, self.minimum),
            (Subproperty::Maximum, self.maximum),
        ]
    }

    /// True if either analogue is explicit on this node.
    pub(crate) fn is_forced(&self, list: &PropertyList) -> Result<bool, PropertyError> {
        for (_, [lr_tb, rl_tb, tb_rl]) in self.extras() {
            let id = list.wm_map(lr_tb, rl_tb, tb_rl)?;
            if list.get_explicit(id).is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// The base analogue's value (or the initial value), with `.minimum` and
/// `.maximum` overwritten from explicit `min-*`/`max-*` analogues.
pub(super) fn compute(
    corresponding: &CorrespondingMaker,
    extra: &DimensionExtra,
    owner: &PropertyMaker,
    list: &PropertyList,
) -> Result<Option<Property>, PropertyError> {
    let mut value = match corresponding.compute_plain(owner, list)? {
        Some(value) => value,
        None => owner.make_default(list)?,
    };

    let Some(compound) = owner.compound_maker() else {
        return Ok(Some(value));
    };

    for (sub, [lr_tb, rl_tb, tb_rl]) in extra.extras() {
        let id = list.wm_map(lr_tb, rl_tb, tb_rl)?;
        let Some(analogue) = list.get_explicit_or_shorthand(id)? else {
            continue;
        };
        let converted = match compound.subproperty(sub) {
            Some(maker) => maker.convert_property(analogue.clone(), list)?,
            None => None,
        };
        value = super::with_component(value, sub, converted.unwrap_or(analogue))?;
    }
    Ok(Some(value))
}
