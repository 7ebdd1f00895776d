//! `line-height`.
//!
//! [XSL 1.1 § 7.16.4 "line-height"](https://www.w3.org/TR/xsl11/)
//! "If the value is a <number>, the computed value is the number multiplied
//! by the element's font size... the specified value, not the computed
//! value, is inherited."
//!
//! The literal a value was made from travels with it, and every node
//! reparses the nearest specified literal against its own font size.

use super::PropertyMaker;
use super::compound::CompoundMaker;
use crate::error::PropertyError;
use crate::id::PropertyId;
use crate::list::PropertyList;
use crate::values::Property;

/// A bare number is a multiple of this node's font size. Everything else is
/// converted like any space value.
pub(super) fn convert(
    compound: &CompoundMaker,
    value: Property,
    list: &PropertyList,
) -> Result<Option<Property>, PropertyError> {
    let value = match value {
        Property::Number(factor) => {
            let font_size = list
                .get(PropertyId::FontSize)?
                .as_length()
                .ok_or_else(|| PropertyError::Computation {
                    property: PropertyId::FontSize.to_string(),
                    reason: "font size is not a length".to_string(),
                })?;
            Property::Length(font_size.scale(factor))
        }
        other => other,
    };
    compound.convert(value, list)
}

/// Reparse the nearest specified literal in this node's context.
pub(super) fn compute(
    owner: &PropertyMaker,
    list: &PropertyList,
) -> Result<Option<Property>, PropertyError> {
    let nearest = list.get_nearest_specified(owner.id().base)?;
    let Some(specified) = nearest.specified_value() else {
        return Ok(None);
    };
    match owner.make(list, specified) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            log::debug!(target: "quire", "line-height \"{specified}\" not recomputed: {err}");
            Ok(None)
        }
    }
}
