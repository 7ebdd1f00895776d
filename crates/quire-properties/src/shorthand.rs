//! Shorthand expansion.
//!
//! [XSL 1.1 § 7.31 Shorthand Properties](https://www.w3.org/TR/xsl11/)
//!
//! A shorthand is stored on the node as the list of values it was given.
//! Each property it covers asks the shorthand's parser for its own share
//! when it has no explicit value of its own.

use serde::Serialize;

use crate::error::PropertyError;
use crate::id::{PropertyId, Subproperty};
use crate::list::PropertyList;
use crate::maker::PropertyMaker;
use crate::values::{CompoundKind, CompoundValue, Property};

/// How a shorthand's values are distributed to the properties it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShorthandParser {
    /// Each value goes to the first covered property that accepts it:
    /// `border-top="1pt solid red"`.
    Generic,
    /// One to four values distributed top, right, bottom, left:
    /// `margin`, `padding`, `border-width`.
    BoxProperty,
    /// `border-spacing`: one value for both directions, or inline then
    /// block progression direction.
    BorderSpacing,
}

impl ShorthandParser {
    /// The value `shorthand` implies for `target`, if any.
    ///
    /// A lone `inherit` takes the parent's value for every covered property.
    ///
    /// # Errors
    /// Propagates conversion failures.
    pub fn value_for_property(
        self,
        target: PropertyId,
        shorthand: &Property,
        maker: &PropertyMaker,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        let values = shorthand.as_list();
        if matches!(values, [Property::NcName(name)] if name == "inherit") {
            return list.get_from_parent(target).map(Some);
        }

        match self {
            Self::Generic => Self::generic(values, maker, list),
            Self::BoxProperty => Self::box_side(target, values, maker, list),
            Self::BorderSpacing => Self::border_spacing(values, maker, list),
        }
    }

    fn generic(
        values: &[Property],
        maker: &PropertyMaker,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        for value in values {
            if let Some(converted) = maker.convert_shorthand_property(value.clone(), list)? {
                return Ok(Some(converted));
            }
        }
        Ok(None)
    }

    /// [XSL 1.1 § 7.31.14 "margin"](https://www.w3.org/TR/xsl11/)
    /// "If there is only one value, it applies to all sides. If there are
    /// two values, the top and bottom margins are set to the first value and
    /// the right and left margins are set to the second. If there are three
    /// values, the top is set to the first value, the left and right are set
    /// to the second, and the bottom is set to the third."
    fn box_side(
        target: PropertyId,
        values: &[Property],
        maker: &PropertyMaker,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        let count = values.len();
        let index = match Side::of(target) {
            Some(Side::Top) => 0,
            Some(Side::Right) => usize::from(count > 1),
            Some(Side::Bottom) => {
                if count > 2 {
                    2
                } else {
                    0
                }
            }
            Some(Side::Left) => {
                if count > 3 {
                    3
                } else {
                    usize::from(count > 1)
                }
            }
            None => return Ok(None),
        };
        match values.get(index) {
            Some(value) => maker.convert_shorthand_property(value.clone(), list),
            None => Ok(None),
        }
    }

    fn border_spacing(
        values: &[Property],
        maker: &PropertyMaker,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        let (ipd, bpd) = match values {
            [both] => (both, both),
            [ipd, bpd] => (ipd, bpd),
            _ => return Ok(None),
        };
        let (Some(ipd), Some(bpd)) = (ipd.as_numeric_length(), bpd.as_numeric_length()) else {
            return Ok(None);
        };
        let mut pair = CompoundValue::new(CompoundKind::LengthPair);
        pair.set_component(Subproperty::InlineProgressionDirection, ipd.into())?;
        pair.set_component(Subproperty::BlockProgressionDirection, bpd.into())?;
        maker.convert_property(pair.into(), list)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// The box side a property covered by a box shorthand sits on.
    const fn of(id: PropertyId) -> Option<Self> {
        use PropertyId as P;
        match id {
            P::MarginTop | P::PaddingTop | P::BorderTopWidth | P::BorderTopStyle
            | P::BorderTopColor => Some(Self::Top),
            P::MarginRight | P::PaddingRight | P::BorderRightWidth | P::BorderRightStyle
            | P::BorderRightColor => Some(Self::Right),
            P::MarginBottom | P::PaddingBottom | P::BorderBottomWidth | P::BorderBottomStyle
            | P::BorderBottomColor => Some(Self::Bottom),
            P::MarginLeft | P::PaddingLeft | P::BorderLeftWidth | P::BorderLeftStyle
            | P::BorderLeftColor => Some(Self::Left),
            _ => None,
        }
    }
}
