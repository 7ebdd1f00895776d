//! Property values.
//!
//! A [`Property`] is the tagged result of resolving one property on one
//! formatting object. Makers produce them from attribute strings, property
//! lists cache and inherit them, and layout reads them through the typed
//! accessors below.

mod color;
mod compound;
mod keyword;
mod length;

use core::fmt;

use serde::Serialize;

pub use color::Color;
pub use compound::{CompoundKind, CompoundValue};
pub use keyword::EnumValue;
pub use length::{
    DEFAULT_FONT_SIZE_PT, DEFAULT_SOURCE_RESOLUTION, Length, LengthUnit, MILLIPOINTS_PER_POINT,
    PercentBase, Percentage,
};

use crate::id::Subproperty;

/// One resolved (or partially resolved) property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Property {
    /// A length, possibly with a pending percentage.
    Length(Length),
    /// A plain number (`column-number`, `font-weight`, keep strengths).
    Number(f64),
    /// An enumerated keyword accepted by the property.
    Enum(EnumValue),
    /// A bare name not yet matched against any property's keywords.
    NcName(String),
    /// A string (`font-family`, `id`, `master-name`).
    String(String),
    /// A color.
    Color(Color),
    /// The whitespace-separated values of a shorthand.
    List(Vec<Property>),
    /// A compound aggregate.
    Compound(Box<CompoundValue>),
}

impl Property {
    /// The length, if this is one.
    #[must_use]
    pub const fn as_length(&self) -> Option<Length> {
        match self {
            Self::Length(length) => Some(*length),
            _ => None,
        }
    }

    /// A numeric view usable in length arithmetic: lengths as-is, the number
    /// zero as a zero length, and the principal component of length-like
    /// compounds (`.length` of a conditional length, `.optimum` of a space
    /// or range).
    #[must_use]
    pub fn as_numeric_length(&self) -> Option<Length> {
        match self {
            Self::Length(length) => Some(*length),
            Self::Number(n) if n.abs() < f64::EPSILON => Some(Length::ZERO),
            Self::Compound(compound) => {
                let principal = match compound.kind() {
                    CompoundKind::LengthConditional => Subproperty::Length,
                    CompoundKind::Space | CompoundKind::LengthRange => Subproperty::Optimum,
                    CompoundKind::Keep | CompoundKind::LengthPair => return None,
                };
                compound.component(principal)?.as_numeric_length()
            }
            _ => None,
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The keyword, if this is an enumerated value.
    #[must_use]
    pub const fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Self::Enum(value) => Some(*value),
            _ => None,
        }
    }

    /// The text of a string or bare name.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::NcName(s) => Some(s),
            _ => None,
        }
    }

    /// The color, if this is one.
    #[must_use]
    pub const fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// The values of a list, or this value alone.
    #[must_use]
    pub fn as_list(&self) -> &[Self] {
        match self {
            Self::List(values) => values,
            other => core::slice::from_ref(other),
        }
    }

    /// The aggregate, if this is a compound value.
    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundValue> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    /// One component of a compound value.
    #[must_use]
    pub fn component(&self, sub: Subproperty) -> Option<&Self> {
        self.as_compound()?.component(sub)
    }

    /// The literal this value was made from, for values that keep it.
    #[must_use]
    pub fn specified_value(&self) -> Option<&str> {
        self.as_compound()?.specified()
    }
}

impl From<Length> for Property {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

impl From<EnumValue> for Property {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<CompoundValue> for Property {
    fn from(value: CompoundValue) -> Self {
        Self::Compound(Box::new(value))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => write!(f, "{length}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Enum(value) => write!(f, "{value}"),
            Self::NcName(s) | Self::String(s) => write!(f, "{s}"),
            Self::Color(color) => write!(f, "{color}"),
            Self::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            Self::Compound(compound) => write!(f, "{compound}"),
        }
    }
}
