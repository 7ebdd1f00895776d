//! Compound property values.
//!
//! [XSL 1.1 § 5.11 Property Datatypes](https://www.w3.org/TR/xsl11/)
//! "Compound datatypes... consist of a collection of components, each of
//! which has its own datatype."

use std::collections::BTreeMap;

use core::fmt;

use serde::Serialize;
use strum_macros::Display;

use super::Property;
use crate::error::PropertyError;
use crate::id::Subproperty;

/// The shape of a compound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CompoundKind {
    /// `<space>`: minimum, optimum, maximum, precedence, conditionality.
    Space,
    /// `<length-range>`: minimum, optimum, maximum.
    LengthRange,
    /// `<length-conditional>`: length, conditionality.
    LengthConditional,
    /// `<keep>`: within-line, within-column, within-page.
    Keep,
    /// `<length-bp-ip-direction>`: block- and inline-progression-direction.
    LengthPair,
}

impl CompoundKind {
    /// Components this kind accepts.
    #[must_use]
    pub const fn components(self) -> &'static [Subproperty] {
        match self {
            Self::Space => &[
                Subproperty::Minimum,
                Subproperty::Optimum,
                Subproperty::Maximum,
                Subproperty::Precedence,
                Subproperty::Conditionality,
            ],
            Self::LengthRange => &[
                Subproperty::Minimum,
                Subproperty::Optimum,
                Subproperty::Maximum,
            ],
            Self::LengthConditional => &[Subproperty::Length, Subproperty::Conditionality],
            Self::Keep => &[
                Subproperty::WithinLine,
                Subproperty::WithinColumn,
                Subproperty::WithinPage,
            ],
            Self::LengthPair => &[
                Subproperty::BlockProgressionDirection,
                Subproperty::InlineProgressionDirection,
            ],
        }
    }

    /// True if `sub` is one of this kind's components.
    #[must_use]
    pub fn accepts(self, sub: Subproperty) -> bool {
        self.components().contains(&sub)
    }
}

/// An aggregate of component values addressed by [`Subproperty`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundValue {
    kind: CompoundKind,
    components: BTreeMap<Subproperty, Property>,
    /// The literal the value was made from, kept for properties that are
    /// inherited as specified rather than as computed (`line-height`).
    #[serde(skip_serializing_if = "Option::is_none")]
    specified: Option<String>,
}

impl CompoundValue {
    /// An aggregate with no components set.
    #[must_use]
    pub const fn new(kind: CompoundKind) -> Self {
        Self {
            kind,
            components: BTreeMap::new(),
            specified: None,
        }
    }

    /// The shape of this aggregate.
    #[must_use]
    pub const fn kind(&self) -> CompoundKind {
        self.kind
    }

    /// One component, if set.
    #[must_use]
    pub fn component(&self, sub: Subproperty) -> Option<&Property> {
        self.components.get(&sub)
    }

    /// Set one component.
    ///
    /// # Errors
    /// Returns [`PropertyError::InconsistentCompound`] if `sub` is not a
    /// component of this kind.
    pub fn set_component(&mut self, sub: Subproperty, value: Property) -> Result<(), PropertyError> {
        if !self.kind.accepts(sub) {
            return Err(PropertyError::InconsistentCompound {
                kind: self.kind.to_string(),
                component: sub.to_string(),
            });
        }
        let _ = self.components.insert(sub, value);
        Ok(())
    }

    /// Components in catalog order.
    pub fn components(&self) -> impl Iterator<Item = (Subproperty, &Property)> {
        self.components.iter().map(|(sub, value)| (*sub, value))
    }

    /// The literal this value was made from, if retained.
    #[must_use]
    pub fn specified(&self) -> Option<&str> {
        self.specified.as_deref()
    }

    /// Retain the literal this value was made from.
    pub fn set_specified(&mut self, specified: impl Into<String>) {
        self.specified = Some(specified.into());
    }
}

impl fmt::Display for CompoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, (sub, value)) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{sub}={value}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{EnumValue, Length};

    #[test]
    fn test_set_component_checks_kind() {
        let mut space = CompoundValue::new(CompoundKind::Space);
        assert!(space
            .set_component(Subproperty::Minimum, Property::Length(Length::from_points(1.0)))
            .is_ok());
        assert!(space
            .set_component(Subproperty::WithinPage, Property::Enum(EnumValue::Always))
            .is_err());
        assert_eq!(
            space.component(Subproperty::Minimum),
            Some(&Property::Length(Length::from_points(1.0)))
        );
        assert_eq!(space.component(Subproperty::Optimum), None);
    }

    #[test]
    fn test_display_lists_components() {
        let mut pair = CompoundValue::new(CompoundKind::LengthPair);
        pair.set_component(
            Subproperty::BlockProgressionDirection,
            Property::Length(Length::from_points(2.0)),
        )
        .unwrap();
        pair.set_component(
            Subproperty::InlineProgressionDirection,
            Property::Length(Length::from_points(3.0)),
        )
        .unwrap();
        assert_eq!(
            pair.to_string(),
            "length-pair(block-progression-direction=2pt inline-progression-direction=3pt)"
        );
    }
}
