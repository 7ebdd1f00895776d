//! Compound makers: one sub-maker per component.
//!
//! [XSL 1.1 § 5.3.1 Compound Properties](https://www.w3.org/TR/xsl11/)
//! "A compound property... may be specified as a whole, or by specifying
//! each component separately."

use super::{PropertyMaker, with_component};
use crate::error::PropertyError;
use crate::id::{COMPOUND_COUNT, PropertyId, PropertyRef, Subproperty};
use crate::list::PropertyList;
use crate::values::{CompoundKind, CompoundValue, Property};

/// The component makers of a compound property.
#[derive(Debug, Clone)]
pub struct CompoundMaker {
    kind: CompoundKind,
    /// Indexed by [`Subproperty::slot`].
    subproperties: Vec<Option<PropertyMaker>>,
    /// Slot of the first component marked set-by-shorthand. Its maker is the
    /// one that converts a scalar given for the whole compound.
    shorthand_slot: Option<usize>,
}

impl CompoundMaker {
    /// An empty compound maker of `kind`.
    #[must_use]
    pub fn new(kind: CompoundKind) -> Self {
        Self {
            kind,
            subproperties: vec![None; COMPOUND_COUNT],
            shorthand_slot: None,
        }
    }

    /// Add the maker for one component. Its id is re-based onto `base`.
    #[must_use]
    pub fn add_subprop_maker(mut self, base: PropertyId, mut maker: PropertyMaker) -> Self {
        let Some(sub) = maker.id().sub else {
            return self;
        };
        maker.set_id(PropertyRef::component(base, sub));
        if maker.is_set_by_shorthand() && self.shorthand_slot.is_none() {
            self.shorthand_slot = Some(sub.slot());
        }
        self.subproperties[sub.slot()] = Some(maker);
        self
    }

    /// Point every component maker at `base`.
    pub(crate) fn rebase(&mut self, base: PropertyId) {
        for maker in self.subproperties.iter_mut().flatten() {
            let id = maker.id().rebase(base);
            maker.set_id(id);
        }
    }

    /// The shape of the values this maker builds.
    #[must_use]
    pub const fn kind(&self) -> CompoundKind {
        self.kind
    }

    /// The maker of one component.
    #[must_use]
    pub fn subproperty(&self, sub: Subproperty) -> Option<&PropertyMaker> {
        self.subproperties.get(sub.slot())?.as_ref()
    }

    /// The maker that converts a scalar given for the whole compound.
    #[must_use]
    pub fn shorthand_maker(&self) -> Option<&PropertyMaker> {
        self.subproperties.get(self.shorthand_slot?)?.as_ref()
    }

    fn makers(&self) -> impl Iterator<Item = &PropertyMaker> {
        self.subproperties.iter().flatten()
    }

    /// A fresh aggregate with every component at its initial value.
    ///
    /// # Errors
    /// Propagates a component maker's failure to parse its default.
    pub fn make_compound(&self, list: &PropertyList) -> Result<CompoundValue, PropertyError> {
        let mut compound = CompoundValue::new(self.kind);
        for maker in self.makers() {
            let Some(sub) = maker.id().sub else {
                continue;
            };
            if maker.initial_value().is_none() {
                continue;
            }
            let value = maker.make_default(list)?;
            compound.set_component(sub, value)?;
        }
        Ok(compound)
    }

    /// Coerce a value into an aggregate of this kind.
    ///
    /// An aggregate of the same kind passes through. A list of values is
    /// spread over the components in their written order. Anything else is
    /// converted by the set-by-shorthand component's maker and copied into
    /// every set-by-shorthand component of a fresh aggregate, so
    /// `space-before="6pt"` sets minimum, optimum and maximum to 6pt.
    ///
    /// # Errors
    /// Propagates failures building the fresh aggregate.
    pub fn convert(
        &self,
        value: Property,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        if matches!(&value, Property::Compound(compound) if compound.kind() == self.kind) {
            return Ok(Some(value));
        }
        if let Property::List(items) = &value {
            return self.convert_list(items, list);
        }

        let Some(shorthand) = self.shorthand_maker() else {
            return Ok(None);
        };
        let Some(scalar) = shorthand.convert_property(value, list)? else {
            return Ok(None);
        };

        let mut compound = self.make_compound(list)?;
        for maker in self.makers().filter(|maker| maker.is_set_by_shorthand()) {
            if let Some(sub) = maker.id().sub {
                compound.set_component(sub, scalar.clone())?;
            }
        }
        Ok(Some(compound.into()))
    }

    /// `"1pt 2pt 3pt"` on a length-range: minimum 1pt, optimum 2pt and
    /// maximum 3pt, each converted by its own component maker. Components
    /// past the end of the list keep their initial values. A list longer
    /// than the component count, or an item a component rejects, does not
    /// convert.
    fn convert_list(
        &self,
        items: &[Property],
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        let components = self.kind.components();
        if items.len() > components.len() {
            return Ok(None);
        }
        let mut compound = self.make_compound(list)?;
        for (&sub, item) in components.iter().zip(items) {
            let Some(maker) = self.subproperty(sub) else {
                return Ok(None);
            };
            let Some(component) = maker.convert_property(item.clone(), list)? else {
                return Ok(None);
            };
            compound.set_component(sub, component)?;
        }
        Ok(Some(compound.into()))
    }

    /// Set one component from an attribute string.
    ///
    /// `base` is the aggregate built so far on this node. When there is
    /// none a fresh one with default components is made first.
    ///
    /// # Errors
    /// Returns [`PropertyError::InconsistentCompound`] for a component this
    /// kind lacks, or the component maker's parse failure.
    pub fn make_component(
        &self,
        owner: &PropertyMaker,
        base: Option<Property>,
        sub: Subproperty,
        list: &PropertyList,
        value: &str,
    ) -> Result<Property, PropertyError> {
        let Some(maker) = self.subproperty(sub) else {
            return Err(PropertyError::InconsistentCompound {
                kind: owner.id().to_string(),
                component: sub.to_string(),
            });
        };
        let whole = match base {
            Some(whole @ Property::Compound(_)) => whole,
            Some(other) => self.convert(other, list)?.ok_or_else(|| {
                PropertyError::NoConversion {
                    property: owner.id().to_string(),
                    value: value.to_string(),
                }
            })?,
            None => self.make_compound(list)?.into(),
        };
        let component = maker.make(list, value)?;
        with_component(whole, sub, component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maker::Datatype;

    #[test]
    fn test_add_subprop_maker_rebases_and_tracks_shorthand_slot() {
        let compound = CompoundMaker::new(CompoundKind::Space)
            .add_subprop_maker(
                PropertyId::SpaceAfter,
                PropertyMaker::component(
                    PropertyId::SpaceBefore,
                    Subproperty::Minimum,
                    Datatype::Length,
                )
                .set_by_shorthand(),
            )
            .add_subprop_maker(
                PropertyId::SpaceAfter,
                PropertyMaker::component(
                    PropertyId::SpaceBefore,
                    Subproperty::Precedence,
                    Datatype::Number,
                ),
            );

        let minimum = compound.subproperty(Subproperty::Minimum).unwrap();
        assert_eq!(
            minimum.id(),
            PropertyRef::component(PropertyId::SpaceAfter, Subproperty::Minimum)
        );
        assert_eq!(
            compound.shorthand_maker().map(PropertyMaker::id),
            Some(minimum.id())
        );
        assert!(compound.subproperty(Subproperty::Maximum).is_none());
    }

    #[test]
    fn test_rebase_moves_every_component() {
        let mut compound = CompoundMaker::new(CompoundKind::LengthConditional).add_subprop_maker(
            PropertyId::PaddingTop,
            PropertyMaker::component(PropertyId::PaddingTop, Subproperty::Length, Datatype::Length),
        );
        compound.rebase(PropertyId::PaddingStart);
        assert_eq!(
            compound.subproperty(Subproperty::Length).unwrap().id().base,
            PropertyId::PaddingStart
        );
    }
}
