//! Corresponding properties.
//!
//! [XSL 1.1 § 5.3.2 Margin, Space, and Indent Properties](https://www.w3.org/TR/xsl11/)
//! "The computed value of a writing-mode-relative property is derived from
//! the corresponding absolute property, and vice versa."
//!
//! A logical property names one absolute property per writing-mode family.
//! When that absolute property is explicit on the node it wins over the
//! logical property's own specification ("forcing").

use super::PropertyMaker;
use super::dimension::{self, DimensionExtra};
use super::indent::{self, IndentCorresponding};
use crate::error::PropertyError;
use crate::id::PropertyId;
use crate::list::PropertyList;
use crate::values::Property;

/// How the computed value is derived once the corresponding id is known.
#[derive(Debug, Clone)]
pub enum CorrespondingFlavor {
    /// Convert the corresponding property's value.
    Plain,
    /// `block-progression-dimension`, `inline-progression-dimension`: also
    /// pull the `.minimum` and `.maximum` components from `min-*`/`max-*`.
    Dimension(DimensionExtra),
    /// `start-indent`, `end-indent`: margin plus padding plus border width.
    Indent(IndentCorresponding),
}

/// The absolute-direction siblings of a property.
#[derive(Debug, Clone)]
pub struct CorrespondingMaker {
    lr_tb: PropertyId,
    rl_tb: PropertyId,
    tb_rl: PropertyId,
    use_parent: bool,
    relative: bool,
    flavor: CorrespondingFlavor,
}

impl CorrespondingMaker {
    /// Correspond to `lr_tb`, `rl_tb` and `tb_rl` in the three writing-mode
    /// families. Not relative, own writing mode.
    #[must_use]
    pub const fn new(lr_tb: PropertyId, rl_tb: PropertyId, tb_rl: PropertyId) -> Self {
        Self {
            lr_tb,
            rl_tb,
            tb_rl,
            use_parent: false,
            relative: false,
            flavor: CorrespondingFlavor::Plain,
        }
    }

    /// Select the corresponding id with the parent's writing mode.
    #[must_use]
    pub const fn use_parent(mut self) -> Self {
        self.use_parent = true;
        self
    }

    /// Mark the owning property as writing-mode relative, which enables
    /// forcing.
    #[must_use]
    pub const fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    /// Choose how the computed value is derived.
    #[must_use]
    pub fn flavor(mut self, flavor: CorrespondingFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Whether the owning property is writing-mode relative.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.relative
    }

    /// The three corresponding ids, in family order.
    #[must_use]
    pub const fn ids(&self) -> [PropertyId; 3] {
        [self.lr_tb, self.rl_tb, self.tb_rl]
    }

    /// The list whose writing mode selects the corresponding id. `None` on
    /// the root when the parent's is wanted.
    pub(crate) fn wm_list<'a>(&self, list: &'a PropertyList) -> Option<&'a PropertyList> {
        if self.use_parent {
            list.parent()
        } else {
            Some(list)
        }
    }

    /// The corresponding id selected by the relevant writing mode.
    ///
    /// # Errors
    /// Propagates a failure resolving `writing-mode`.
    pub fn corresponding_id(&self, list: &PropertyList) -> Result<Option<PropertyId>, PropertyError> {
        match self.wm_list(list) {
            Some(wm_list) => wm_list.wm_map(self.lr_tb, self.rl_tb, self.tb_rl).map(Some),
            None => Ok(None),
        }
    }

    /// True iff the owning property is relative and the selected absolute
    /// property is explicit on this node. Dimension makers also count an
    /// explicit `min-*`/`max-*` sibling.
    ///
    /// # Errors
    /// Propagates a failure resolving `writing-mode`.
    pub fn is_forced(&self, list: &PropertyList) -> Result<bool, PropertyError> {
        if self.is_base_forced(list)? {
            return Ok(true);
        }
        match &self.flavor {
            CorrespondingFlavor::Dimension(extra) => extra.is_forced(list),
            CorrespondingFlavor::Plain | CorrespondingFlavor::Indent(_) => Ok(false),
        }
    }

    pub(crate) fn is_base_forced(&self, list: &PropertyList) -> Result<bool, PropertyError> {
        if !self.relative {
            return Ok(false);
        }
        let Some(id) = self.corresponding_id(list)? else {
            return Ok(false);
        };
        Ok(list.get_explicit(id).is_some())
    }

    /// Derive the owning property's value from its corresponding property.
    ///
    /// # Errors
    /// Propagates resolution and conversion failures.
    pub fn compute(
        &self,
        owner: &PropertyMaker,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        match &self.flavor {
            CorrespondingFlavor::Plain => self.compute_plain(owner, list),
            CorrespondingFlavor::Dimension(extra) => dimension::compute(self, extra, owner, list),
            CorrespondingFlavor::Indent(extra) => indent::compute(self, extra, owner, list),
        }
    }

    pub(crate) fn compute_plain(
        &self,
        owner: &PropertyMaker,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        let Some(id) = self.corresponding_id(list)? else {
            return Ok(None);
        };
        match list.get_explicit_or_shorthand(id)? {
            Some(value) => owner.convert_property(value, list),
            None => Ok(None),
        }
    }
}
