//! Property lists.
//!
//! [XSL 1.1 § 5 Property Refinement / Resolution](https://www.w3.org/TR/xsl11/)
//!
//! Every formatting object owns a [`PropertyList`]: the attributes bound on
//! it, a link to its parent's list, and a cache of resolved values. All
//! lookups go through the registry's makers, which implement the actual
//! resolution order. The list only stores and navigates.

use core::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::PropertyError;
use crate::id::{PropertyId, PropertyRef};
use crate::registry::PropertyRegistry;
use crate::values::Property;
use crate::writing_mode::WritingMode;

/// Attributes bound before all others, in this order. Later attributes may
/// depend on their values (`em` lengths on `font-size`, corresponding
/// properties on `writing-mode`).
const PRIORITY_ATTRIBUTES: [&str; 4] = [
    "writing-mode",
    "column-number",
    "number-columns-spanned",
    "font-size",
];

/// What kinds of areas the owning formatting object generates. Indent
/// computation depends on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AreaTraits {
    /// The object generates inline areas (`fo:block`, `fo:inline`).
    pub generates_inline_areas: bool,
    /// The object generates reference areas (`fo:region-body`, `fo:table`).
    pub generates_reference_areas: bool,
}

/// Why an attribute was not bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindIssueKind {
    /// The attribute names no property in the catalog.
    UnknownProperty,
    /// The value could not be made into the property.
    Invalid(PropertyError),
}

/// An attribute that was skipped while binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindIssue {
    /// Attribute name as written.
    pub attribute: String,
    /// Attribute value as written.
    pub value: String,
    /// What went wrong.
    pub kind: BindIssueKind,
}

/// The properties of one formatting object.
#[derive(Debug)]
pub struct PropertyList {
    registry: Arc<PropertyRegistry>,
    parent: Option<Rc<PropertyList>>,
    element: String,
    traits: AreaTraits,
    explicit: BTreeMap<PropertyId, Property>,
    /// Fully resolved values. Cleared whenever an explicit value is bound.
    cache: RefCell<HashMap<PropertyId, Property>>,
}

impl PropertyList {
    /// An empty list for an element named `element`.
    #[must_use]
    pub fn new(
        registry: Arc<PropertyRegistry>,
        parent: Option<Rc<Self>>,
        element: impl Into<String>,
        traits: AreaTraits,
    ) -> Self {
        Self {
            registry,
            parent,
            element: element.into(),
            traits,
            explicit: BTreeMap::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The maker registry this list resolves through.
    #[must_use]
    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// The parent formatting object's list.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// The name of the owning element, e.g. `fo:block`.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// The area traits of the owning formatting object.
    #[must_use]
    pub const fn traits(&self) -> AreaTraits {
        self.traits
    }

    /// The resolved value of `id`.
    ///
    /// # Errors
    /// Returns [`PropertyError::NoValue`] if nothing applies (a shorthand
    /// with no explicit value), or any resolution failure.
    pub fn get(&self, id: PropertyId) -> Result<Property, PropertyError> {
        self.get_with(id, true, true)?
            .ok_or_else(|| PropertyError::NoValue {
                property: id.to_string(),
            })
    }

    /// The resolved value of a property or one of its components.
    ///
    /// # Errors
    /// As [`PropertyList::get`].
    pub fn get_ref(&self, id: PropertyRef) -> Result<Property, PropertyError> {
        self.registry
            .maker(id.base)
            .get(id.sub, self, true, true)?
            .ok_or_else(|| PropertyError::NoValue {
                property: id.to_string(),
            })
    }

    /// Resolve `id`, optionally inheriting and falling back to the initial
    /// value.
    ///
    /// # Errors
    /// Propagates any resolution failure.
    pub fn get_with(
        &self,
        id: PropertyId,
        try_inherit: bool,
        try_default: bool,
    ) -> Result<Option<Property>, PropertyError> {
        let cacheable = try_inherit && try_default;
        if let (true, Some(value)) = (cacheable, self.cache.borrow().get(&id)) {
            return Ok(Some(value.clone()));
        }

        let value = self
            .registry
            .maker(id)
            .get(None, self, try_inherit, try_default)?;

        if let (true, Some(value)) = (cacheable, &value) {
            let _ = self.cache.borrow_mut().insert(id, value.clone());
        }
        Ok(value)
    }

    /// The value bound directly on this node.
    #[must_use]
    pub fn get_explicit(&self, id: PropertyId) -> Option<&Property> {
        self.explicit.get(&id)
    }

    /// The explicit value, else the value an explicit shorthand on this
    /// node implies.
    ///
    /// # Errors
    /// Propagates shorthand expansion failures.
    pub fn get_explicit_or_shorthand(
        &self,
        id: PropertyId,
    ) -> Result<Option<Property>, PropertyError> {
        if let Some(value) = self.get_explicit(id) {
            return Ok(Some(value.clone()));
        }
        self.registry.maker(id).get_shorthand(self)
    }

    /// The parent's value if the property is inherited, else its initial
    /// value.
    ///
    /// # Errors
    /// Propagates any resolution failure.
    pub fn get_inherited(&self, id: PropertyId) -> Result<Property, PropertyError> {
        let maker = self.registry.maker(id);
        if maker.is_inherited() {
            self.get_from_parent(id)
        } else {
            maker.make_default(self)
        }
    }

    /// The parent's resolved value, or the initial value on the root.
    ///
    /// # Errors
    /// Propagates any resolution failure.
    pub fn get_from_parent(&self, id: PropertyId) -> Result<Property, PropertyError> {
        match self.parent() {
            Some(parent) => parent.get(id),
            None => self.registry.maker(id).make_default(self),
        }
    }

    /// The nearest explicit value on this node or an ancestor, else the
    /// initial value.
    ///
    /// # Errors
    /// Propagates a failure making the initial value.
    pub fn get_nearest_specified(&self, id: PropertyId) -> Result<Property, PropertyError> {
        let mut current = Some(self);
        while let Some(list) = current {
            if let Some(value) = list.get_explicit(id) {
                return Ok(value.clone());
            }
            current = list.parent();
        }
        self.registry.maker(id).make_default(self)
    }

    /// The effective writing mode of this node.
    ///
    /// # Errors
    /// Propagates a failure resolving `writing-mode`.
    pub fn writing_mode(&self) -> Result<WritingMode, PropertyError> {
        let value = self.get(PropertyId::WritingMode)?;
        Ok(value
            .as_enum()
            .and_then(WritingMode::from_enum)
            .unwrap_or_default())
    }

    /// Select one of three ids by this node's writing-mode family.
    ///
    /// # Errors
    /// Propagates a failure resolving `writing-mode`.
    pub fn wm_map(
        &self,
        lr_tb: PropertyId,
        rl_tb: PropertyId,
        tb_rl: PropertyId,
    ) -> Result<PropertyId, PropertyError> {
        Ok(self.writing_mode()?.select(lr_tb, rl_tb, tb_rl))
    }

    /// Bind a value directly on this node.
    pub fn put_explicit(&mut self, id: PropertyId, value: Property) {
        let _ = self.explicit.insert(id, value);
        self.cache.get_mut().clear();
    }

    /// The explicit values, in catalog order.
    pub fn explicit(&self) -> impl Iterator<Item = (PropertyId, &Property)> {
        self.explicit.iter().map(|(id, value)| (*id, value))
    }

    /// Bind the attributes of an element.
    ///
    /// Priority attributes are bound first, then the rest in document
    /// order. A component attribute (`space-before.minimum`) extends the
    /// base compound; if the base attribute is also present it is parsed
    /// first and the component applied on top of it. Namespace declarations
    /// and prefixed attributes are ignored.
    ///
    /// Attributes that cannot be bound are skipped and returned.
    pub fn bind_attributes(&mut self, attributes: &[(&str, &str)]) -> Vec<BindIssue> {
        let mut issues = Vec::new();

        for name in PRIORITY_ATTRIBUTES {
            if let Some((_, value)) = attributes.iter().find(|(attr, _)| *attr == name) {
                self.bind_attribute(attributes, name, value, &mut issues);
            }
        }

        for (name, value) in attributes {
            if PRIORITY_ATTRIBUTES.contains(name) || name.contains(':') || *name == "xmlns" {
                continue;
            }
            self.bind_attribute(attributes, name, value, &mut issues);
        }
        issues
    }

    fn bind_attribute(
        &mut self,
        attributes: &[(&str, &str)],
        name: &str,
        value: &str,
        issues: &mut Vec<BindIssue>,
    ) {
        let issue = |kind| BindIssue {
            attribute: name.to_string(),
            value: value.to_string(),
            kind,
        };

        let Some(id) = PropertyRef::parse(name) else {
            issues.push(issue(BindIssueKind::UnknownProperty));
            return;
        };
        let maker = self.registry.maker(id.base);

        let made = match id.sub {
            None => {
                // Already built from component attributes.
                if self.get_explicit(id.base).is_some() {
                    return;
                }
                maker.make(self, value)
            }
            Some(sub) => self
                .find_base_property(attributes, id.base)
                .and_then(|base| maker.make_component(base, sub, self, value)),
        };

        match made {
            Ok(property) => self.put_explicit(id.base, property),
            Err(err) => issues.push(issue(BindIssueKind::Invalid(err))),
        }
    }

    /// The compound a component attribute extends: the one already bound,
    /// else the base attribute parsed now.
    fn find_base_property(
        &self,
        attributes: &[(&str, &str)],
        id: PropertyId,
    ) -> Result<Option<Property>, PropertyError> {
        if let Some(value) = self.get_explicit(id) {
            return Ok(Some(value.clone()));
        }
        let name = id.name();
        match attributes.iter().find(|(attr, _)| *attr == name) {
            Some((_, value)) => self.registry.maker(id).make(self, value).map(Some),
            None => Ok(None),
        }
    }
}
