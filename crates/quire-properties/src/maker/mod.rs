//! Property makers.
//!
//! A [`PropertyMaker`] is the immutable descriptor for one property id. It
//! knows how to turn an attribute string into a [`Property`], how to coerce
//! a value produced for another property (a shorthand, a corresponding
//! absolute property) into its own type, and how to find the value that
//! applies on a node when none was specified there.
//!
//! The behaviour of the specialised makers is selected by two tagged unions
//! rather than by subclassing:
//!
//! - [`MakerKind`]: plain, compound, or line-height (a compound that keeps
//!   its specified value and recomputes it on every node).
//! - [`CorrespondingFlavor`]: plain corresponding, dimension, or indent.
//!
//! Makers hold no per-document state; a registry of them is shared by every
//! document built in the process.

mod compound;
mod corresponding;
mod dimension;
mod indent;
mod line_height;

use core::str::FromStr;
use std::sync::OnceLock;

use quire_common::warning::warn_once;

pub use compound::CompoundMaker;
pub use corresponding::{CorrespondingFlavor, CorrespondingMaker};
pub use dimension::DimensionExtra;
pub use indent::{IndentCorresponding, IndentRule};

use crate::error::PropertyError;
use crate::expr::PropertyParser;
use crate::id::{PropertyId, PropertyRef, Subproperty};
use crate::list::PropertyList;
use crate::shorthand::ShorthandParser;
use crate::values::{Color, EnumValue, PercentBase, Property};

/// The value space a plain maker converts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    /// `<length>`, plus any enumerated keywords the maker accepts.
    Length,
    /// `<number>` or `<integer>`, plus enumerated keywords.
    Number,
    /// Enumerated keywords only.
    Enum,
    /// Any string; the raw attribute text is kept.
    String,
    /// `<color>`
    Color,
    /// The value list of a shorthand.
    Shorthand,
    /// A compound aggregate; conversion is delegated to the sub-makers.
    Compound,
}

/// Structural variant of a maker.
#[derive(Debug, Clone)]
pub enum MakerKind {
    /// A scalar property.
    Simple,
    /// An aggregate of component properties.
    Compound(CompoundMaker),
    /// `line-height`: a space aggregate inherited as specified.
    LineHeight(CompoundMaker),
}

/// Immutable descriptor for one property.
#[derive(Debug, Clone)]
pub struct PropertyMaker {
    id: PropertyRef,
    datatype: Datatype,
    inherited: bool,
    default: Option<&'static str>,
    context_dependent: bool,
    set_by_shorthand: bool,
    percent_base: Option<PercentBase>,
    enums: Vec<EnumValue>,
    keywords: Vec<(&'static str, &'static str)>,
    shorthands: Vec<PropertyId>,
    shorthand_parser: Option<ShorthandParser>,
    kind: MakerKind,
    corresponding: Option<CorrespondingMaker>,
    default_cache: OnceLock<Property>,
}

impl PropertyMaker {
    /// A plain maker for `id`. Not inherited, no default.
    #[must_use]
    pub const fn new(id: PropertyId, datatype: Datatype) -> Self {
        Self::with_ref(PropertyRef::new(id), datatype)
    }

    /// A maker for one component of a compound property.
    #[must_use]
    pub const fn component(base: PropertyId, sub: Subproperty, datatype: Datatype) -> Self {
        Self::with_ref(PropertyRef::component(base, sub), datatype)
    }

    const fn with_ref(id: PropertyRef, datatype: Datatype) -> Self {
        Self {
            id,
            datatype,
            inherited: false,
            default: None,
            context_dependent: false,
            set_by_shorthand: false,
            percent_base: None,
            enums: Vec::new(),
            keywords: Vec::new(),
            shorthands: Vec::new(),
            shorthand_parser: None,
            kind: MakerKind::Simple,
            corresponding: None,
            default_cache: OnceLock::new(),
        }
    }

    // Configuration. Makers are built once, when the registry is created.

    /// Set whether the property is inherited.
    #[must_use]
    pub const fn inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }

    /// Set the initial value, as an attribute string.
    #[must_use]
    pub const fn default_value(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark the default as depending on the node it is made for, so it is
    /// never cached.
    #[must_use]
    pub const fn context_dependent(mut self) -> Self {
        self.context_dependent = true;
        self
    }

    /// Mark this component as receiving the value when the whole compound is
    /// given as a single scalar.
    #[must_use]
    pub const fn set_by_shorthand(mut self) -> Self {
        self.set_by_shorthand = true;
        self
    }

    /// Set what percentages refer to.
    #[must_use]
    pub const fn percent_base(mut self, base: PercentBase) -> Self {
        self.percent_base = Some(base);
        self
    }

    /// Accept these enumerated keywords.
    #[must_use]
    pub fn enums(mut self, values: &[EnumValue]) -> Self {
        self.enums.extend_from_slice(values);
        self
    }

    /// Substitute `keyword` with `value` before parsing.
    #[must_use]
    pub fn keyword(mut self, keyword: &'static str, value: &'static str) -> Self {
        self.keywords.push((keyword, value));
        self
    }

    /// Shorthands that may set this property, most specific first.
    #[must_use]
    pub fn shorthands(mut self, shorthands: &[PropertyId]) -> Self {
        self.shorthands.extend_from_slice(shorthands);
        self
    }

    /// Make this a shorthand property expanded by `parser`.
    #[must_use]
    pub const fn shorthand_parser(mut self, parser: ShorthandParser) -> Self {
        self.shorthand_parser = Some(parser);
        self
    }

    /// Make this a compound maker. Every sub-maker is re-based onto this
    /// maker's id.
    #[must_use]
    pub fn compound(mut self, mut compound: CompoundMaker) -> Self {
        compound.rebase(self.id.base);
        self.datatype = Datatype::Compound;
        self.kind = MakerKind::Compound(compound);
        self
    }

    /// Make this the line-height maker.
    #[must_use]
    pub fn line_height(mut self, mut compound: CompoundMaker) -> Self {
        compound.rebase(self.id.base);
        self.datatype = Datatype::Compound;
        self.kind = MakerKind::LineHeight(compound);
        self
    }

    /// Attach a corresponding-property descriptor.
    #[must_use]
    pub fn corresponding(mut self, corresponding: CorrespondingMaker) -> Self {
        self.corresponding = Some(corresponding);
        self
    }

    /// Copy the configuration of a generic template: inheritance, default,
    /// percent base, keywords, shorthands and, for compounds, independent
    /// copies of every sub-maker re-based onto this maker's id. The id and
    /// any corresponding descriptor are kept.
    #[must_use]
    pub fn use_generic(mut self, generic: &Self) -> Self {
        self.datatype = generic.datatype;
        self.inherited = generic.inherited;
        self.default = generic.default;
        self.context_dependent = generic.context_dependent;
        self.set_by_shorthand = generic.set_by_shorthand;
        self.percent_base = generic.percent_base;
        self.enums.clone_from(&generic.enums);
        self.keywords.clone_from(&generic.keywords);
        self.shorthands.clone_from(&generic.shorthands);
        self.shorthand_parser = generic.shorthand_parser;
        self.kind = match &generic.kind {
            MakerKind::Simple => MakerKind::Simple,
            MakerKind::Compound(compound) => {
                let mut copy = compound.clone();
                copy.rebase(self.id.base);
                MakerKind::Compound(copy)
            }
            MakerKind::LineHeight(compound) => {
                let mut copy = compound.clone();
                copy.rebase(self.id.base);
                MakerKind::LineHeight(copy)
            }
        };
        self
    }

    // Accessors

    /// The property (or component) this maker is for.
    #[must_use]
    pub const fn id(&self) -> PropertyRef {
        self.id
    }

    pub(crate) const fn set_id(&mut self, id: PropertyRef) {
        self.id = id;
    }

    /// The datatype values are converted into.
    #[must_use]
    pub const fn datatype(&self) -> Datatype {
        self.datatype
    }

    /// Whether the property is inherited.
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Whether this component takes the value of a scalar given for the
    /// whole compound.
    #[must_use]
    pub const fn is_set_by_shorthand(&self) -> bool {
        self.set_by_shorthand
    }

    /// The initial value string.
    #[must_use]
    pub const fn initial_value(&self) -> Option<&'static str> {
        self.default
    }

    /// What percentages refer to.
    #[must_use]
    pub const fn percent_base_of(&self) -> Option<PercentBase> {
        self.percent_base
    }

    /// Shorthands that may set this property.
    #[must_use]
    pub fn shorthand_ids(&self) -> &[PropertyId] {
        &self.shorthands
    }

    /// The parser expanding this shorthand, if it is one.
    #[must_use]
    pub const fn parser(&self) -> Option<ShorthandParser> {
        self.shorthand_parser
    }

    /// The structural variant.
    #[must_use]
    pub const fn kind(&self) -> &MakerKind {
        &self.kind
    }

    /// The compound descriptor of compound and line-height makers.
    #[must_use]
    pub const fn compound_maker(&self) -> Option<&CompoundMaker> {
        match &self.kind {
            MakerKind::Compound(compound) | MakerKind::LineHeight(compound) => Some(compound),
            MakerKind::Simple => None,
        }
    }

    /// The corresponding-property descriptor, if any.
    #[must_use]
    pub const fn corresponding_maker(&self) -> Option<&CorrespondingMaker> {
        self.corresponding.as_ref()
    }

    // Resolution

    /// Unified entry point for plain and compound properties.
    ///
    /// With a component, the whole compound value is resolved first and the
    /// component extracted from it. Otherwise [`PropertyMaker::find_property`]
    /// runs, falling back to the initial value when `try_default` is set.
    ///
    /// # Errors
    /// Propagates any resolution failure on the way.
    pub fn get(
        &self,
        sub: Option<Subproperty>,
        list: &PropertyList,
        try_inherit: bool,
        try_default: bool,
    ) -> Result<Option<Property>, PropertyError> {
        if let Some(sub) = sub {
            if self.compound_maker().is_none() {
                return Err(self.no_component(sub));
            }
            let whole = self.get(None, list, try_inherit, try_default)?;
            return Ok(whole.and_then(|value| value.component(sub).cloned()));
        }

        let mut property = self.find_property(list, try_inherit)?;
        if property.is_none() && try_default {
            property = Some(self.make_default(list)?);
        }
        Ok(property)
    }

    /// [XSL 1.1 § 5.1 Specified, Computed, and Actual Values](https://www.w3.org/TR/xsl11/)
    ///
    /// STEP 1: If the corresponding absolute property forces this one,
    ///         compute from it.
    /// STEP 2: Otherwise take the explicit value, else a value implied by a
    ///         shorthand, else a computed value.
    /// STEP 3: "If the property is inherited and no value was specified,
    ///         the computed value of the parent is used."
    ///
    /// # Errors
    /// Propagates any resolution failure on the way.
    pub fn find_property(
        &self,
        list: &PropertyList,
        try_inherit: bool,
    ) -> Result<Option<Property>, PropertyError> {
        let forced = match &self.corresponding {
            Some(corresponding) => corresponding.is_forced(list)?,
            None => false,
        };

        let mut property = if let (true, Some(corresponding)) = (forced, &self.corresponding) {
            corresponding.compute(self, list)?
        } else {
            let mut found = list.get_explicit(self.id.base).cloned();
            if found.is_none() {
                found = self.get_shorthand(list)?;
            }
            if found.is_none() {
                found = self.compute(list)?;
            }
            found
        };

        let inherit = property.is_none() && try_inherit && self.inherited;
        if let Some(parent) = list.parent().filter(|_| inherit) {
            property = parent.get_with(self.id.base, true, false)?;
        }
        Ok(property)
    }

    /// A value implied by the first explicit shorthand that can supply one.
    ///
    /// # Errors
    /// Propagates conversion failures of the shorthand's values.
    pub fn get_shorthand(&self, list: &PropertyList) -> Result<Option<Property>, PropertyError> {
        for shorthand in &self.shorthands {
            let Some(value) = list.get_explicit(*shorthand) else {
                continue;
            };
            let parser = list
                .registry()
                .maker(*shorthand)
                .shorthand_parser
                .unwrap_or(ShorthandParser::Generic);
            if let Some(property) = parser.value_for_property(self.id.base, value, self, list)? {
                return Ok(Some(property));
            }
        }
        Ok(None)
    }

    /// A value derived from other properties, if this maker derives one.
    ///
    /// # Errors
    /// Propagates failures of the derivation.
    pub fn compute(&self, list: &PropertyList) -> Result<Option<Property>, PropertyError> {
        if let MakerKind::LineHeight(_) = self.kind {
            return line_height::compute(self, list);
        }
        match &self.corresponding {
            Some(corresponding) => corresponding.compute(self, list),
            None => Ok(None),
        }
    }

    /// The initial value in the context of `list`.
    ///
    /// # Errors
    /// Returns [`PropertyError::NoValue`] for properties without an initial
    /// value (shorthands), or a parse failure of the default string.
    pub fn make_default(&self, list: &PropertyList) -> Result<Property, PropertyError> {
        if let Some(cached) = self.default_cache.get().filter(|_| !self.context_dependent) {
            return Ok(cached.clone());
        }

        let property = match (self.default, &self.kind) {
            (Some(default), _) => self.make(list, default)?,
            (None, MakerKind::Compound(compound) | MakerKind::LineHeight(compound)) => {
                compound.make_compound(list)?.into()
            }
            (None, MakerKind::Simple) => {
                return Err(PropertyError::NoValue {
                    property: self.id.to_string(),
                });
            }
        };

        if !self.context_dependent {
            let _ = self.default_cache.set(property.clone());
        }
        Ok(property)
    }

    /// Parse an attribute string into a value of this property.
    ///
    /// STEP 1: `inherit` takes the parent's value.
    /// STEP 2: Keyword substitution, then enumerated keywords.
    /// STEP 3: Otherwise parse the expression and convert the result.
    ///
    /// # Errors
    /// Returns [`PropertyError::UnknownKeyword`] for a name outside an
    /// enumerated property's keywords, [`PropertyError::NoConversion`] when
    /// the parsed value does not fit this property, or the parser's error.
    pub fn make(&self, list: &PropertyList, value: &str) -> Result<Property, PropertyError> {
        let value = value.trim();

        if value == "inherit" && self.datatype != Datatype::Shorthand {
            return self.make_inherited(list);
        }

        let literal = self.check_value_keywords(value);
        let parsed = if let Some(keyword) = self.check_enum_values(literal) {
            Property::Enum(keyword)
        } else if self.datatype == Datatype::String {
            Property::String(unquote(literal).to_string())
        } else {
            PropertyParser::parse(literal, self, list)?
        };

        let bare_name = matches!(parsed, Property::NcName(_));
        let mut converted = self.convert_property(parsed, list)?.ok_or_else(|| {
            if bare_name && self.datatype == Datatype::Enum {
                PropertyError::UnknownKeyword {
                    property: self.id.to_string(),
                    keyword: value.to_string(),
                }
            } else {
                PropertyError::NoConversion {
                    property: self.id.to_string(),
                    value: value.to_string(),
                }
            }
        })?;

        if let (MakerKind::LineHeight(_), Property::Compound(compound)) =
            (&self.kind, &mut converted)
        {
            compound.set_specified(literal);
        }
        Ok(converted)
    }

    fn make_inherited(&self, list: &PropertyList) -> Result<Property, PropertyError> {
        if !self.inherited
            && list
                .parent()
                .is_some_and(|parent| parent.get_explicit(self.id.base).is_none())
        {
            warn_once(
                "properties",
                &format!(
                    "{} is not inherited and the parent does not specify it; \"inherit\" yields the initial value",
                    self.id
                ),
            );
        }
        let inherited = list.get_from_parent(self.id.base)?;
        match self.id.sub {
            Some(sub) => inherited
                .component(sub)
                .cloned()
                .ok_or_else(|| PropertyError::NoValue {
                    property: self.id.to_string(),
                }),
            None => Ok(inherited),
        }
    }

    /// Set one component of a compound from a `base.component` attribute.
    ///
    /// # Errors
    /// Returns [`PropertyError::InconsistentCompound`] if this maker has no
    /// such component, or the component maker's parse failure.
    pub fn make_component(
        &self,
        base: Option<Property>,
        sub: Subproperty,
        list: &PropertyList,
        value: &str,
    ) -> Result<Property, PropertyError> {
        match self.compound_maker() {
            Some(compound) => compound.make_component(self, base, sub, list, value),
            None => Err(self.no_component(sub)),
        }
    }

    /// Coerce a value into this property's type. `Ok(None)` means "not
    /// convertible", which callers treat as a recoverable mismatch.
    ///
    /// # Errors
    /// Compound conversion may fail while building component defaults.
    pub fn convert_property(
        &self,
        value: Property,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        match &self.kind {
            MakerKind::Compound(compound) => compound.convert(value, list),
            MakerKind::LineHeight(compound) => line_height::convert(compound, value, list),
            MakerKind::Simple => Ok(self.convert_simple(value)),
        }
    }

    fn convert_simple(&self, value: Property) -> Option<Property> {
        if matches!(&value, Property::Enum(keyword) if self.enums.contains(keyword)) {
            return Some(value);
        }
        let named = match &value {
            Property::NcName(name) => self.check_enum_values(name),
            _ => None,
        };
        if let Some(keyword) = named {
            return Some(Property::Enum(keyword));
        }

        match (self.datatype, value) {
            (Datatype::Length, value @ Property::Length(_)) => Some(value),
            (Datatype::Length, value @ (Property::Number(_) | Property::Compound(_))) => {
                value.as_numeric_length().map(Property::Length)
            }
            (Datatype::Number, value @ Property::Number(_))
            | (Datatype::Color, value @ Property::Color(_))
            | (Datatype::Shorthand, value @ Property::List(_)) => Some(value),
            (Datatype::Color, Property::NcName(name)) => {
                Color::from_named(&name).map(Property::Color)
            }
            (Datatype::String, value) => Some(Property::String(value.to_string())),
            (Datatype::Shorthand, value) => Some(Property::List(vec![value])),
            _ => None,
        }
    }

    /// Conversion used by shorthand expansion: a normal conversion, else a
    /// bare name matched against this property's enumerated keywords or
    /// keyword substitutions.
    ///
    /// # Errors
    /// Propagates failures of a substituted keyword's parse.
    pub fn convert_shorthand_property(
        &self,
        value: Property,
        list: &PropertyList,
    ) -> Result<Option<Property>, PropertyError> {
        let name = match &value {
            Property::NcName(name) => Some(name.clone()),
            _ => None,
        };
        if let Some(converted) = self.convert_property(value, list)? {
            return Ok(Some(converted));
        }
        let Some(name) = name else {
            return Ok(None);
        };
        if let Some(keyword) = self.check_enum_values(&name) {
            return Ok(Some(Property::Enum(keyword)));
        }
        let substituted = self.check_value_keywords(&name);
        if substituted == name {
            return Ok(None);
        }
        self.make(list, substituted).map(Some)
    }

    /// Apply keyword substitution (`thin` → `0.5pt`). Compounds also
    /// consult their set-by-shorthand component.
    #[must_use]
    pub fn check_value_keywords<'a>(&self, value: &'a str) -> &'a str {
        if let Some(&(_, substitute)) = self.keywords.iter().find(|(keyword, _)| *keyword == value)
        {
            return substitute;
        }
        match self.compound_maker().and_then(CompoundMaker::shorthand_maker) {
            Some(shorthand) => shorthand.check_value_keywords(value),
            None => value,
        }
    }

    /// Match `value` against this property's enumerated keywords. Compounds
    /// also consult their set-by-shorthand component.
    #[must_use]
    pub fn check_enum_values(&self, value: &str) -> Option<EnumValue> {
        let keyword = EnumValue::from_str(value).ok()?;
        if self.enums.contains(&keyword) {
            return Some(keyword);
        }
        self.compound_maker()
            .and_then(CompoundMaker::shorthand_maker)
            .and_then(|shorthand| shorthand.check_enum_values(value))
    }

    fn no_component(&self, sub: Subproperty) -> PropertyError {
        PropertyError::InconsistentCompound {
            kind: self.id.to_string(),
            component: sub.to_string(),
        }
    }
}

/// Set `component` on a compound value.
pub(crate) fn with_component(
    value: Property,
    sub: Subproperty,
    component: Property,
) -> Result<Property, PropertyError> {
    match value {
        Property::Compound(mut compound) => {
            compound.set_component(sub, component)?;
            Ok(Property::Compound(compound))
        }
        other => Err(PropertyError::InconsistentCompound {
            kind: other.to_string(),
            component: sub.to_string(),
        }),
    }
}

/// Strip one level of matching quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
