//! Property resolution errors.

use thiserror::Error;

/// Why a property value could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The attribute string could not be parsed at all.
    #[error("invalid value \"{value}\" for {property}: {reason}")]
    InvalidValue {
        /// Property name.
        property: String,
        /// Offending attribute value.
        value: String,
        /// What went wrong.
        reason: String,
    },

    /// An enumerated property was given a keyword it does not define.
    #[error("unknown keyword \"{keyword}\" for {property}")]
    UnknownKeyword {
        /// Property name.
        property: String,
        /// Offending keyword.
        keyword: String,
    },

    /// The value parsed but no conversion to the property's type exists.
    #[error("no conversion defined for \"{value}\" on {property}")]
    NoConversion {
        /// Property name.
        property: String,
        /// Offending attribute value.
        value: String,
    },

    /// A compound aggregate was given a component it does not have.
    #[error("{kind} has no component \"{component}\"")]
    InconsistentCompound {
        /// Compound kind.
        kind: String,
        /// Offending component.
        component: String,
    },

    /// A computed value (indent, corresponding value) could not be derived.
    #[error("incompatible datatype while computing {property}: {reason}")]
    Computation {
        /// The property whose value could not be used.
        property: String,
        /// What went wrong.
        reason: String,
    },

    /// Neither an explicit, inherited, computed nor default value exists.
    #[error("no value for {property}")]
    NoValue {
        /// Property name.
        property: String,
    },

    /// An expression called a function the parser does not know.
    #[error("unknown function {name}()")]
    UnknownFunction {
        /// Function name.
        name: String,
    },

    /// A name that is not in the property catalog.
    #[error("unknown property \"{name}\"")]
    UnknownProperty {
        /// The unrecognised attribute name.
        name: String,
    },
}

impl PropertyError {
    /// The property the error is about, when there is one.
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { property, .. }
            | Self::UnknownKeyword { property, .. }
            | Self::NoConversion { property, .. }
            | Self::Computation { property, .. }
            | Self::NoValue { property } => Some(property),
            Self::UnknownProperty { name } => Some(name),
            Self::InconsistentCompound { .. } | Self::UnknownFunction { .. } => None,
        }
    }
}
