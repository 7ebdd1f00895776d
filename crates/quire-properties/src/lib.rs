//! XSL-FO property resolution.
//!
//! This crate turns the attribute strings of formatting objects into typed,
//! fully resolved property values:
//!
//! - [`id`]: the property catalog and packed component references
//! - [`values`]: lengths, colors, keywords and compound aggregates
//! - [`expr`]: the property value expression language
//! - [`maker`]: per-property descriptors that parse, convert, inherit and
//!   compute values
//! - [`shorthand`]: distribution of shorthand values to their properties
//! - [`list`]: the per-node property list and its lookup operations
//! - [`registry`]: the catalog of makers, shared by every document
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use quire_properties::{AreaTraits, PropertyId, PropertyList, PropertyRegistry};
//!
//! let registry = PropertyRegistry::shared();
//! let mut root = PropertyList::new(registry.clone(), None, "fo:root", AreaTraits::default());
//! let _ = root.bind_attributes(&[("font-size", "10pt")]);
//!
//! let block = PropertyList::new(registry, Some(Rc::new(root)), "fo:block", AreaTraits::default());
//! let size = block.get(PropertyId::FontSize).unwrap();
//! assert_eq!(size.to_string(), "10pt");
//! ```

pub mod error;
pub mod expr;
pub mod id;
pub mod list;
pub mod maker;
pub mod registry;
pub mod shorthand;
pub mod values;
pub mod writing_mode;

pub use error::PropertyError;
pub use id::{PropertyId, PropertyRef, Subproperty};
pub use list::{AreaTraits, BindIssue, BindIssueKind, PropertyList};
pub use maker::{IndentRule, PropertyMaker};
pub use registry::{PropertyRegistry, RegistryOptions};
pub use values::{Color, CompoundKind, CompoundValue, EnumValue, Length, PercentBase, Property};
pub use writing_mode::WritingMode;
