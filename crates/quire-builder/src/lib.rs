//! Event-driven construction of the XSL-FO formatting-object tree.
//!
//! A namespace-aware XML reader drives a [`FoTreeBuilder`] through the
//! [`ContentHandler`] interface. The builder:
//!
//! - creates nodes through the [`ElementRegistry`] factory table
//! - checks each child against its parent's content model
//! - binds attributes into property lists chained to the parent's list
//! - turns character data into bounded text runs and applies whitespace
//!   handling and `text-transform`
//! - captures SVG and `MathML` sub-trees verbatim
//! - reports problems as [`ValidationEvent`](quire_common::ValidationEvent)s
//!
//! Downstream consumers follow along through [`FoEventHandler`] and receive
//! the finished [`FoDocument`].
//!
//! # Example
//!
//! ```
//! use quire_builder::{Attribute, BuilderConfig, ContentHandler, FoTreeBuilder, RecordingHandler};
//! use quire_fotree::FO_NAMESPACE;
//!
//! let mut builder = FoTreeBuilder::from_config(BuilderConfig::default(), RecordingHandler::new());
//! builder.start_document().unwrap();
//! builder.start_element(FO_NAMESPACE, "root", &[]).unwrap();
//! builder.start_element(FO_NAMESPACE, "block", &[Attribute::new("id", "b1")]).unwrap();
//! builder.characters("Hello").unwrap();
//! builder.end_element(FO_NAMESPACE, "block").unwrap();
//! builder.end_element(FO_NAMESPACE, "root").unwrap();
//! let document = builder.end_document().unwrap();
//!
//! let block = document.ids.get("b1").unwrap();
//! assert_eq!(document.tree.text_content(block), "Hello");
//! ```

pub mod builder;
pub mod cancel;
pub mod config;
pub mod content_model;
pub mod elements;
pub mod error;
pub mod fragment;
pub mod handler;
pub mod output;
pub mod text;
pub mod whitespace;

pub use builder::{BuilderState, FoTreeBuilder};
pub use cancel::CancellationToken;
pub use config::{BuilderConfig, DEFAULT_MAX_CHUNK_LEN};
pub use elements::{ElementFactory, ElementRegistry, MATHML_NAMESPACE, SVG_NAMESPACE};
pub use error::BuildError;
pub use fragment::FragmentBuilder;
pub use handler::{Attribute, ContentHandler};
pub use output::{
    FoDocument, FoEventHandler, FontRegistry, FontTriplet, IdRegistry, Notification,
    NullHandler, RecordingHandler,
};
