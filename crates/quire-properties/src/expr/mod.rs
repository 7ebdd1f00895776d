//! Property value expressions.
//!
//! Attribute strings are tokenized by [`ExprTokenizer`] and evaluated by
//! [`PropertyParser`] into a [`Property`](crate::values::Property).

mod parser;
mod tokenizer;

pub use parser::PropertyParser;
pub use tokenizer::{ExprToken, ExprTokenizer};
