//! Builder configuration.

use std::sync::Arc;

use quire_common::ValidationMode;
use quire_properties::{IndentRule, PropertyRegistry, RegistryOptions};
use serde::Serialize;

/// Largest number of characters stored in one text run.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 32767;

/// Settings for one [`FoTreeBuilder`](crate::FoTreeBuilder).
///
/// # Example
/// ```
/// use quire_builder::BuilderConfig;
/// use quire_common::ValidationMode;
///
/// let config = BuilderConfig::default()
///     .with_validation_mode(ValidationMode::Strict)
///     .with_max_chunk_len(1024);
/// assert_eq!(config.max_chunk_len(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuilderConfig {
    validation_mode: ValidationMode,
    max_chunk_len: usize,
    indent_rule: IndentRule,
}

impl BuilderConfig {
    /// Whether violations abort the document.
    #[must_use]
    pub const fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Split character data into runs of at most `len` characters. Zero is
    /// treated as one.
    #[must_use]
    pub const fn with_max_chunk_len(mut self, len: usize) -> Self {
        self.max_chunk_len = if len == 0 { 1 } else { len };
        self
    }

    /// How start/end indents account for margins.
    #[must_use]
    pub const fn with_indent_rule(mut self, rule: IndentRule) -> Self {
        self.indent_rule = rule;
        self
    }

    /// The configured validation mode.
    #[must_use]
    pub const fn validation_mode(&self) -> ValidationMode {
        self.validation_mode
    }

    /// The configured chunk length.
    #[must_use]
    pub const fn max_chunk_len(&self) -> usize {
        self.max_chunk_len
    }

    /// The configured indent rule.
    #[must_use]
    pub const fn indent_rule(&self) -> IndentRule {
        self.indent_rule
    }

    /// A maker registry honouring this configuration. The process-wide
    /// registry is reused when the options match it.
    #[must_use]
    pub fn property_registry(&self) -> Arc<PropertyRegistry> {
        let shared = PropertyRegistry::shared();
        if shared.options().indent_rule == self.indent_rule {
            shared
        } else {
            Arc::new(PropertyRegistry::with_options(RegistryOptions {
                indent_rule: self.indent_rule,
            }))
        }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            indent_rule: IndentRule::default(),
        }
    }
}
