//! Builder configuration.

use crate::error::BuildResult;
use crate::param::DEFAULT_PREFIX;
use serde::Deserialize;

/// Configuration for a [`QueryBuilder`](crate::QueryBuilder).
///
/// Every field has a default, so a partial TOML table is enough:
///
/// ```ignore
/// let config = dynsql::BuilderConfig::from_toml_str(r#"
///     placeholder_prefix = ":p"
///     like_wildcards = true
/// "#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Prefix of generated placeholders (default `@param`).
    pub placeholder_prefix: String,
    /// Index of the first placeholder (default 0).
    pub first_index: usize,
    /// Put the BETWEEN upper bound into the parameter map (default true).
    ///
    /// When false, only the lower bound's placeholder is mapped, even though
    /// the rendered SQL references both.
    pub bind_between_upper: bool,
    /// Wrap LIKE bindings with `%` according to the filter kind (default false).
    pub like_wildcards: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PREFIX.to_string(),
            first_index: 0,
            bind_between_upper: true,
            like_wildcards: false,
        }
    }
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(raw: &str) -> BuildResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Set the placeholder prefix.
    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    /// Set the index of the first placeholder.
    pub fn with_first_index(mut self, index: usize) -> Self {
        self.first_index = index;
        self
    }

    /// Map only the lower BETWEEN placeholder, leaving the upper one unbound.
    pub fn lower_bound_only(mut self) -> Self {
        self.bind_between_upper = false;
        self
    }

    /// Wrap LIKE bindings with pattern wildcards.
    pub fn with_like_wildcards(mut self) -> Self {
        self.like_wildcards = true;
        self
    }
}
