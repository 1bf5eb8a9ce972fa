//! Placeholder numbering.

use crate::config::BuilderConfig;

/// Default placeholder prefix (`@param0`, `@param1`, ...).
pub const DEFAULT_PREFIX: &str = "@param";

/// Hands out named placeholders in a strictly increasing sequence.
///
/// Each [`QueryBuilder`](crate::QueryBuilder) owns one, so numbering starts
/// over for every query and independent builders never interfere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSequence {
    prefix: String,
    start: usize,
    next: usize,
}

impl ParamSequence {
    /// Create a sequence producing `@param0`, `@param1`, ...
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX, 0)
    }

    /// Create a sequence with a custom prefix and first index.
    pub fn with_prefix(prefix: impl Into<String>, start: usize) -> Self {
        Self {
            prefix: prefix.into(),
            start,
            next: start,
        }
    }

    /// Create a sequence from builder configuration.
    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::with_prefix(config.placeholder_prefix.clone(), config.first_index)
    }

    /// Claim the next placeholder.
    pub fn next_placeholder(&mut self) -> String {
        let placeholder = self.format(self.next);
        self.next += 1;
        placeholder
    }

    /// The placeholder the next claim will return, without claiming it.
    pub fn peek(&self) -> String {
        self.format(self.next)
    }

    /// Number of placeholders claimed since creation or the last reset.
    pub fn claimed(&self) -> usize {
        self.next - self.start
    }

    /// Rewind to the first index.
    pub fn reset(&mut self) {
        self.next = self.start;
    }

    fn format(&self, index: usize) -> String {
        format!("{}{}", self.prefix, index)
    }
}

impl Default for ParamSequence {
    fn default() -> Self {
        Self::new()
    }
}
