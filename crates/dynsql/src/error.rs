//! Error types for dynsql

use crate::filter::{ColumnType, FilterKind};
use thiserror::Error;

/// Result type alias for dynsql operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors raised while constructing filters or rendering a query.
///
/// Validation variants come from [`FilterPredicate`](crate::FilterPredicate)
/// construction and mean the predicate was never created. The remaining
/// variants report internal invariant violations on the render path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// The filter kind is not valid for the column type.
    #[error("Invalid combination of column type {column_type} and filter type {kind}")]
    InvalidCombination {
        column_type: ColumnType,
        kind: FilterKind,
    },

    /// BETWEEN was requested on a column that is neither numeric nor a date.
    #[error("The 'Between' filter type requires two numeric or date values (column type {column_type})")]
    BetweenRequiresRange { column_type: ColumnType },

    /// BETWEEN was requested without an upper bound.
    #[error("The 'Between' filter type requires a second value")]
    MissingSecondValue,

    /// A filter value does not fit the declared column type.
    #[error("Value {value} does not match column type {column_type}")]
    ValueTypeMismatch {
        column_type: ColumnType,
        value: String,
    },

    /// A render path reached a state construction should have ruled out.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The comparison helper was asked for a kind outside its operator set.
    #[error("Invalid comparison filter type: {0}")]
    InvalidOperator(FilterKind),

    /// Two filters in one query claimed the same placeholder.
    #[error("Duplicate placeholder: {0}")]
    DuplicatePlaceholder(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl BuildError {
    /// Create an invalid-combination error.
    pub fn invalid_combination(column_type: ColumnType, kind: FilterKind) -> Self {
        Self::InvalidCombination { column_type, kind }
    }

    /// Create an unsupported (internal invariant) error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Check if this error was raised while validating a filter.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCombination { .. }
                | Self::BetweenRequiresRange { .. }
                | Self::MissingSecondValue
                | Self::ValueTypeMismatch { .. }
        )
    }

    /// Check if this error reports a broken internal invariant.
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Unsupported(_) | Self::InvalidOperator(_))
    }
}

impl From<toml::de::Error> for BuildError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
