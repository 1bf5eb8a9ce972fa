//! Join clauses.

use std::fmt;

/// Kind of SQL join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// Upper-cased keyword placed before `JOIN`.
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A join from the base table to `joined_table` on one pair of columns.
///
/// `joined_table` should differ from the base table; this is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    joined_table: String,
    kind: JoinKind,
    base_column: String,
    joined_column: String,
}

impl JoinSpec {
    pub fn new(
        joined_table: impl Into<String>,
        kind: JoinKind,
        base_column: impl Into<String>,
        joined_column: impl Into<String>,
    ) -> Self {
        Self {
            joined_table: joined_table.into(),
            kind,
            base_column: base_column.into(),
            joined_column: joined_column.into(),
        }
    }

    pub fn joined_table(&self) -> &str {
        &self.joined_table
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn base_column(&self) -> &str {
        &self.base_column
    }

    pub fn joined_column(&self) -> &str {
        &self.joined_column
    }
}
