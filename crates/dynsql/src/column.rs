//! Selected columns.

/// One column in the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    table: String,
    column: String,
    alias: Option<String>,
}

impl ColumnSpec {
    /// Select `table.column`.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            alias: None,
        }
    }

    /// Select `table.column AS alias`.
    pub fn aliased(
        table: impl Into<String>,
        column: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::new(table, column)
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Render the SELECT-list fragment.
    ///
    /// The column is qualified with its table when the query has joins or the
    /// column belongs to a table other than `base_table`; otherwise the bare
    /// column name is used. A non-empty alias is appended as ` AS alias`.
    pub fn render(&self, has_joins: bool, base_table: &str) -> String {
        let mut sql = if has_joins || self.table != base_table {
            format!("{}.{}", self.table, self.column)
        } else {
            self.column.clone()
        };

        if let Some(alias) = self.alias.as_deref().filter(|a| !a.is_empty()) {
            sql.push_str(" AS ");
            sql.push_str(alias);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_on_base_table_without_joins() {
        let col = ColumnSpec::new("users", "name");
        assert_eq!(col.render(false, "users"), "name");
    }

    #[test]
    fn qualified_when_joined() {
        let col = ColumnSpec::new("users", "name");
        assert_eq!(col.render(true, "users"), "users.name");
    }

    #[test]
    fn qualified_for_foreign_table() {
        let col = ColumnSpec::new("roles", "name");
        assert_eq!(col.render(false, "users"), "roles.name");
    }

    #[test]
    fn alias_is_appended() {
        let col = ColumnSpec::aliased("users", "name", "user_name");
        assert_eq!(col.render(false, "users"), "name AS user_name");
        assert_eq!(col.render(true, "users"), "users.name AS user_name");
    }

    #[test]
    fn empty_alias_is_ignored() {
        let col = ColumnSpec::aliased("users", "name", "");
        assert_eq!(col.render(false, "users"), "name");
    }
}
