//! SELECT statement builder.
//!
//! [`QueryBuilder`] collects columns, joins and filters for one base table and
//! renders them in a fixed clause order:
//!
//! ```text
//! SELECT <columns | *> FROM <base> [<KIND> JOIN ... ON ... ]* [WHERE <f1> AND <f2> ...]
//! ```
//!
//! Placeholders are managed by the builder (`@param0`, `@param1`, ...), and
//! only filter values are parameterized. Table and column names are trusted.

use crate::column::ColumnSpec;
use crate::config::BuilderConfig;
use crate::error::{BuildError, BuildResult};
use crate::filter::{ColumnType, FilterKind, FilterPredicate};
use crate::join::{JoinKind, JoinSpec};
use crate::param::ParamSequence;
use crate::value::FilterValue;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;

/// Placeholder → display-formatted value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `placeholder` to `value`. A placeholder may only be mapped once.
    pub fn insert(
        &mut self,
        placeholder: impl Into<String>,
        value: impl Into<String>,
    ) -> BuildResult<()> {
        let placeholder = placeholder.into();
        if self.contains(&placeholder) {
            return Err(BuildError::DuplicatePlaceholder(placeholder));
        }
        self.entries.push((placeholder, value.into()));
        Ok(())
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == placeholder)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, placeholder: &str) -> bool {
        self.get(placeholder).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A typed value to bind to a named placeholder when executing the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub placeholder: String,
    pub value: FilterValue,
}

/// Output of [`QueryBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    /// SQL text with named placeholders.
    pub sql: String,
    /// Placeholder → literal form of the value (for display and logging).
    pub params: Params,
    /// Placeholder → typed value, ready for a driver.
    pub bindings: Vec<Binding>,
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Structured SELECT query builder.
///
/// # Example
/// ```ignore
/// use dynsql::{ColumnType, FilterKind, JoinKind, QueryBuilder};
///
/// let mut qb = QueryBuilder::new("orders");
/// qb.column("orders", "id")
///     .column_as("customers", "name", "customer")
///     .add_join("customers", JoinKind::Left, "customer_id", "id");
/// qb.filter("orders", "total", ColumnType::Numeric, FilterKind::Greater, 100)?;
///
/// let built = qb.build()?;
/// assert_eq!(
///     built.sql,
///     "SELECT orders.id, customers.name AS customer FROM orders \
///      LEFT JOIN customers ON orders.customer_id = customers.id \
///      WHERE orders.total > @param0"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    /// Table named in the FROM clause
    base_table: String,
    /// SELECT columns (empty renders `*`)
    columns: Vec<ColumnSpec>,
    /// JOIN clauses
    joins: Vec<JoinSpec>,
    /// WHERE conditions, AND-ed together
    filters: Vec<FilterPredicate>,
    /// Placeholder source for filters created through this builder
    sequence: ParamSequence,
    config: BuilderConfig,
}

impl QueryBuilder {
    /// Create a new query builder with default configuration.
    pub fn new(base_table: impl Into<String>) -> Self {
        Self::with_config(base_table, BuilderConfig::default())
    }

    /// Create a new query builder with the given configuration.
    pub fn with_config(base_table: impl Into<String>, config: BuilderConfig) -> Self {
        Self {
            base_table: base_table.into(),
            columns: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            sequence: ParamSequence::from_config(&config),
            config,
        }
    }

    pub fn base_table(&self) -> &str {
        &self.base_table
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn joins(&self) -> &[JoinSpec] {
        &self.joins
    }

    pub fn filters(&self) -> &[FilterPredicate] {
        &self.filters
    }

    /// Whether any join has been added. Once true, every column is qualified.
    pub fn has_joins(&self) -> bool {
        !self.joins.is_empty()
    }

    /// The placeholder sequence, for creating predicates to pass to [`Self::add_filter`].
    pub fn sequence_mut(&mut self) -> &mut ParamSequence {
        &mut self.sequence
    }

    // ==================== Columns ====================

    /// Append a SELECT column.
    pub fn add_column(&mut self, spec: ColumnSpec) -> &mut Self {
        self.columns.push(spec);
        self
    }

    /// Append `table.column` to the SELECT list.
    pub fn column(&mut self, table: &str, column: &str) -> &mut Self {
        self.add_column(ColumnSpec::new(table, column))
    }

    /// Append `table.column AS alias` to the SELECT list.
    pub fn column_as(&mut self, table: &str, column: &str, alias: &str) -> &mut Self {
        self.add_column(ColumnSpec::aliased(table, column, alias))
    }

    // ==================== Joins ====================

    /// Append `<KIND> JOIN joined_table ON base.base_column = joined_table.joined_column`.
    pub fn add_join(
        &mut self,
        joined_table: &str,
        kind: JoinKind,
        base_column: &str,
        joined_column: &str,
    ) -> &mut Self {
        self.joins
            .push(JoinSpec::new(joined_table, kind, base_column, joined_column));
        self
    }

    pub fn inner_join(
        &mut self,
        joined_table: &str,
        base_column: &str,
        joined_column: &str,
    ) -> &mut Self {
        self.add_join(joined_table, JoinKind::Inner, base_column, joined_column)
    }

    pub fn left_join(
        &mut self,
        joined_table: &str,
        base_column: &str,
        joined_column: &str,
    ) -> &mut Self {
        self.add_join(joined_table, JoinKind::Left, base_column, joined_column)
    }

    // ==================== Filters ====================

    /// Append an already validated predicate.
    ///
    /// The predicate is not re-validated. Create it from [`Self::sequence_mut`]
    /// so its placeholders don't collide with the builder's own.
    pub fn add_filter(&mut self, predicate: FilterPredicate) -> &mut Self {
        self.filters.push(predicate);
        self
    }

    /// Validate and append a filter. On error the builder is unchanged.
    pub fn filter(
        &mut self,
        table: &str,
        column: &str,
        column_type: ColumnType,
        kind: FilterKind,
        value: impl Into<FilterValue>,
    ) -> BuildResult<&mut Self> {
        let predicate =
            FilterPredicate::new(&mut self.sequence, table, column, column_type, kind, value, None)?;
        Ok(self.add_filter(predicate))
    }

    /// Validate and append `table.column BETWEEN from AND to`.
    pub fn filter_between(
        &mut self,
        table: &str,
        column: &str,
        column_type: ColumnType,
        from: impl Into<FilterValue>,
        to: impl Into<FilterValue>,
    ) -> BuildResult<&mut Self> {
        let predicate =
            FilterPredicate::between(&mut self.sequence, table, column, column_type, from, to)?;
        Ok(self.add_filter(predicate))
    }

    // ==================== Rendering ====================

    fn render_join(&self, join: &JoinSpec) -> String {
        format!(
            "{} JOIN {} ON {}.{} = {}.{}",
            join.kind().as_sql(),
            join.joined_table(),
            self.base_table,
            join.base_column(),
            join.joined_table(),
            join.joined_column()
        )
    }

    /// Build the SQL text only.
    pub fn to_sql(&self) -> BuildResult<String> {
        let has_joins = self.has_joins();
        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns
                .iter()
                .map(|c| c.render(has_joins, &self.base_table))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {select} FROM {} ", self.base_table);

        for join in &self.joins {
            sql.push_str(&self.render_join(join));
            sql.push(' ');
        }

        if !self.filters.is_empty() {
            let conditions = self
                .filters
                .iter()
                .map(FilterPredicate::render_condition)
                .collect::<BuildResult<Vec<_>>>()?;
            sql.push_str("WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        Ok(sql)
    }

    /// Placeholder → literal value map for the current filters.
    ///
    /// Fails if two filters share a placeholder, which happens when predicates
    /// from different sequences are passed to [`Self::add_filter`].
    pub fn params(&self) -> BuildResult<Params> {
        let mut params = Params::new();
        for f in &self.filters {
            params.insert(f.placeholder(), f.format_value())?;

            if let (Some(ph), Some(value)) = (f.second_placeholder(), f.format_second_value()) {
                if self.config.bind_between_upper {
                    params.insert(ph, value)?;
                } else {
                    tracing::warn!(
                        target: "dynsql.sql",
                        placeholder = ph,
                        "BETWEEN upper bound left out of the parameter map"
                    );
                }
            }
        }
        Ok(params)
    }

    /// Typed values to bind, one per placeholder in the SQL text.
    pub fn bindings(&self) -> Vec<Binding> {
        let mut bindings = Vec::with_capacity(self.filters.len());
        for f in &self.filters {
            bindings.push(Binding {
                placeholder: f.placeholder().to_string(),
                value: f.bound_value(self.config.like_wildcards),
            });
            if let (Some(ph), Some(value)) = (f.second_placeholder(), f.second_value()) {
                bindings.push(Binding {
                    placeholder: ph.to_string(),
                    value: value.clone(),
                });
            }
        }
        bindings
    }

    /// Render the statement and collect its parameters.
    ///
    /// This only reads the builder; calling it again yields the same result.
    pub fn build(&self) -> BuildResult<BuiltQuery> {
        let sql = self.to_sql()?;
        let params = self.params()?;
        let bindings = self.bindings();

        tracing::debug!(
            target: "dynsql.sql",
            sql = %sql,
            params = params.len(),
            bindings = bindings.len(),
            "built query"
        );

        Ok(BuiltQuery {
            sql,
            params,
            bindings,
        })
    }
}
