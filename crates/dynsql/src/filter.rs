//! Typed filter predicates for the WHERE clause.
//!
//! A [`FilterPredicate`] is validated once, when it is created, and is immutable
//! afterwards. Creating one claims its placeholder(s) from a [`ParamSequence`];
//! a rejected predicate claims nothing.
//!
//! # Example
//! ```ignore
//! use dynsql::{ColumnType, FilterKind, FilterPredicate, ParamSequence};
//!
//! let mut seq = ParamSequence::new();
//! let name = FilterPredicate::new(
//!     &mut seq, "users", "name", ColumnType::String, FilterKind::Equals, "alice", None,
//! )?;
//! assert_eq!(name.render_condition()?, "users.name = @param0");
//!
//! let age = FilterPredicate::between(&mut seq, "users", "age", ColumnType::Numeric, 18, 65)?;
//! assert_eq!(age.render_condition()?, "users.age BETWEEN @param1 AND @param2");
//! ```

use crate::error::{BuildError, BuildResult};
use crate::param::ParamSequence;
use crate::value::FilterValue;
use std::fmt;

/// Declared type of a filtered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    String,
    Date,
    Numeric,
}

impl ColumnType {
    /// All column types.
    pub const ALL: [ColumnType; 3] = [ColumnType::String, ColumnType::Date, ColumnType::Numeric];

    /// Filter kinds this column type may be compared with.
    pub fn valid_kinds(self) -> &'static [FilterKind] {
        use FilterKind::*;
        match self {
            ColumnType::String => &[Equals, NotEqual, Contains, StartsWith, EndsWith],
            ColumnType::Numeric | ColumnType::Date => &[
                Equals,
                NotEqual,
                Greater,
                Lesser,
                GreaterOrEqual,
                LesserOrEqual,
                Between,
            ],
        }
    }

    /// Check whether `kind` is valid for this column type.
    pub fn accepts(self, kind: FilterKind) -> bool {
        self.valid_kinds().contains(&kind)
    }

    /// Numeric and date columns are ordered and support BETWEEN.
    pub fn is_ordered(self) -> bool {
        matches!(self, ColumnType::Numeric | ColumnType::Date)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "String",
            ColumnType::Date => "Date",
            ColumnType::Numeric => "Numeric",
        };
        f.write_str(name)
    }
}

/// Comparison performed by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// `=`
    Equals,
    /// `<>`
    NotEqual,
    /// `LIKE`, value expected as `%text%`
    Contains,
    /// `LIKE`, value expected as `text%`
    StartsWith,
    /// `LIKE`, value expected as `%text`
    EndsWith,
    /// `>`
    Greater,
    /// `<`
    Lesser,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LesserOrEqual,
    /// `BETWEEN a AND b`, consumes two placeholders
    Between,
}

impl FilterKind {
    /// All filter kinds.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Equals,
        FilterKind::NotEqual,
        FilterKind::Contains,
        FilterKind::StartsWith,
        FilterKind::EndsWith,
        FilterKind::Greater,
        FilterKind::Lesser,
        FilterKind::GreaterOrEqual,
        FilterKind::LesserOrEqual,
        FilterKind::Between,
    ];

    /// Kinds rendered with `LIKE`.
    pub fn is_like(self) -> bool {
        matches!(
            self,
            FilterKind::Contains | FilterKind::StartsWith | FilterKind::EndsWith
        )
    }

    /// Wrap `text` with the `%` wildcards this kind implies.
    ///
    /// Returns `None` for kinds that are not rendered with `LIKE`.
    pub fn like_pattern(self, text: &str) -> Option<String> {
        match self {
            FilterKind::Contains => Some(format!("%{text}%")),
            FilterKind::StartsWith => Some(format!("{text}%")),
            FilterKind::EndsWith => Some(format!("%{text}")),
            _ => None,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Equals => "Equals",
            FilterKind::NotEqual => "NotEqual",
            FilterKind::Contains => "Contains",
            FilterKind::StartsWith => "StartsWith",
            FilterKind::EndsWith => "EndsWith",
            FilterKind::Greater => "Greater",
            FilterKind::Lesser => "Lesser",
            FilterKind::GreaterOrEqual => "GreaterOrEqual",
            FilterKind::LesserOrEqual => "LesserOrEqual",
            FilterKind::Between => "Between",
        };
        f.write_str(name)
    }
}

/// SQL operator for a plain comparison kind.
pub fn comparison_operator(kind: FilterKind) -> BuildResult<&'static str> {
    match kind {
        FilterKind::Equals => Ok("="),
        FilterKind::NotEqual => Ok("<>"),
        FilterKind::Greater => Ok(">"),
        FilterKind::Lesser => Ok("<"),
        FilterKind::GreaterOrEqual => Ok(">="),
        FilterKind::LesserOrEqual => Ok("<="),
        other => Err(BuildError::InvalidOperator(other)),
    }
}

/// Escape `LIKE` wildcards so they match literally: `%` → `[%]`, `_` → `[_]`.
pub fn escape_like(text: &str) -> String {
    text.replace('%', "[%]").replace('_', "[_]")
}

/// One validated, typed filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    table: String,
    column: String,
    column_type: ColumnType,
    kind: FilterKind,
    value: FilterValue,
    second_value: Option<FilterValue>,
    placeholder: String,
    second_placeholder: Option<String>,
}

impl FilterPredicate {
    /// Validate and create a predicate, claiming placeholders from `seq`.
    ///
    /// `second_value` is the BETWEEN upper bound and is required for
    /// [`FilterKind::Between`]. On error nothing is claimed from `seq`.
    pub fn new(
        seq: &mut ParamSequence,
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: ColumnType,
        kind: FilterKind,
        value: impl Into<FilterValue>,
        second_value: Option<FilterValue>,
    ) -> BuildResult<Self> {
        let value = value.into();
        validate(column_type, kind, &value, second_value.as_ref())?;

        let placeholder = seq.next_placeholder();
        let second_placeholder = match kind {
            FilterKind::Between => Some(seq.next_placeholder()),
            _ => None,
        };

        let predicate = Self {
            table: table.into(),
            column: column.into(),
            column_type,
            kind,
            value,
            second_value,
            placeholder,
            second_placeholder,
        };
        tracing::trace!(
            target: "dynsql.filter",
            table = %predicate.table,
            column = %predicate.column,
            kind = %predicate.kind,
            placeholder = %predicate.placeholder,
            second_placeholder = ?predicate.second_placeholder,
            "filter created"
        );
        Ok(predicate)
    }

    /// Create a BETWEEN predicate.
    pub fn between(
        seq: &mut ParamSequence,
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: ColumnType,
        from: impl Into<FilterValue>,
        to: impl Into<FilterValue>,
    ) -> BuildResult<Self> {
        Self::new(
            seq,
            table,
            column,
            column_type,
            FilterKind::Between,
            from,
            Some(to.into()),
        )
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    pub fn second_value(&self) -> Option<&FilterValue> {
        self.second_value.as_ref()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn second_placeholder(&self) -> Option<&str> {
        self.second_placeholder.as_deref()
    }

    /// Render the WHERE condition, e.g. `users.age > @param1`.
    pub fn render_condition(&self) -> BuildResult<String> {
        let target = format!("{}.{}", self.table, self.column);
        match self.kind {
            FilterKind::Contains | FilterKind::StartsWith | FilterKind::EndsWith => {
                Ok(format!("{target} LIKE {}", self.placeholder))
            }
            FilterKind::Between => {
                if !self.column_type.is_ordered() {
                    return Err(BuildError::unsupported(
                        "Between filter is only valid for Date and Numeric types",
                    ));
                }
                let upper = self.second_placeholder.as_deref().ok_or_else(|| {
                    BuildError::unsupported("Between filter without a second placeholder")
                })?;
                Ok(format!("{target} BETWEEN {} AND {upper}", self.placeholder))
            }
            kind => Ok(format!(
                "{target} {} {}",
                comparison_operator(kind)?,
                self.placeholder
            )),
        }
    }

    /// Literal form of the value for display and logging (not for binding).
    ///
    /// Strings and dates are single-quoted, numbers are bare. Contains values
    /// are LIKE-sanitized first.
    pub fn format_value(&self) -> String {
        self.format_literal(&self.value)
    }

    /// Literal form of the BETWEEN upper bound, if any.
    pub fn format_second_value(&self) -> Option<String> {
        self.second_value.as_ref().map(|v| self.format_literal(v))
    }

    /// The value with LIKE wildcards escaped, for Contains filters on text.
    ///
    /// Any other predicate returns the value's plain string form unchanged.
    pub fn sanitize_for_like(&self) -> String {
        match (&self.kind, &self.value) {
            (FilterKind::Contains, FilterValue::Text(text)) => escape_like(text),
            (_, value) => value.to_string(),
        }
    }

    /// The typed value to hand to a driver for this predicate's placeholder.
    ///
    /// Contains text is LIKE-sanitized. With `wildcards`, LIKE kinds are
    /// wrapped with the `%` pattern their kind implies.
    pub fn bound_value(&self, wildcards: bool) -> FilterValue {
        let Some(text) = self.value.as_text().filter(|_| self.kind.is_like()) else {
            return self.value.clone();
        };

        let text = if self.kind == FilterKind::Contains {
            escape_like(text)
        } else {
            text.to_string()
        };
        match self.kind.like_pattern(&text) {
            Some(pattern) if wildcards => FilterValue::Text(pattern),
            _ => FilterValue::Text(text),
        }
    }

    fn format_literal(&self, value: &FilterValue) -> String {
        match self.column_type {
            ColumnType::String => {
                let text = if self.kind == FilterKind::Contains {
                    match value {
                        FilterValue::Text(text) => escape_like(text),
                        other => other.to_string(),
                    }
                } else {
                    value.to_string()
                };
                format!("'{text}'")
            }
            ColumnType::Date => format!("'{value}'"),
            ColumnType::Numeric => value.to_string(),
        }
    }
}

fn validate(
    column_type: ColumnType,
    kind: FilterKind,
    value: &FilterValue,
    second_value: Option<&FilterValue>,
) -> BuildResult<()> {
    if kind == FilterKind::Between {
        if !column_type.is_ordered() {
            return Err(BuildError::BetweenRequiresRange { column_type });
        }
        if second_value.is_none() {
            return Err(BuildError::MissingSecondValue);
        }
    }

    if !column_type.accepts(kind) {
        return Err(BuildError::invalid_combination(column_type, kind));
    }

    for v in std::iter::once(value).chain(second_value) {
        if !v.fits(column_type) {
            return Err(BuildError::ValueTypeMismatch {
                column_type,
                value: format!("{v:?}"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> FilterValue {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().into()
    }

    fn sample_value(column_type: ColumnType) -> FilterValue {
        match column_type {
            ColumnType::String => "x".into(),
            ColumnType::Date => date(2023, 1, 1),
            ColumnType::Numeric => 1.into(),
        }
    }

    fn contains(value: &str) -> FilterPredicate {
        let mut seq = ParamSequence::new();
        FilterPredicate::new(
            &mut seq,
            "t",
            "c",
            ColumnType::String,
            FilterKind::Contains,
            value,
            None,
        )
        .unwrap()
    }

    #[test]
    fn compatibility_table_is_enforced() {
        for column_type in ColumnType::ALL {
            for kind in FilterKind::ALL {
                let mut seq = ParamSequence::new();
                let value = sample_value(column_type);
                let result = FilterPredicate::new(
                    &mut seq,
                    "t",
                    "c",
                    column_type,
                    kind,
                    value.clone(),
                    Some(value),
                );
                let expected = column_type.accepts(kind);
                assert_eq!(result.is_ok(), expected, "{column_type} / {kind}");
                if let Err(err) = result {
                    assert!(err.is_validation());
                }
            }
        }
    }

    #[test]
    fn between_on_string_is_rejected() {
        let mut seq = ParamSequence::new();
        let err =
            FilterPredicate::between(&mut seq, "t", "c", ColumnType::String, "a", "z").unwrap_err();
        assert_eq!(
            err,
            BuildError::BetweenRequiresRange {
                column_type: ColumnType::String
            }
        );
    }

    #[test]
    fn between_without_second_value_is_rejected() {
        for column_type in [ColumnType::Numeric, ColumnType::Date] {
            let mut seq = ParamSequence::new();
            let err = FilterPredicate::new(
                &mut seq,
                "t",
                "c",
                column_type,
                FilterKind::Between,
                sample_value(column_type),
                None,
            )
            .unwrap_err();
            assert_eq!(err, BuildError::MissingSecondValue);
        }
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let mut seq = ParamSequence::new();
        let err = FilterPredicate::new(
            &mut seq,
            "t",
            "age",
            ColumnType::Numeric,
            FilterKind::Equals,
            "thirty",
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::ValueTypeMismatch { .. }));

        let err = FilterPredicate::between(&mut seq, "t", "d", ColumnType::Date, date(2023, 1, 1), 5)
            .unwrap_err();
        assert!(matches!(err, BuildError::ValueTypeMismatch { .. }));
    }

    #[test]
    fn rejected_filter_claims_no_placeholder() {
        let mut seq = ParamSequence::new();
        let _ = FilterPredicate::new(
            &mut seq,
            "t",
            "c",
            ColumnType::String,
            FilterKind::Greater,
            "x",
            None,
        );
        assert_eq!(seq.claimed(), 0);
        assert_eq!(seq.peek(), "@param0");
    }

    #[test]
    fn placeholders_are_sequential_and_between_takes_two() {
        let mut seq = ParamSequence::new();
        let a = FilterPredicate::new(
            &mut seq,
            "t",
            "a",
            ColumnType::Numeric,
            FilterKind::Equals,
            1,
            None,
        )
        .unwrap();
        let b = FilterPredicate::between(&mut seq, "t", "b", ColumnType::Numeric, 10, 20).unwrap();
        let c = FilterPredicate::new(
            &mut seq,
            "t",
            "c",
            ColumnType::String,
            FilterKind::NotEqual,
            "x",
            None,
        )
        .unwrap();

        assert_eq!(a.placeholder(), "@param0");
        assert_eq!(a.second_placeholder(), None);
        assert_eq!(b.placeholder(), "@param1");
        assert_eq!(b.second_placeholder(), Some("@param2"));
        assert_eq!(c.placeholder(), "@param3");
    }

    #[test]
    fn render_conditions() {
        let cases = [
            (FilterKind::Equals, "t.c = @param0"),
            (FilterKind::NotEqual, "t.c <> @param0"),
            (FilterKind::Greater, "t.c > @param0"),
            (FilterKind::Lesser, "t.c < @param0"),
            (FilterKind::GreaterOrEqual, "t.c >= @param0"),
            (FilterKind::LesserOrEqual, "t.c <= @param0"),
        ];
        for (kind, expected) in cases {
            let mut seq = ParamSequence::new();
            let f = FilterPredicate::new(&mut seq, "t", "c", ColumnType::Numeric, kind, 5, None)
                .unwrap();
            assert_eq!(f.render_condition().unwrap(), expected);
        }

        for kind in [FilterKind::Contains, FilterKind::StartsWith, FilterKind::EndsWith] {
            let mut seq = ParamSequence::new();
            let f = FilterPredicate::new(&mut seq, "t", "c", ColumnType::String, kind, "v", None)
                .unwrap();
            assert_eq!(f.render_condition().unwrap(), "t.c LIKE @param0");
        }
    }

    #[test]
    fn render_between() {
        let mut seq = ParamSequence::new();
        let f = FilterPredicate::between(
            &mut seq,
            "baseTable",
            "TestColumn",
            ColumnType::Numeric,
            10,
            20,
        )
        .unwrap();
        assert_eq!(
            f.render_condition().unwrap(),
            "baseTable.TestColumn BETWEEN @param0 AND @param1"
        );
    }

    #[test]
    fn comparison_operator_rejects_non_comparisons() {
        assert_eq!(comparison_operator(FilterKind::NotEqual), Ok("<>"));
        for kind in [FilterKind::Contains, FilterKind::Between] {
            assert_eq!(
                comparison_operator(kind),
                Err(BuildError::InvalidOperator(kind))
            );
        }
    }

    #[test]
    fn format_values() {
        let mut seq = ParamSequence::new();
        let name = FilterPredicate::new(
            &mut seq,
            "t",
            "name",
            ColumnType::String,
            FilterKind::Equals,
            "50%_off",
            None,
        )
        .unwrap();
        assert_eq!(name.format_value(), "'50%_off'");

        let age = FilterPredicate::new(
            &mut seq,
            "t",
            "age",
            ColumnType::Numeric,
            FilterKind::Greater,
            30,
            None,
        )
        .unwrap();
        assert_eq!(age.format_value(), "30");

        let start = FilterPredicate::between(
            &mut seq,
            "t",
            "start",
            ColumnType::Date,
            date(2023, 1, 1),
            date(2023, 12, 31),
        )
        .unwrap();
        assert_eq!(start.format_value(), "'2023-01-01'");
        assert_eq!(start.format_second_value().as_deref(), Some("'2023-12-31'"));
    }

    #[test]
    fn format_value_keeps_quotes_raw() {
        let mut seq = ParamSequence::new();
        let f = FilterPredicate::new(
            &mut seq,
            "t",
            "name",
            ColumnType::String,
            FilterKind::Equals,
            "O'Brien",
            None,
        )
        .unwrap();
        assert_eq!(f.format_value(), "'O'Brien'");
    }

    #[test]
    fn contains_is_sanitized() {
        let f = contains("100%_sure");
        assert_eq!(f.sanitize_for_like(), "100[%][_]sure");
        assert_eq!(f.format_value(), "'100[%][_]sure'");

        let plain = contains("plain");
        assert_eq!(plain.sanitize_for_like(), "plain");
    }

    #[test]
    fn sanitize_ignores_other_kinds() {
        let mut seq = ParamSequence::new();
        let f = FilterPredicate::new(
            &mut seq,
            "t",
            "c",
            ColumnType::String,
            FilterKind::StartsWith,
            "a_b%",
            None,
        )
        .unwrap();
        assert_eq!(f.sanitize_for_like(), "a_b%");

        let n = FilterPredicate::new(
            &mut seq,
            "t",
            "n",
            ColumnType::Numeric,
            FilterKind::Equals,
            42,
            None,
        )
        .unwrap();
        assert_eq!(n.sanitize_for_like(), "42");
    }

    #[test]
    fn bound_values() {
        let f = contains("a_b");
        assert_eq!(f.bound_value(false), FilterValue::from("a[_]b"));
        assert_eq!(f.bound_value(true), FilterValue::from("%a[_]b%"));

        let mut seq = ParamSequence::new();
        let starts = FilterPredicate::new(
            &mut seq,
            "t",
            "c",
            ColumnType::String,
            FilterKind::StartsWith,
            "ab",
            None,
        )
        .unwrap();
        assert_eq!(starts.bound_value(true), FilterValue::from("ab%"));

        let eq = FilterPredicate::new(
            &mut seq,
            "t",
            "c",
            ColumnType::String,
            FilterKind::Equals,
            "a%",
            None,
        )
        .unwrap();
        assert_eq!(eq.bound_value(true), FilterValue::from("a%"));
    }
}
