//! Typed filter values.

use crate::filter::ColumnType;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Date layout used when displaying values and formatting literals.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value compared against a column by a filter.
///
/// # Example
/// ```ignore
/// use dynsql::FilterValue;
///
/// let name: FilterValue = "alice".into();
/// let age: FilterValue = 30.into();
/// let start: FilterValue = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().into();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Text, compared against `String` columns.
    Text(String),
    /// Whole number, compared against `Numeric` columns.
    Integer(i64),
    /// Floating point number, compared against `Numeric` columns.
    Decimal(f64),
    /// Calendar date, compared against `Date` columns.
    Date(NaiveDate),
}

impl FilterValue {
    /// Check whether this value can be compared against a column of `column_type`.
    pub fn fits(&self, column_type: ColumnType) -> bool {
        matches!(
            (column_type, self),
            (ColumnType::String, FilterValue::Text(_))
                | (ColumnType::Date, FilterValue::Date(_))
                | (ColumnType::Numeric, FilterValue::Integer(_) | FilterValue::Decimal(_))
        )
    }

    /// Borrow the inner text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::Integer(n) => write!(f, "{n}"),
            FilterValue::Decimal(n) => write!(f, "{n}"),
            FilterValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::Text(value.clone())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FilterValue {
                fn from(value: $t) -> Self {
                    FilterValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FilterValue {
    fn from(value: f32) -> Self {
        FilterValue::Decimal(f64::from(value))
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Decimal(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        FilterValue::Date(value)
    }
}

/// Timestamps are compared by calendar day.
impl From<NaiveDateTime> for FilterValue {
    fn from(value: NaiveDateTime) -> Self {
        FilterValue::Date(value.date())
    }
}
