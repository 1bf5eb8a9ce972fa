//! # dynsql
//!
//! Build parameterized `SELECT` statements from column selections, joins and
//! typed filters.
//!
//! ## Features
//!
//! - **Typed filters**: every filter declares a column type, and incompatible
//!   comparisons (e.g. `Greater` on a string) are rejected when the filter is created
//! - **Parameterized values**: filter values never appear in the SQL text, only
//!   named placeholders (`@param0`, `@param1`, ...)
//! - **Join-aware columns**: columns are table-qualified as soon as a join is present
//! - **Driver-agnostic**: the built query carries the SQL, a display map of
//!   formatted values and the typed bindings; executing it is up to the caller
//!
//! ```ignore
//! use dynsql::{ColumnType, FilterKind, QueryBuilder};
//!
//! let mut qb = QueryBuilder::new("employees");
//! qb.column("employees", "name");
//! qb.filter("employees", "age", ColumnType::Numeric, FilterKind::Greater, 30)?;
//! qb.filter_between("employees", "salary", ColumnType::Numeric, 1000, 5000)?;
//!
//! let built = qb.build()?;
//! assert_eq!(
//!     built.sql,
//!     "SELECT name FROM employees WHERE employees.age > @param0 \
//!      AND employees.salary BETWEEN @param1 AND @param2"
//! );
//! ```

pub mod builder;
pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod join;
pub mod param;
pub mod value;

pub use builder::{Binding, BuiltQuery, Params, QueryBuilder};
pub use column::ColumnSpec;
pub use config::BuilderConfig;
pub use error::{BuildError, BuildResult};
pub use filter::{ColumnType, FilterKind, FilterPredicate, comparison_operator, escape_like};
pub use join::{JoinKind, JoinSpec};
pub use param::ParamSequence;
pub use value::FilterValue;
