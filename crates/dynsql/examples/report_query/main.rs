//! Assemble a report query and show what a driver would be handed.
//!
//! Run with: `cargo run --example report_query`

use chrono::NaiveDate;
use dynsql::{BuildResult, BuilderConfig, ColumnSpec, ColumnType, FilterKind, JoinKind, QueryBuilder};

fn main() -> BuildResult<()> {
    let config = BuilderConfig::new().with_like_wildcards();
    let mut builder = QueryBuilder::with_config("baseTable", config);

    builder
        .add_column(ColumnSpec::aliased("baseTable", "column1", "BaseColumn1"))
        .add_column(ColumnSpec::aliased("joinTable1", "column2", "JoinedColumn2"))
        .add_join("joinTable1", JoinKind::Inner, "id", "baseId");

    let jan_first = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    builder
        .filter("joinTable1", "column1", ColumnType::String, FilterKind::Contains, "test")?
        .filter("baseTable", "dateColumn", ColumnType::Date, FilterKind::Greater, jan_first)?
        .filter("baseTable", "numericColumn", ColumnType::Numeric, FilterKind::NotEqual, 100)?
        .filter_between("baseTable", "score", ColumnType::Numeric, 10, 20)?;

    // Rejected before it can reach the builder.
    if let Err(e) = builder.filter("baseTable", "name", ColumnType::String, FilterKind::Greater, "m") {
        println!("rejected: {e}");
    }

    let built = builder.build()?;
    println!("{}", built.sql);
    println!();
    println!("{:<10} {:<16} bound value", "param", "literal");
    for binding in &built.bindings {
        let literal = built.params.get(&binding.placeholder).unwrap_or("-");
        println!("{:<10} {:<16} {}", binding.placeholder, literal, binding.value);
    }

    Ok(())
}
