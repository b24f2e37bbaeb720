//! Batched statement builders.
//!
//! Pure functions that compose column and placeholder lists into statement
//! text, so they can be unit-tested without a live connection. Column
//! identifiers are quoted through the [`Dialect`] collaborator; values only
//! ever travel as positional parameters.
//!
//! Callers are responsible for short-circuiting empty batches before
//! building: an empty `VALUES` or `SET` clause is malformed SQL.

use crate::dialect::Dialect;
use crate::value::SqlValue;

fn quoted_columns(dialect: &dyn Dialect, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| dialect.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(",")
}

fn placeholder_group(dialect: &dyn Dialect, width: usize) -> String {
    let placeholders = vec![dialect.parameter_placeholder(); width];
    format!("({})", placeholders.join(","))
}

/// Builds a batched `INSERT INTO <table> (<cols>) VALUES (...),(...)`.
///
/// Emits one placeholder group per row and returns the statement together
/// with the row values flattened in binding order.
#[must_use]
pub fn build_insert(
    dialect: &dyn Dialect,
    table: &str,
    columns: &[&str],
    rows: &[Vec<SqlValue>],
) -> (String, Vec<SqlValue>) {
    let group = placeholder_group(dialect, columns.len());
    let groups = vec![group.as_str(); rows.len()].join(",");
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES {groups}",
        quoted_columns(dialect, columns)
    );
    let params = rows.iter().flatten().cloned().collect();
    (sql, params)
}

/// Builds `UPDATE <table> SET c=?,... WHERE k=? AND ...`.
///
/// Returns statement text only: the same statement is executed once per
/// object, and each row's parameters are bound as (value fields..., key
/// fields...) to match the clause order.
#[must_use]
pub fn build_update(
    dialect: &dyn Dialect,
    table: &str,
    set_columns: &[&str],
    key_columns: &[&str],
) -> String {
    let placeholder = dialect.parameter_placeholder();
    let assignments = set_columns
        .iter()
        .map(|c| format!("{}={placeholder}", dialect.quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(",");
    let conditions = key_columns
        .iter()
        .map(|c| format!("{}={placeholder}", dialect.quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!("UPDATE {table} SET {assignments} WHERE {conditions}")
}

/// Builds the existence probe:
/// `SELECT <key-cols> FROM <table> WHERE (<key-cols>) IN ((...),(...))`.
///
/// One parenthesized tuple group per candidate row. The row-value `IN` form
/// is not supported by every engine (see `Dialect::supports_row_values`);
/// engines without it reject the statement at execution time.
#[must_use]
pub fn build_select_in(
    dialect: &dyn Dialect,
    table: &str,
    key_columns: &[&str],
    rows: &[Vec<SqlValue>],
) -> (String, Vec<SqlValue>) {
    let cols = quoted_columns(dialect, key_columns);
    let group = placeholder_group(dialect, key_columns.len());
    let groups = vec![group.as_str(); rows.len()].join(",");
    let sql = format!("SELECT {cols} FROM {table} WHERE ({cols}) IN ({groups})");
    let params = rows.iter().flatten().cloned().collect();
    (sql, params)
}
