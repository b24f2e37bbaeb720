//! Single-shot statement execution and value binding.
//!
//! Everything here operates on a borrowed connection so callers control the
//! transaction scope: each public operation opens one transaction, runs its
//! statements through these helpers, and commits or rolls back as a whole.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::Row;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Sqlite, SqliteConnection};
use stampede_core::schema::FieldKind;
use stampede_core::value::SqlValue;
use tracing::trace;

use crate::error::Result;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Binds a prepared value to the next positional placeholder.
fn bind_value(query: SqliteQuery<'_>, value: SqlValue) -> SqliteQuery<'_> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
        SqlValue::Date(d) => query.bind(d),
        SqlValue::DateTime(dt) => query.bind(dt),
    }
}

/// Executes one statement with all parameters bound, returning the number
/// of affected rows.
pub(crate) async fn execute(
    conn: &mut SqliteConnection,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<u64> {
    trace!(%sql, params = params.len(), "executing statement");
    let mut query = sqlx::query(sql);
    for value in params {
        query = bind_value(query, value);
    }
    let result = query.execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Runs one statement and returns all result rows.
pub(crate) async fn fetch_all(
    conn: &mut SqliteConnection,
    sql: &str,
    params: Vec<SqlValue>,
) -> Result<Vec<SqliteRow>> {
    trace!(%sql, params = params.len(), "fetching statement results");
    let mut query = sqlx::query(sql);
    for value in params {
        query = bind_value(query, value);
    }
    let rows = query.fetch_all(&mut *conn).await?;
    Ok(rows)
}

/// Decodes one column of a result row into the storage form of the given
/// field kind, so probe results compare equal to prepared key values.
pub(crate) fn decode_column(row: &SqliteRow, index: usize, kind: FieldKind) -> Result<SqlValue> {
    let value = match kind {
        // Booleans travel in integer storage form, see `FieldKind::prepare`.
        FieldKind::Boolean | FieldKind::Integer => row
            .try_get::<Option<i64>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Int),
        FieldKind::Float => row
            .try_get::<Option<f64>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Float),
        FieldKind::Text | FieldKind::Uuid => row
            .try_get::<Option<String>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Text),
        FieldKind::Blob => row
            .try_get::<Option<Vec<u8>>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Blob),
        FieldKind::Date => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::Date),
        FieldKind::DateTime => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map_or(SqlValue::Null, SqlValue::DateTime),
    };
    Ok(value)
}
