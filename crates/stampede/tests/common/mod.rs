//! Shared fixtures for the bulk-operation integration tests.

#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use stampede::{BulkModel, Connections, FieldDescriptor, FieldKind, SqlValue, Table};

/// Plain three-column model, the workhorse of most tests.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: i64,
    pub a: String,
    pub b: i64,
    pub c: i64,
}

impl Sample {
    pub fn new(a: &str, b: i64, c: i64) -> Self {
        Self {
            id: 0,
            a: a.to_string(),
            b,
            c,
        }
    }
}

pub struct SampleTable;

impl Table for SampleTable {
    const NAME: &'static str = "sample";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::auto_pk("id", "id"),
        FieldDescriptor::new("a", "a", FieldKind::Text),
        FieldDescriptor::new("b", "b", FieldKind::Integer),
        FieldDescriptor::new("c", "c", FieldKind::Integer),
    ];
}

impl BulkModel for Sample {
    type Table = SampleTable;

    fn field_value(&self, field: &str) -> SqlValue {
        match field {
            "id" => SqlValue::Int(self.id),
            "a" => SqlValue::Text(self.a.clone()),
            "b" => SqlValue::Int(self.b),
            "c" => SqlValue::Int(self.c),
            _ => SqlValue::Null,
        }
    }
}

/// Model with a pre-save hook that derives `value` and counts invocations.
#[derive(Debug, Clone)]
pub struct Derived {
    pub tag: String,
    pub value: i64,
    pub hook_calls: i64,
}

impl Derived {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            value: 0,
            hook_calls: 0,
        }
    }
}

pub struct DerivedTable;

impl Table for DerivedTable {
    const NAME: &'static str = "derived";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::auto_pk("id", "id"),
        FieldDescriptor::new("tag", "tag", FieldKind::Text),
        FieldDescriptor::new("value", "value", FieldKind::Integer),
    ];
}

impl BulkModel for Derived {
    type Table = DerivedTable;

    fn field_value(&self, field: &str) -> SqlValue {
        match field {
            "tag" => SqlValue::Text(self.tag.clone()),
            "value" => SqlValue::Int(self.value),
            _ => SqlValue::Null,
        }
    }

    fn pre_save(&mut self) {
        self.value = 5;
        self.hook_calls += 1;
    }
}

async fn pool() -> SqlitePool {
    // A single connection so every handle sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE sample (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            a TEXT NOT NULL,
            b INTEGER NOT NULL,
            c INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE derived (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tag TEXT NOT NULL,
            value INTEGER NOT NULL
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool
}

/// Fresh in-memory database registered under the default alias.
pub async fn connections() -> Connections {
    Connections::single(pool().await)
}

pub async fn count(connections: &Connections, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(connections.get(None).unwrap())
        .await
        .unwrap()
}

/// Fetches `(a, b, c)` rows matching the given WHERE clause, ordered by id.
pub async fn sample_rows(connections: &Connections, where_clause: &str) -> Vec<(String, i64, i64)> {
    let sql = format!("SELECT a, b, c FROM sample WHERE {where_clause} ORDER BY id");
    sqlx::query_as(&sql)
        .fetch_all(connections.get(None).unwrap())
        .await
        .unwrap()
}
