//! The three public bulk operations.
//!
//! Control flow per call: resolve fields once, run each object's pre-save
//! hook once, prepare one parameter tuple per object, build one batched
//! statement, execute inside one transaction. `insert_or_update_many`
//! additionally runs a reconciliation pass (existence probe, partition,
//! dedup) before delegating to the insert and update paths.

use std::collections::HashSet;

use sqlx::SqliteConnection;
use stampede_core::dialect::SqliteDialect;
use stampede_core::schema::FieldDescriptor;
use stampede_core::selector::{insertable_fields, key_fields, value_fields};
use stampede_core::statement::{build_insert, build_select_in, build_update};
use stampede_core::value::SqlValue;
use tracing::debug;

use crate::connections::Connections;
use crate::error::Result;
use crate::executor;
use crate::model::BulkModel;
use crate::record::{KeyTuple, RowRecord, build_rows};

const DIALECT: SqliteDialect = SqliteDialect::new();

/// Options for [`insert_many`].
#[derive(Debug, Clone)]
pub struct InsertOptions {
    using: Option<String>,
    skip_result: bool,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            using: None,
            skip_result: true,
        }
    }
}

impl InsertOptions {
    /// Creates the default options: default connection, no result records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the connection alias to execute against.
    #[must_use]
    pub fn using(mut self, alias: impl Into<String>) -> Self {
        self.using = Some(alias.into());
        self
    }

    /// Controls whether written rows are materialized as [`RowRecord`]s.
    /// Skipped by default to avoid the cost of building them.
    #[must_use]
    pub fn skip_result(mut self, skip: bool) -> Self {
        self.skip_result = skip;
        self
    }
}

/// Options for [`update_many`].
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    keys: Option<Vec<String>>,
    using: Option<String>,
    update_fields: Option<Vec<String>>,
    exclude_fields: Vec<String>,
}

impl UpdateOptions {
    /// Creates the default options: primary-key matching, all non-key
    /// fields written, default connection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key fields used in the WHERE clause. Defaults to the
    /// model's primary key when never called.
    #[must_use]
    pub fn keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Selects the connection alias to execute against.
    #[must_use]
    pub fn using(mut self, alias: impl Into<String>) -> Self {
        self.using = Some(alias.into());
        self
    }

    /// Restricts the written fields to the named subset.
    #[must_use]
    pub fn update_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Removes the named fields from the written set.
    #[must_use]
    pub fn exclude_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Options for [`insert_or_update_many`].
#[derive(Debug, Clone, Default)]
pub struct UpsertOptions {
    keys: Option<Vec<String>>,
    using: Option<String>,
    skip_update: bool,
    update_fields: Option<Vec<String>>,
    exclude_fields: Vec<String>,
}

impl UpsertOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key fields used for existence matching. Defaults to the
    /// model's primary key when never called.
    #[must_use]
    pub fn keys<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Selects the connection alias to execute against.
    #[must_use]
    pub fn using(mut self, alias: impl Into<String>) -> Self {
        self.using = Some(alias.into());
        self
    }

    /// Inserts only: objects whose key already exists are silently dropped
    /// instead of updated.
    #[must_use]
    pub fn skip_update(mut self, skip: bool) -> Self {
        self.skip_update = skip;
        self
    }

    /// Restricts the updated fields to the named subset.
    #[must_use]
    pub fn update_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Removes the named fields from the updated set.
    #[must_use]
    pub fn exclude_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = names.into_iter().map(Into::into).collect();
        self
    }
}

fn as_str_vec(names: Option<&Vec<String>>) -> Option<Vec<&str>> {
    names.map(|v| v.iter().map(String::as_str).collect())
}

/// Splits the model's fields into key and value sets.
///
/// Fails before any hook runs or any statement is built when the resolved
/// key set is empty.
fn split_fields<'a>(
    fields: &'a [FieldDescriptor],
    keys: Option<&[&str]>,
    include: Option<&[&str]>,
    exclude: &[&str],
) -> Result<(Vec<&'a FieldDescriptor>, Vec<&'a FieldDescriptor>)> {
    let keys = key_fields(fields, keys)?;
    let values = value_fields(fields, include, exclude, &keys);
    Ok((keys, values))
}

/// Reads one object's attribute values in field order, applying each
/// field's storage transform.
fn prepare_row<M: BulkModel>(fields: &[&FieldDescriptor], object: &M) -> Vec<SqlValue> {
    fields
        .iter()
        .map(|f| f.kind.prepare(object.field_value(f.name)))
        .collect()
}

fn columns<'a>(fields: &[&'a FieldDescriptor]) -> Vec<&'a str> {
    fields.iter().map(|f| f.column).collect()
}

/// Executes one batched INSERT for the given parameter rows.
async fn insert_rows<M: BulkModel>(
    conn: &mut SqliteConnection,
    fields: &[&FieldDescriptor],
    rows: &[Vec<SqlValue>],
) -> Result<u64> {
    let (sql, params) = build_insert(&DIALECT, M::table_name(), &columns(fields), rows);
    executor::execute(conn, &sql, params).await
}

/// Executes one UPDATE statement per parameter row; every row reuses the
/// same statement text.
async fn update_rows<M: BulkModel>(
    conn: &mut SqliteConnection,
    values: &[&FieldDescriptor],
    keys: &[&FieldDescriptor],
    rows: &[Vec<SqlValue>],
) -> Result<u64> {
    let sql = build_update(&DIALECT, M::table_name(), &columns(values), &columns(keys));
    let mut affected = 0;
    for row in rows {
        affected += executor::execute(&mut *conn, &sql, row.clone()).await?;
    }
    Ok(affected)
}

/// Bulk-inserts a batch of objects with one INSERT statement.
///
/// Every object produces a distinct row, including repeated occurrences of
/// equal objects. Auto-generated identity columns are excluded from the
/// write. The whole batch commits or rolls back together.
///
/// Returns one [`RowRecord`] per object when `skip_result(false)` is set,
/// and an empty list otherwise. An empty object list is a no-op.
///
/// # Errors
///
/// Unknown connection aliases and driver failures; driver errors roll the
/// whole batch back.
pub async fn insert_many<M: BulkModel>(
    connections: &Connections,
    objects: &mut [M],
    options: InsertOptions,
) -> Result<Vec<RowRecord>> {
    if objects.is_empty() {
        return Ok(Vec::new());
    }
    let pool = connections.get(options.using.as_deref())?;

    for object in objects.iter_mut() {
        object.pre_save();
    }

    let fields = insertable_fields(M::fields());
    let rows: Vec<Vec<SqlValue>> = objects.iter().map(|o| prepare_row(&fields, o)).collect();

    let mut tx = pool.begin().await?;
    let affected = insert_rows::<M>(&mut tx, &fields, &rows).await?;
    tx.commit().await?;
    debug!(table = M::table_name(), rows = affected, "bulk insert");

    if options.skip_result {
        Ok(Vec::new())
    } else {
        Ok(build_rows(&fields, &rows))
    }
}

/// Bulk-updates a batch of objects, matching rows on the key field set.
///
/// Keys default to the model's primary key. The written fields are all
/// non-auto, non-key fields, optionally narrowed by `update_fields` and
/// shrunk by `exclude_fields`. A key set matching several stored rows
/// updates all of them identically. An empty object list is a no-op.
///
/// # Errors
///
/// Fails with a selector error when the resolved key set is empty, before
/// anything is executed; driver errors roll the whole batch back.
pub async fn update_many<M: BulkModel>(
    connections: &Connections,
    objects: &mut [M],
    options: UpdateOptions,
) -> Result<()> {
    if objects.is_empty() {
        return Ok(());
    }
    let pool = connections.get(options.using.as_deref())?;

    let exclude: Vec<&str> = options.exclude_fields.iter().map(String::as_str).collect();
    let (keys, values) = split_fields(
        M::fields(),
        as_str_vec(options.keys.as_ref()).as_deref(),
        as_str_vec(options.update_fields.as_ref()).as_deref(),
        &exclude,
    )?;
    if values.is_empty() {
        // Nothing left to write once keys and exclusions are removed.
        return Ok(());
    }

    for object in objects.iter_mut() {
        object.pre_save();
    }

    // Parameter order per row matches the clause order: SET values first,
    // WHERE keys last.
    let param_fields: Vec<&FieldDescriptor> = values.iter().chain(keys.iter()).copied().collect();
    let rows: Vec<Vec<SqlValue>> = objects
        .iter()
        .map(|o| prepare_row(&param_fields, o))
        .collect();

    let mut tx = pool.begin().await?;
    let affected = update_rows::<M>(&mut tx, &values, &keys, &rows).await?;
    tx.commit().await?;
    debug!(table = M::table_name(), rows = affected, "bulk update");

    Ok(())
}

/// Bulk insert-or-update: probes storage for each object's key tuple,
/// updates objects whose key exists, inserts the rest.
///
/// The insert group is deduplicated by key tuple keeping the last
/// occurrence in input order; the update group is not deduplicated, so
/// duplicate keys apply their updates in input order (same last-write-wins
/// outcome). With `skip_update(true)`, objects with existing keys are
/// silently dropped. Probe, updates and inserts all run inside one
/// transaction.
///
/// Returns `(inserted, updated)` row records in the relative input order
/// of each group. An empty object list returns two empty lists.
///
/// # Errors
///
/// Fails with a selector error when the resolved key set is empty; driver
/// errors (including lack of row-value `IN` support and bound-parameter
/// limits) roll the whole call back.
pub async fn insert_or_update_many<M: BulkModel>(
    connections: &Connections,
    objects: &mut [M],
    options: UpsertOptions,
) -> Result<(Vec<RowRecord>, Vec<RowRecord>)> {
    if objects.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }
    let pool = connections.get(options.using.as_deref())?;

    let exclude: Vec<&str> = options.exclude_fields.iter().map(String::as_str).collect();
    let (keys, values) = split_fields(
        M::fields(),
        as_str_vec(options.keys.as_ref()).as_deref(),
        as_str_vec(options.update_fields.as_ref()).as_deref(),
        &exclude,
    )?;

    for object in objects.iter_mut() {
        object.pre_save();
    }

    let key_rows: Vec<Vec<SqlValue>> = objects.iter().map(|o| prepare_row(&keys, o)).collect();
    let key_tuples: Vec<KeyTuple> = key_rows.iter().cloned().map(KeyTuple::new).collect();

    let mut tx = pool.begin().await?;

    let existing = probe_existing(&mut tx, M::table_name(), &keys, &key_rows).await?;

    let update_group: Vec<usize> = if options.skip_update {
        Vec::new()
    } else {
        (0..objects.len())
            .filter(|&i| existing.contains(&key_tuples[i]))
            .collect()
    };
    let insert_candidates: Vec<usize> = (0..objects.len())
        .filter(|&i| !existing.contains(&key_tuples[i]))
        .collect();

    // Dedup the insert group by key tuple: walk backwards so the last
    // occurrence wins, then restore input order.
    let mut seen = HashSet::new();
    let mut insert_group: Vec<usize> = insert_candidates
        .iter()
        .rev()
        .filter(|&&i| seen.insert(key_tuples[i].clone()))
        .copied()
        .collect();
    insert_group.reverse();

    debug!(
        table = M::table_name(),
        existing = existing.len(),
        updates = update_group.len(),
        inserts = insert_group.len(),
        "reconciled upsert batch"
    );

    let mut updated = Vec::new();
    if !update_group.is_empty() && !values.is_empty() {
        let param_fields: Vec<&FieldDescriptor> =
            values.iter().chain(keys.iter()).copied().collect();
        let rows: Vec<Vec<SqlValue>> = update_group
            .iter()
            .map(|&i| prepare_row(&param_fields, &objects[i]))
            .collect();
        update_rows::<M>(&mut tx, &values, &keys, &rows).await?;
        updated = build_rows(&param_fields, &rows);
    }

    let mut inserted = Vec::new();
    if !insert_group.is_empty() {
        let fields = insertable_fields(M::fields());
        let rows: Vec<Vec<SqlValue>> = insert_group
            .iter()
            .map(|&i| prepare_row(&fields, &objects[i]))
            .collect();
        insert_rows::<M>(&mut tx, &fields, &rows).await?;
        inserted = build_rows(&fields, &rows);
    }

    tx.commit().await?;

    Ok((inserted, updated))
}

/// Issues the existence probe and collects the key tuples already present.
async fn probe_existing(
    conn: &mut SqliteConnection,
    table: &str,
    keys: &[&FieldDescriptor],
    key_rows: &[Vec<SqlValue>],
) -> Result<HashSet<KeyTuple>> {
    let (sql, params) = build_select_in(&DIALECT, table, &columns(keys), key_rows);
    let rows = executor::fetch_all(conn, &sql, params).await?;

    let mut existing = HashSet::with_capacity(rows.len());
    for row in &rows {
        let mut tuple = Vec::with_capacity(keys.len());
        for (index, field) in keys.iter().enumerate() {
            tuple.push(executor::decode_column(row, index, field.kind)?);
        }
        existing.insert(KeyTuple::new(tuple));
    }
    Ok(existing)
}
