//! # stampede
//!
//! Bulk insert, update and upsert helpers: persist many model instances
//! with one batched statement per call instead of one round trip per
//! object.
//!
//! This crate provides:
//! - `BulkModel` trait connecting in-memory objects to a `Table` schema
//! - `insert_many` / `update_many` / `insert_or_update_many`
//! - A named connection registry (`Connections`)
//! - `RowRecord` transcripts of the rows that were written
//!
//! ## Quick start
//!
//! ```ignore
//! use stampede::{BulkModel, Connections, InsertOptions, UpsertOptions};
//! use stampede_core::{FieldDescriptor, FieldKind, SqlValue, Table};
//!
//! struct UserTable;
//!
//! impl Table for UserTable {
//!     const NAME: &'static str = "users";
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::auto_pk("id", "id"),
//!         FieldDescriptor::new("username", "username", FieldKind::Text),
//!         FieldDescriptor::new("karma", "karma", FieldKind::Integer),
//!     ];
//! }
//!
//! struct User {
//!     id: i64,
//!     username: String,
//!     karma: i64,
//! }
//!
//! impl BulkModel for User {
//!     type Table = UserTable;
//!
//!     fn field_value(&self, field: &str) -> SqlValue {
//!         match field {
//!             "id" => SqlValue::Int(self.id),
//!             "username" => SqlValue::Text(self.username.clone()),
//!             "karma" => SqlValue::Int(self.karma),
//!             _ => SqlValue::Null,
//!         }
//!     }
//! }
//!
//! async fn example(conns: &Connections, users: &mut [User]) -> stampede::Result<()> {
//!     // One INSERT statement for the whole batch.
//!     stampede::insert_many(conns, users, InsertOptions::new()).await?;
//!
//!     // Upsert keyed on username: existing rows are updated, the rest
//!     // inserted, all inside one transaction.
//!     let (inserted, updated) = stampede::insert_or_update_many(
//!         conns,
//!         users,
//!         UpsertOptions::new().keys(["username"]),
//!     )
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Semantics
//!
//! Each call runs inside one transaction: the whole batch commits or rolls
//! back together. Empty object lists are documented no-ops. Duplicate key
//! tuples inside one upsert batch collapse to the last occurrence in input
//! order (last-write-wins). The existence probe uses the row-value
//! `(a,b) IN ((?,?),...)` form, which some engines lack, and very large
//! batches can exceed a store's bound-parameter limit; both surface as
//! driver errors.

mod connections;
mod error;
mod executor;
mod model;
mod ops;
mod record;

pub use connections::{Connections, DEFAULT_CONNECTION};
pub use error::{BulkError, Result};
pub use model::BulkModel;
pub use ops::{
    InsertOptions, UpdateOptions, UpsertOptions, insert_many, insert_or_update_many, update_many,
};
pub use record::RowRecord;

// Re-export commonly used types from stampede-core
pub use stampede_core::schema::{FieldDescriptor, FieldKind, Table};
pub use stampede_core::selector::SelectorError;
pub use stampede_core::value::{SqlValue, ToSqlValue};
