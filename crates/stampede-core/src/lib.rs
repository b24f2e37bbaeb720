//! # stampede-core
//!
//! Schema descriptors and batched statement building for the `stampede`
//! bulk-operation helpers.
//!
//! This crate provides:
//! - `SqlValue` / `ToSqlValue` for database-ready parameter values
//! - The `Table` trait and `FieldDescriptor` schema metadata
//! - Field selection (key fields vs. value fields) with validation
//! - Pure builders for batched `INSERT` / `UPDATE` / existence-probe
//!   `SELECT` statements with positional placeholders
//! - A `Dialect` trait for identifier quoting
//!
//! Everything here is synchronous and connection-free so statement building
//! can be unit-tested without a live database:
//!
//! ```rust
//! use stampede_core::dialect::SqliteDialect;
//! use stampede_core::statement::build_insert;
//! use stampede_core::value::SqlValue;
//!
//! let rows = vec![
//!     vec![SqlValue::Text("alice".into()), SqlValue::Int(1)],
//!     vec![SqlValue::Text("bob".into()), SqlValue::Int(2)],
//! ];
//! let (sql, params) = build_insert(&SqliteDialect::new(), "users", &["name", "rank"], &rows);
//!
//! assert_eq!(sql, r#"INSERT INTO users ("name","rank") VALUES (?,?),(?,?)"#);
//! assert_eq!(params.len(), 4);
//! ```

pub mod dialect;
pub mod schema;
pub mod selector;
pub mod statement;
pub mod value;

pub use dialect::{Dialect, GenericDialect, SqliteDialect};
pub use schema::{FieldDescriptor, FieldKind, Table};
pub use selector::{SelectorError, insertable_fields, key_fields, value_fields};
pub use statement::{build_insert, build_select_in, build_update};
pub use value::{SqlValue, ToSqlValue};
