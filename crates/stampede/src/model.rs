//! Model trait connecting objects to their table schema.

use stampede_core::schema::{FieldDescriptor, Table};
use stampede_core::value::SqlValue;

/// An in-memory object that can participate in bulk operations.
///
/// Implementors supply a named getter for each declared field: the table's
/// field list drives extraction, so `field_value` is called once per field
/// in declared order when a statement is built. Names outside the declared
/// list are never passed in; returning `SqlValue::Null` for them is a safe
/// fallback.
///
/// # Example
///
/// ```ignore
/// impl BulkModel for Track {
///     type Table = TrackTable;
///
///     fn field_value(&self, field: &str) -> SqlValue {
///         match field {
///             "id" => SqlValue::Int(self.id),
///             "title" => SqlValue::Text(self.title.clone()),
///             _ => SqlValue::Null,
///         }
///     }
/// }
/// ```
pub trait BulkModel: Send + Sync {
    /// The table type describing this model's storage shape.
    type Table: Table;

    /// Returns the current value of the named field.
    fn field_value(&self, field: &str) -> SqlValue;

    /// Hook invoked exactly once per object per persisting call, before any
    /// value extraction. May mutate the object, e.g. to compute derived
    /// fields. Defaults to a no-op.
    fn pre_save(&mut self) {}

    /// Returns the table name.
    #[must_use]
    fn table_name() -> &'static str {
        Self::Table::NAME
    }

    /// Returns the ordered field descriptors.
    #[must_use]
    fn fields() -> &'static [FieldDescriptor] {
        Self::Table::FIELDS
    }
}
