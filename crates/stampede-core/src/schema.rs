//! Schema traits and field metadata.
//!
//! A [`Table`] describes the storage shape of a model: its physical table
//! name and an ordered list of [`FieldDescriptor`]s. The field order drives
//! every downstream concern, from parameter extraction order to the column
//! order in generated statements.

use crate::value::SqlValue;

/// The coercion class of a field.
///
/// Temporal and UUID kinds are passed through to the driver unchanged so it
/// can apply its own encoding; every other kind may be normalized into its
/// storage form before binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Boolean column, stored as an integer 0/1.
    Boolean,
    /// Integer column.
    Integer,
    /// Floating point column.
    Float,
    /// Text column.
    Text,
    /// Binary column.
    Blob,
    /// Date column.
    Date,
    /// Datetime column.
    DateTime,
    /// UUID column, carried as text.
    Uuid,
}

impl FieldKind {
    /// Returns whether the driver should receive the value untouched.
    #[must_use]
    pub const fn is_passthrough(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Uuid)
    }

    /// Transforms a value into its storage form for this kind.
    ///
    /// Passthrough kinds return the value unchanged (timezone awareness has
    /// already been dropped at the `ToSqlValue` boundary). Boolean values
    /// are normalized to their integer storage form so that values read back
    /// from the store compare equal to values prepared from objects.
    #[must_use]
    pub fn prepare(self, value: SqlValue) -> SqlValue {
        if self.is_passthrough() {
            return value;
        }
        match (self, value) {
            (Self::Boolean, SqlValue::Bool(b)) => SqlValue::Int(i64::from(b)),
            (_, value) => value,
        }
    }
}

/// Metadata for a single model field.
///
/// Descriptors are declared as `const` data by `Table` implementors, so all
/// members are plain `'static` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field name on the model.
    pub name: &'static str,
    /// The storage column name.
    pub column: &'static str,
    /// The coercion class.
    pub kind: FieldKind,
    /// Whether the column is an auto-generated identity, excluded from
    /// every write.
    pub auto: bool,
    /// Whether the field is the model's primary key.
    pub primary_key: bool,
}

impl FieldDescriptor {
    /// Creates a plain, non-auto, non-key descriptor.
    #[must_use]
    pub const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            column,
            kind,
            auto: false,
            primary_key: false,
        }
    }

    /// Creates an auto-generated identity primary key descriptor.
    #[must_use]
    pub const fn auto_pk(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Integer,
            auto: true,
            primary_key: true,
        }
    }
}

/// Trait for table metadata.
///
/// Implementors describe the storage shape of one model type. The field
/// list is ordered and that order is preserved by every selector and
/// statement builder.
pub trait Table {
    /// The SQL table name.
    const NAME: &'static str;

    /// Ordered list of all field descriptors.
    const FIELDS: &'static [FieldDescriptor];

    /// Returns the primary key descriptor, if the table declares one.
    #[must_use]
    fn primary_key() -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.primary_key)
    }
}
