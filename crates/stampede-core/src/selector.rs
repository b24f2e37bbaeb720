//! Field selection.
//!
//! Splits a table's declared fields into the key set (used in WHERE
//! clauses to match existing rows) and the value set (written by
//! INSERT/UPDATE). Declared field order is preserved throughout.

use std::error::Error;
use std::fmt;

use crate::schema::FieldDescriptor;

/// Error raised when field selection produces an unusable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The resolved key field set is empty: either the table declares no
    /// primary key, or the caller's name filter matched no field.
    EmptyKeys,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKeys => write!(f, "resolved key field set is empty"),
        }
    }
}

impl Error for SelectorError {}

/// Resolves the key field set.
///
/// With `names` unset, the table's primary key is the sole key field.
/// Otherwise the key set is the table fields whose name appears in `names`,
/// in declared order. An empty result is a configuration error, raised
/// before any statement is built.
pub fn key_fields<'a>(
    fields: &'a [FieldDescriptor],
    names: Option<&[&str]>,
) -> Result<Vec<&'a FieldDescriptor>, SelectorError> {
    let keys: Vec<&FieldDescriptor> = match names {
        None => fields.iter().filter(|f| f.primary_key).take(1).collect(),
        Some(names) => fields
            .iter()
            .filter(|f| names.contains(&f.name))
            .collect(),
    };
    if keys.is_empty() {
        return Err(SelectorError::EmptyKeys);
    }
    Ok(keys)
}

/// Returns the fields written by the insert path: every field except
/// auto-generated identity columns.
#[must_use]
pub fn insertable_fields(fields: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    fields.iter().filter(|f| !f.auto).collect()
}

/// Resolves the value field set for the update path.
///
/// Starts from all non-auto fields. A non-empty `include` list replaces
/// that universe with the named fields; `exclude` and the key set are then
/// subtracted from whatever universe results.
#[must_use]
pub fn value_fields<'a>(
    fields: &'a [FieldDescriptor],
    include: Option<&[&str]>,
    exclude: &[&str],
    keys: &[&FieldDescriptor],
) -> Vec<&'a FieldDescriptor> {
    let include = include.filter(|names| !names.is_empty());
    insertable_fields(fields)
        .into_iter()
        .filter(|f| include.is_none_or(|names| names.contains(&f.name)))
        .filter(|f| !exclude.contains(&f.name))
        .filter(|f| !keys.iter().any(|k| k.name == f.name))
        .collect()
}
