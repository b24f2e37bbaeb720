//! Row records and key tuples.

use std::hash::{Hash, Hasher};
use std::mem;

use stampede_core::schema::FieldDescriptor;
use stampede_core::value::SqlValue;

/// A field-name → value transcript of one written row.
///
/// Records are built from the parameters that were sent to storage; they
/// are never read back from the database. Entry order matches the field
/// order of the statement that wrote the row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    entries: Vec<(&'static str, SqlValue)>,
}

impl RowRecord {
    pub(crate) fn new(entries: Vec<(&'static str, SqlValue)>) -> Self {
        Self { entries }
    }

    /// Returns the value written for the named field, if the field took
    /// part in the statement.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Iterates entries in statement field order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SqlValue)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Returns the number of fields in the record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the record is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds one record per parameter row, zipping field names with values.
pub(crate) fn build_rows(fields: &[&FieldDescriptor], rows: &[Vec<SqlValue>]) -> Vec<RowRecord> {
    rows.iter()
        .map(|row| {
            RowRecord::new(
                fields
                    .iter()
                    .map(|f| f.name)
                    .zip(row.iter().cloned())
                    .collect(),
            )
        })
        .collect()
}

/// A prepared key tuple, usable as a hash-set member.
///
/// `SqlValue` itself is only `PartialEq` because of floats; key tuples
/// compare floats bitwise so the reconciler's existing-key set is lawful.
#[derive(Debug, Clone)]
pub(crate) struct KeyTuple(Vec<SqlValue>);

impl KeyTuple {
    pub(crate) fn new(values: Vec<SqlValue>) -> Self {
        Self(values)
    }
}

fn value_eq(a: &SqlValue, b: &SqlValue) -> bool {
    match (a, b) {
        (SqlValue::Float(x), SqlValue::Float(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

impl PartialEq for KeyTuple {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| value_eq(a, b))
    }
}

impl Eq for KeyTuple {}

impl Hash for KeyTuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in &self.0 {
            mem::discriminant(value).hash(state);
            match value {
                SqlValue::Null => {}
                SqlValue::Bool(b) => b.hash(state),
                SqlValue::Int(i) => i.hash(state),
                SqlValue::Float(f) => f.to_bits().hash(state),
                SqlValue::Text(s) => s.hash(state),
                SqlValue::Blob(b) => b.hash(state),
                SqlValue::Date(d) => d.hash(state),
                SqlValue::DateTime(dt) => dt.hash(state),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use stampede_core::schema::FieldKind;

    #[test]
    fn test_record_get_and_order() {
        let fields = [
            &FieldDescriptor::new("a", "a", FieldKind::Text),
            &FieldDescriptor::new("b", "b", FieldKind::Integer),
        ];
        let rows = vec![vec![SqlValue::Text(String::from("x")), SqlValue::Int(7)]];

        let records = build_rows(&fields, &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("b"), Some(&SqlValue::Int(7)));
        assert_eq!(records[0].get("missing"), None);

        let names: Vec<&str> = records[0].iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_key_tuples_in_a_set() {
        let mut set = HashSet::new();
        set.insert(KeyTuple::new(vec![
            SqlValue::Text(String::from("x")),
            SqlValue::Int(1),
        ]));

        assert!(set.contains(&KeyTuple::new(vec![
            SqlValue::Text(String::from("x")),
            SqlValue::Int(1),
        ])));
        assert!(!set.contains(&KeyTuple::new(vec![
            SqlValue::Text(String::from("x")),
            SqlValue::Int(2),
        ])));
    }

    #[test]
    fn test_float_keys_compare_bitwise() {
        let a = KeyTuple::new(vec![SqlValue::Float(1.5)]);
        let b = KeyTuple::new(vec![SqlValue::Float(1.5)]);
        assert_eq!(a, b);

        let nan_a = KeyTuple::new(vec![SqlValue::Float(f64::NAN)]);
        let nan_b = KeyTuple::new(vec![SqlValue::Float(f64::NAN)]);
        assert_eq!(nan_a, nan_b);
    }

    #[test]
    fn test_int_and_bool_keys_are_distinct() {
        let int_key = KeyTuple::new(vec![SqlValue::Int(1)]);
        let bool_key = KeyTuple::new(vec![SqlValue::Bool(true)]);
        assert_ne!(int_key, bool_key);
    }
}
