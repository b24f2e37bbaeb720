//! SQL parameter values.
//!
//! Every attribute value extracted from an object is coerced into a
//! [`SqlValue`] before it is bound to a statement. Statements built by this
//! crate only ever use positional placeholders, so values are never
//! interpolated into SQL text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// A database-ready parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
    /// Date value.
    Date(NaiveDate),
    /// Datetime value, always timezone-naive.
    DateTime(NaiveDateTime),
}

impl SqlValue {
    /// Returns a short name for the value's variant, used in trace output.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }
}

/// Trait for types that can be converted to SQL parameter values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for i32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for i16 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for u32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(i64::from(self))
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl ToSqlValue for NaiveDate {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Date(self)
    }
}

impl ToSqlValue for NaiveDateTime {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self)
    }
}

/// Timezone-aware datetimes are stripped to their naive UTC instant.
///
/// Comparing an aware datetime against a store that is implicitly UTC fails
/// when the stored value comes back naive, so awareness is dropped on the
/// way in. Platform-specific compromise, not a general rule.
impl<Tz: TimeZone> ToSqlValue for DateTime<Tz> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::DateTime(self.naive_utc())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!(
            "hello".to_sql_value(),
            SqlValue::Text(String::from("hello"))
        );
        assert_eq!(vec![1_u8, 2].to_sql_value(), SqlValue::Blob(vec![1, 2]));
    }

    #[test]
    fn test_option_conversions() {
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(42_i32).to_sql_value(), SqlValue::Int(42));
    }

    #[test]
    fn test_aware_datetime_is_stripped_to_naive_utc() {
        let aware = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let expected = aware.naive_utc();
        assert_eq!(aware.to_sql_value(), SqlValue::DateTime(expected));
    }

    #[test]
    fn test_naive_datetime_passes_through() {
        let naive = Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .unwrap()
            .naive_utc();
        assert_eq!(naive.to_sql_value(), SqlValue::DateTime(naive));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(SqlValue::Null.type_name(), "null");
        assert_eq!(SqlValue::Int(1).type_name(), "int");
        assert_eq!(SqlValue::Text(String::new()).type_name(), "text");
    }
}
