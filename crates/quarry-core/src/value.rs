//! SQL values and records.
//!
//! [`Value`] is the single currency for literals rendered into generated SQL
//! and for decoded result columns coming back from the server. Rendering a
//! value into SQL text is the job of a [`Dialect`](crate::dialect::Dialect);
//! values themselves never know how they are quoted.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A value that can be rendered into SQL or decoded from a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Unsigned integer above `i64::MAX`, as returned for BIGINT UNSIGNED.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Raw bytes that are not valid UTF-8 (BIT, BINARY, BLOB).
    Bytes(Vec<u8>),
    /// Point in time with its UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Arbitrary structured value, stored as its JSON text.
    Object(serde_json::Value),
}

impl Value {
    /// Returns true for `Value::Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric payload as a float. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            Self::UInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the byte payload, if any.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the datetime payload, if any.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

/// Trait for types that can be converted to values.
pub trait ToValue {
    /// Converts the value to a `Value`.
    fn to_value(self) -> Value;
}

impl ToValue for Value {
    fn to_value(self) -> Value {
        self
    }
}

impl ToValue for bool {
    fn to_value(self) -> Value {
        Value::Bool(self)
    }
}

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::Int(self)
    }
}

impl ToValue for i32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for i8 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

/// Values that fit `i64` stay `Int`.
impl ToValue for u64 {
    fn to_value(self) -> Value {
        i64::try_from(self).map_or(Value::UInt(self), Value::Int)
    }
}

impl ToValue for u32 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u16 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for u8 {
    fn to_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl ToValue for f64 {
    fn to_value(self) -> Value {
        Value::Float(self)
    }
}

impl ToValue for f32 {
    fn to_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::Text(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::Text(String::from(self))
    }
}

impl ToValue for Vec<u8> {
    fn to_value(self) -> Value {
        Value::Bytes(self)
    }
}

impl ToValue for DateTime<FixedOffset> {
    fn to_value(self) -> Value {
        Value::DateTime(self)
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(self) -> Value {
        Value::DateTime(self.fixed_offset())
    }
}

/// Naive datetimes are taken to be UTC.
impl ToValue for NaiveDateTime {
    fn to_value(self) -> Value {
        Value::DateTime(self.and_utc().fixed_offset())
    }
}

impl ToValue for serde_json::Value {
    fn to_value(self) -> Value {
        Value::Object(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

/// An ordered mapping of column name to value.
///
/// Used for the payload of INSERT/UPDATE statements and for decoded result
/// rows. Column order is preserved; setting an existing column replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty record with room for `capacity` columns.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Sets a column, builder style.
    #[must_use]
    pub fn set<V: ToValue>(mut self, column: &str, value: V) -> Self {
        self.insert(column, value.to_value());
        self
    }

    /// Sets a column and returns the previous value, if the column existed.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        let column = column.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((column, value));
        None
    }

    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the value of the first column.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.entries.first().map(|(_, value)| value)
    }

    /// Returns true if the record has the given column.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == column)
    }

    /// Iterates over column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the record has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, value) in &self.entries {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_to_value_conversions() {
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!(42_i32.to_value(), Value::Int(42));
        assert_eq!(2.5_f64.to_value(), Value::Float(2.5));
        assert_eq!("hello".to_value(), Value::Text(String::from("hello")));
        assert_eq!(None::<i32>.to_value(), Value::Null);
        assert_eq!(Some(42_i32).to_value(), Value::Int(42));
    }

    #[test]
    fn test_naive_datetime_is_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let value = naive.to_value();
        let dt = value.as_datetime().unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.naive_local(), naive);
    }

    #[test]
    fn test_record_preserves_order_and_replaces() {
        let mut record = Record::new().set("b", 1).set("a", 2);
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["b", "a"]);

        let previous = record.insert("b", Value::Int(3));
        assert_eq!(previous, Some(Value::Int(1)));
        assert_eq!(record.get("b"), Some(&Value::Int(3)));
        assert_eq!(record.first(), Some(&Value::Int(3)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_serializes_as_map() {
        let record = Record::new()
            .set("id", 42)
            .set("name", "alice")
            .set("deleted_at", Value::Null);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":42,"name":"alice","deleted_at":null}"#);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::Int(7).as_f64(), Some(7.0));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert!(Value::Null.is_null());
        assert_eq!(Value::Text(String::from("x")).as_str(), Some("x"));
        assert_eq!(Value::Bytes(vec![0xFF]).as_bytes(), Some(&[0xFF_u8][..]));
    }

    #[test]
    fn test_u64_keeps_int_when_it_fits() {
        assert_eq!(7_u64.to_value(), Value::Int(7));
        assert_eq!(u64::MAX.to_value(), Value::UInt(u64::MAX));
        assert_eq!(
            serde_json::to_string(&Value::UInt(u64::MAX)).unwrap(),
            "18446744073709551615"
        );
    }
}
