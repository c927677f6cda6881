//! Model — typed field values, parsed records, and the error taxonomy.

use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// A coerced field value.
///
/// `Missing` is a first-class value: a record whose `size` failed integer
/// coercion still carries the field, marked missing, rather than dropping
/// the key.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Raw capture, unchanged. Empty string preserved for empty-but-present
    /// captures (identity, userid, referer).
    Text(String),
    /// Coerced integer (status, size).
    Int(i64),
    /// Coerced timestamp, original UTC offset preserved.
    Time(DateTime<FixedOffset>),
    /// Coercion failed; the field is present but has no usable value.
    Missing,
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            FieldValue::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Int(n) => serializer.serialize_i64(*n),
            FieldValue::Time(t) => serializer.serialize_str(&t.to_rfc3339()),
            FieldValue::Missing => serializer.serialize_none(),
        }
    }
}

/// One successfully matched line: field name → value, in line order.
///
/// A pure output value; records are never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl ParsedRecord {
    pub(crate) fn new(fields: Vec<(&'static str, FieldValue)>) -> Self {
        Self { fields }
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// All fields in line order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serialized as a map so downstream consumers see one object per line,
/// with `Missing` as null and timestamps as RFC 3339 strings.
impl Serialize for ParsedRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    /// The line source could not be read. The one fatal error during
    /// parsing; per-line problems never surface here.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid parser configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
