use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque record payload exchanged with the backend.
///
/// Only the `id` key is ever interpreted; everything else passes through.
pub type Record = Map<String, Value>;

/// Free-form filter object, serialized as-is into the `filter` query parameter.
pub type Filter = Map<String, Value>;

/// Record identifier as it appears in JSON: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    /// Reads an identifier out of a JSON value, if it holds one.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Int),
            Value::String(text) => Some(Self::Str(text.clone())),
            _ => None,
        }
    }

    /// Reads the `id` key of a record.
    pub fn of_record(record: &Record) -> Option<Self> {
        record.get("id").and_then(Self::from_value)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(id) => Value::from(*id),
            Self::Str(id) => Value::from(id.as_str()),
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}
