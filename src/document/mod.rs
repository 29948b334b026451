//! Structured documents.
//!
//! A [`Document`] is the named, timestamped record a data source produces
//! (or that was read back from its serialized form). Checks inspect
//! documents; they never modify them.
//!
//! # Shape
//!
//! ```json
//! {
//!   "name": "sysconf",
//!   "hostname": "node01",
//!   "timestamp": 1528057219,
//!   "data": { "nprocessors_onln": 4 }
//! }
//! ```
//!
//! Only `name` is required. Building a `Document` from anything that is not
//! an object with a string `name` is a contract violation and fails.

pub mod kind;

pub use kind::DocumentKind;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{HostcheckError, Result, RuleError};

/// A validated structured document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    value: Value,
}

impl Document {
    /// Validate `value` as a document.
    ///
    /// # Errors
    ///
    /// `InvalidDocument` if `value` is not an object, `MissingName` if it has
    /// no string `name`.
    pub fn from_value(value: Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| HostcheckError::InvalidDocument {
            found: json_type(&value).to_string(),
        })?;

        match object.get("name") {
            Some(Value::String(_)) => Ok(Self { value }),
            _ => Err(HostcheckError::MissingName),
        }
    }

    /// Parse a document from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Build a document from its parts.
    pub fn new(name: &str, data: Value) -> Self {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(name.to_string()));
        object.insert("data".to_string(), data);
        Self {
            value: Value::Object(object),
        }
    }

    /// Set the `hostname` field.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.insert("hostname", Value::String(hostname.into()));
        self
    }

    /// Set the `timestamp` field (epoch seconds).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.insert("timestamp", Value::from(timestamp.timestamp()));
        self
    }

    /// Set an arbitrary top-level field.
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    fn insert(&mut self, key: &str, value: Value) {
        if let Value::Object(object) = &mut self.value {
            object.insert(key.to_string(), value);
        }
    }

    /// The name used for dispatch.
    pub fn name(&self) -> &str {
        self.value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The shape this document declares.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_name(self.name())
    }

    /// The `data` payload, if present.
    pub fn data(&self) -> Option<&Value> {
        self.value.get("data")
    }

    /// The host the document was collected on, if recorded.
    pub fn hostname(&self) -> Option<&str> {
        self.value
            .get("hostname")
            .and_then(Value::as_str)
            .filter(|h| !h.is_empty())
    }

    /// When the measurement was taken, if recorded.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let value = self.value.get("timestamp")?;
        let seconds = value
            .as_i64()
            .or_else(|| value.as_f64().map(|f| f as i64))?;
        Utc.timestamp_opt(seconds, 0).single()
    }

    /// Look up a value by JSON pointer (e.g. `/data/hw/memsize`).
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        self.value.pointer(path)
    }

    /// Whether a JSON pointer resolves.
    pub fn contains(&self, path: &str) -> bool {
        self.pointer(path).is_some()
    }

    /// Look up a value by JSON pointer, failing if absent.
    pub fn value_at(&self, path: &str) -> std::result::Result<&Value, RuleError> {
        self.pointer(path).ok_or_else(|| RuleError::missing(path))
    }

    /// Unsigned integer at `path`.
    pub fn u64_at(&self, path: &str) -> std::result::Result<u64, RuleError> {
        as_u64(self.value_at(path)?)
            .ok_or_else(|| RuleError::wrong_type(path, "an unsigned integer"))
    }

    /// Signed integer at `path`.
    pub fn i64_at(&self, path: &str) -> std::result::Result<i64, RuleError> {
        self.value_at(path)?
            .as_i64()
            .ok_or_else(|| RuleError::wrong_type(path, "an integer"))
    }

    /// Number at `path`, as a float.
    pub fn f64_at(&self, path: &str) -> std::result::Result<f64, RuleError> {
        self.value_at(path)?
            .as_f64()
            .ok_or_else(|| RuleError::wrong_type(path, "a number"))
    }

    /// String at `path`.
    pub fn str_at(&self, path: &str) -> std::result::Result<&str, RuleError> {
        self.value_at(path)?
            .as_str()
            .ok_or_else(|| RuleError::wrong_type(path, "a string"))
    }

    /// Split a multi-host document into one document per host.
    ///
    /// The `data` field must be an array of per-host objects. Entries that
    /// carry no `name` of their own are given `entry_name`.
    pub fn per_host(&self, entry_name: &str) -> std::result::Result<Vec<Document>, RuleError> {
        let entries = self
            .data()
            .and_then(Value::as_array)
            .ok_or_else(|| RuleError::wrong_type("/data", "an array of per-host documents"))?;

        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut object = entry
                    .as_object()
                    .cloned()
                    .ok_or_else(|| RuleError::wrong_type(&format!("/data/{}", i), "an object"))?;
                if !matches!(object.get("name"), Some(Value::String(_))) {
                    object.insert("name".to_string(), Value::String(entry_name.to_string()));
                }
                Ok(Document {
                    value: Value::Object(object),
                })
            })
            .collect()
    }

    /// Borrow the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the document, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.value
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Document {
    type Error = HostcheckError;

    fn try_from(value: Value) -> Result<Self> {
        Document::from_value(value)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(value).map_err(serde::de::Error::custom)
    }
}
