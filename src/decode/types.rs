//! Decoder types and traits
//!
//! Defines the payload abstraction and the decoder trait.

use crate::error::{Error, Result};
use crate::types::{FirehoseRecord, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Transport encoding of a record's `data` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadEncoding {
    /// Base64 first, raw JSON text as fallback (default)
    #[default]
    Auto,
    /// Base64-encoded JSON
    Base64,
    /// Raw JSON text
    Plain,
}

/// Decoded field → value mapping of one record
///
/// Field order is the order in which fields appear in the record's JSON
/// text, and is the column order used by the statement builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(JsonObject);

impl Payload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a payload from JSON text; the top level must be an object
    pub fn parse(text: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a payload from a JSON value; the value must be an object
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(Error::Other(format!(
                "payload must be a JSON object, got {}",
                value_kind(&other)
            ))),
        }
    }

    /// Add a field, keeping insertion order
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    /// Iterate fields in payload order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }

    /// Field names in payload order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every value is a scalar (string, number, bool, null)
    pub fn ensure_flat(&self) -> Result<()> {
        for (name, value) in &self.0 {
            if matches!(value, JsonValue::Array(_) | JsonValue::Object(_)) {
                return Err(Error::unsupported_value(name, value_kind(value)));
            }
        }
        Ok(())
    }

    /// Consume into the underlying ordered map
    pub fn into_inner(self) -> JsonObject {
        self.0
    }
}

impl From<JsonObject> for Payload {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

/// Textual form of a scalar value; `None` for null and nested values
///
/// Strings are returned without JSON quoting, numbers and booleans as
/// their JSON text.
pub fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

/// Human-readable kind of a JSON value
pub(crate) fn value_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Trait for decoding a record's data into a payload
pub trait PayloadDecoder: Send + Sync {
    /// Decode the record's `data` attribute
    fn decode(&self, record: &FirehoseRecord) -> Result<Payload>;

    /// Encoding handled by this decoder
    fn encoding(&self) -> PayloadEncoding;
}
