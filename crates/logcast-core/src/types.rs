//! Core types for logcast-core.
//!
//! This module defines the field model shared by every layer: the typed
//! [`Field`], its [`FieldValue`], and the [`Record`] that carries generic
//! fields alongside the well-known semantic attributes.

use uuid::Uuid;

/// Representation tag carried by opaque sub-document fields.
pub const JSON_REPRESENTATION: &str = "json";

/// Severity assigned to records whose payload names none ("debug").
pub const DEFAULT_SEVERITY: i32 = 7;

/// Field name holding the diagnostic of a failed decode.
pub const DECODE_ERROR_FIELD: &str = "decode_error";

/// Field name holding the verbatim input of a failed decode.
pub const PAYLOAD_FIELD: &str = "payload";

/// Value of a single [`Field`].
///
/// Scalars are kept typed. Objects, arrays and null are kept as encoded JSON
/// so they are re-embedded rather than re-interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Double(f64),
    Bool(bool),
    /// Compact JSON text of an object, array or null.
    Json(Vec<u8>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Json(raw) => Some(raw),
            _ => None,
        }
    }

    /// Short type name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Double(_) => "double",
            FieldValue::Bool(_) => "bool",
            FieldValue::Json(_) => "json",
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s:?}"),
            FieldValue::Double(v) => write!(f, "{v}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Json(raw) => write!(f, "{}", String::from_utf8_lossy(raw)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Double(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// A named, typed value on a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Build an opaque sub-document field from already-encoded JSON.
    pub fn json(name: impl Into<String>, raw: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Json(raw.into()),
        }
    }

    /// `"json"` for opaque sub-documents, empty for typed scalars.
    pub fn representation(&self) -> &'static str {
        match self.value {
            FieldValue::Json(_) => JSON_REPRESENTATION,
            _ => "",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// The structured result of decoding one payload.
///
/// Generic fields keep insertion order. A value routed into a semantic
/// attribute never also appears as a generic field.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
    /// Nanoseconds since the Unix epoch.
    pub timestamp: Option<i64>,
    pub identifier: Option<Uuid>,
    pub severity: i32,
    pub category: String,
    pub logger: String,
    pub env_version: String,
    pub hostname: String,
    /// Process id, 0 when unset.
    pub pid: i32,
    /// Raw input text the record was decoded from.
    pub payload: String,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            timestamp: None,
            identifier: None,
            severity: DEFAULT_SEVERITY,
            category: String::new(),
            logger: String::new(),
            env_version: String::new(),
            hostname: String::new(),
            pid: 0,
            payload: String::new(),
        }
    }

    /// The record produced when a payload cannot be decoded: exactly a
    /// `decode_error` and a `payload` field, nothing else.
    pub fn decode_failure(payload: &str, error: &dyn std::fmt::Display) -> Self {
        let mut record = Self::new();
        record.fields.push(Field::new(DECODE_ERROR_FIELD, error.to_string()));
        record.fields.push(Field::new(PAYLOAD_FIELD, payload));
        record
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|f| &f.value)
    }

    /// Insert a field, replacing any existing field of the same name in place.
    pub fn set_field(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        let idx = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(idx))
    }

    pub fn take_fields(&mut self) -> Vec<Field> {
        std::mem::take(&mut self.fields)
    }

    pub fn replace_fields(&mut self, fields: Vec<Field>) {
        self.fields = fields;
    }

    /// Merge dotted field names one level deep, see [`crate::path::unflatten`].
    /// Fields are left untouched on error.
    pub fn unflatten(&mut self) -> Result<(), crate::error::EncodeError> {
        self.fields = crate::path::unflatten(self.fields.clone())?;
        Ok(())
    }

    /// Whether this record is the two-field error shape.
    pub fn is_decode_failure(&self) -> bool {
        self.field(DECODE_ERROR_FIELD).is_some()
    }

    /// Timestamp as a UTC datetime, if set.
    pub fn datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.timestamp
            .map(chrono::DateTime::<chrono::Utc>::from_timestamp_nanos)
    }
}
