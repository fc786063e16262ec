//! Encoder, the inverse of the decoder: [`Record`] to compact JSON.
//!
//! Generic fields are written under their names, opaque sub-documents nested
//! as JSON rather than escaped as strings. Configured semantic slots are then
//! written under their output names when set; unset slots are omitted, never
//! written as `null`.

use serde_json::{Map, Number, Value};

use crate::config::CodecConfig;
use crate::error::EncodeError;
use crate::types::{Field, FieldValue, Record};

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Encode `record` as compact JSON bytes.
pub fn encode(record: &Record, config: &CodecConfig) -> Result<Vec<u8>, EncodeError> {
    let map = to_map(record, config)?;
    Ok(serde_json::to_vec(&Value::Object(map))?)
}

/// Encode `record` as a compact JSON string.
pub fn encode_to_string(record: &Record, config: &CodecConfig) -> Result<String, EncodeError> {
    let map = to_map(record, config)?;
    Ok(serde_json::to_string(&Value::Object(map))?)
}

/// Build the generic map that [`encode`] serializes.
pub fn to_map(record: &Record, config: &CodecConfig) -> Result<Map<String, Value>, EncodeError> {
    let mut map = Map::new();
    for field in record.fields() {
        map.insert(field.name.clone(), json_value(field)?);
    }

    for (slot, name) in config.semantic().outputs() {
        if let Some(value) = slot.encode(record) {
            map.insert(name.to_string(), value);
        }
    }
    Ok(map)
}

/// JSON value of a single field.
///
/// Integral doubles within the exactly-representable range are written as
/// integers, so `42.0` encodes as `42`.
pub fn json_value(field: &Field) -> Result<Value, EncodeError> {
    match &field.value {
        FieldValue::String(s) => Ok(Value::String(s.clone())),
        FieldValue::Bool(b) => Ok(Value::Bool(*b)),
        FieldValue::Double(v) => {
            if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER {
                return Ok(Value::from(*v as i64));
            }
            Number::from_f64(*v)
                .map(Value::Number)
                .ok_or_else(|| EncodeError::NonFiniteNumber {
                    name: field.name.clone(),
                })
        }
        FieldValue::Json(raw) => {
            serde_json::from_slice(raw).map_err(|source| EncodeError::InvalidSubdocument {
                name: field.name.clone(),
                source,
            })
        }
    }
}
