//! Decoder: turns a JSON payload into a [`Record`].
//!
//! Steps, in order: parse, apply path rules, optionally flatten, classify each
//! top-level value into a [`Field`], divert configured names into semantic
//! slots, and optionally stamp a hashed identifier.
//!
//! Decoding never fails from the caller's point of view. Malformed input, a
//! value that breaks a semantic slot's contract, or a path conflict yields the
//! two-field error record instead. The first semantic failure ends the pass:
//! fields after it in payload order are not visited.

use serde_json::Value;

use crate::config::CodecConfig;
use crate::error::DecodeError;
use crate::identifier;
use crate::path;
use crate::types::{Field, FieldValue, Record};

/// Decode `payload` under `config`.
pub fn decode(payload: &str, config: &CodecConfig) -> Record {
    match try_decode(payload, config) {
        Ok(record) => record,
        Err(err) => {
            tracing::debug!(error = %err, "payload fell back to error record");
            Record::decode_failure(payload, &err)
        }
    }
}

/// Decode `payload`, surfacing the reason a payload could not be decoded.
pub fn try_decode(payload: &str, config: &CodecConfig) -> Result<Record, DecodeError> {
    let Value::Object(mut root) = serde_json::from_str::<Value>(payload)? else {
        return Err(DecodeError::NotAnObject);
    };

    path::apply_rules(&mut root, config.rules())?;
    if config.flatten() {
        root = path::flatten(root, config.flatten_prefix());
    }

    let mut record = Record::new();
    record.payload = payload.to_string();

    let to_strings = config.flatten_to_strings();
    for (name, value) in root {
        let field = classify(name, value, to_strings)?;
        match config.semantic().slot(&field.name) {
            Some(slot) => {
                tracing::trace!(field = %field.name, %slot, "routing field to semantic slot");
                slot.decode(&mut record, field.value)?;
            }
            None => record.set_field(field),
        }
    }

    if config.hash_identifier() {
        let ts = record.timestamp.unwrap_or(0);
        record.identifier = Some(identifier::from_payload(ts, payload));
    }
    Ok(record)
}

/// Turn one decoded JSON value into a typed field.
///
/// Strings, numbers and bools become scalars; objects, arrays and null are
/// kept as compact JSON. With `to_strings`, every value becomes a string.
pub fn classify(name: String, value: Value, to_strings: bool) -> Result<Field, DecodeError> {
    if to_strings {
        let text = stringify(&value).map_err(|source| DecodeError::Reencode {
            name: name.clone(),
            source,
        })?;
        return Ok(Field::new(name, text));
    }

    let value = match value {
        Value::String(s) => FieldValue::String(s),
        Value::Number(n) => FieldValue::Double(n.as_f64().unwrap_or(f64::NAN)),
        Value::Bool(b) => FieldValue::Bool(b),
        nested @ (Value::Null | Value::Object(_) | Value::Array(_)) => {
            match serde_json::to_vec(&nested) {
                Ok(raw) => FieldValue::Json(raw),
                Err(source) => return Err(DecodeError::Reencode { name, source }),
            }
        }
    };
    Ok(Field { name, value })
}

fn stringify(value: &Value) -> Result<String, serde_json::Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| stringify(item).map(Value::String))
                .collect::<Result<Vec<_>, _>>()?;
            serde_json::to_string(&items)
        }
        other => serde_json::to_string(other),
    }
}
