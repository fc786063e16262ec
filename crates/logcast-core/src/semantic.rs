//! Semantic attributes, the well-known typed slots on a [`Record`].
//!
//! The [`SemanticTable`] is built once from [`CodecSettings`] and maps a
//! configured field name to the slot it feeds. The decoder asks it which
//! fields to divert; the encoder asks it which names to emit. Both directions
//! live here so they stay exact inverses.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat};
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::config::CodecSettings;
use crate::error::SemanticError;
use crate::types::{FieldValue, Record, DEFAULT_SEVERITY};

/// Numeric timestamps below this magnitude are seconds, otherwise nanoseconds.
pub const SECONDS_THRESHOLD: f64 = 1e13;

/// Syslog priority stems, matched case-insensitively and two-way by prefix.
/// Order matters: `"e"` resolves to `err` before `emerg`.
const SEVERITIES: &[(&str, i32)] = &[
    ("alert", 1),
    ("crit", 2),
    ("err", 3),
    ("warn", 4),
    ("notice", 5),
    ("info", 6),
    ("debug", 7),
    ("emerg", 0),
];

/// RFC 3339 with relaxed zero-padding and an optional zone.
static LOOSE_RFC3339: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{1,2})-(\d{1,2})[Tt ](\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d+)?([Zz]|[+-]\d{1,2}:?\d{2})?$",
    )
    .expect("loose RFC 3339 pattern must compile")
});

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticSlot {
    Timestamp,
    Identifier,
    Severity,
    Category,
    Logger,
    EnvVersion,
    Hostname,
    Pid,
}

impl std::fmt::Display for SemanticSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticSlot::Timestamp => write!(f, "timestamp"),
            SemanticSlot::Identifier => write!(f, "identifier"),
            SemanticSlot::Severity => write!(f, "severity"),
            SemanticSlot::Category => write!(f, "category"),
            SemanticSlot::Logger => write!(f, "logger"),
            SemanticSlot::EnvVersion => write!(f, "env_version"),
            SemanticSlot::Hostname => write!(f, "hostname"),
            SemanticSlot::Pid => write!(f, "pid"),
        }
    }
}

impl SemanticSlot {
    /// Route a decoded value into this slot on `record`.
    ///
    /// Values of a type the slot does not accept are dropped silently, except
    /// for the identifier slot, which only takes a parsable string.
    ///
    /// Numeric severity and pid values are truncated toward zero and saturate
    /// at the `i32` bounds.
    pub fn decode(self, record: &mut Record, value: FieldValue) -> Result<(), SemanticError> {
        match self {
            SemanticSlot::Timestamp => {
                let nanos = match value {
                    FieldValue::String(text) => parse_timestamp(&text)?,
                    FieldValue::Double(v) => numeric_timestamp(v),
                    _ => return Ok(()),
                };
                record.timestamp = Some(nanos);
            }
            SemanticSlot::Identifier => {
                let id = match value {
                    FieldValue::String(text) => {
                        parse_identifier(&text).ok_or(SemanticError::InvalidIdentifier(text))?
                    }
                    other => return Err(SemanticError::InvalidIdentifier(other.to_string())),
                };
                record.identifier = Some(id);
            }
            SemanticSlot::Severity => match value {
                FieldValue::Double(v) => record.severity = v as i32,
                FieldValue::String(level) => {
                    record.severity = severity_from_name(&level).unwrap_or(DEFAULT_SEVERITY)
                }
                _ => {}
            },
            SemanticSlot::Pid => {
                if let FieldValue::Double(v) = value {
                    if v != 0.0 {
                        record.pid = v as i32;
                    }
                }
            }
            SemanticSlot::Category
            | SemanticSlot::Logger
            | SemanticSlot::EnvVersion
            | SemanticSlot::Hostname => {
                if let FieldValue::String(text) = value {
                    if !text.is_empty() {
                        *self.text_slot(record) = text;
                    }
                }
            }
        }
        Ok(())
    }

    /// Render this slot from `record`, or `None` when it is unset.
    ///
    /// Severity is always set; pid is set when non-zero; text slots when
    /// non-empty.
    pub fn encode(self, record: &Record) -> Option<Value> {
        match self {
            SemanticSlot::Timestamp => record
                .datetime()
                .map(|ts| Value::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))),
            SemanticSlot::Identifier => record.identifier.map(|id| Value::String(id.to_string())),
            SemanticSlot::Severity => Some(Value::from(record.severity)),
            SemanticSlot::Pid => (record.pid != 0).then(|| Value::from(record.pid)),
            SemanticSlot::Category => non_empty(&record.category),
            SemanticSlot::Logger => non_empty(&record.logger),
            SemanticSlot::EnvVersion => non_empty(&record.env_version),
            SemanticSlot::Hostname => non_empty(&record.hostname),
        }
    }

    fn text_slot(self, record: &mut Record) -> &mut String {
        match self {
            SemanticSlot::Logger => &mut record.logger,
            SemanticSlot::EnvVersion => &mut record.env_version,
            SemanticSlot::Hostname => &mut record.hostname,
            _ => &mut record.category,
        }
    }
}

fn non_empty(text: &str) -> Option<Value> {
    (!text.is_empty()).then(|| Value::String(text.to_string()))
}

// ---------------------------------------------------------------------------
// Lookup table
// ---------------------------------------------------------------------------

/// Configured field name → slot, in both directions.
#[derive(Debug, Clone, Default)]
pub struct SemanticTable {
    by_name: HashMap<String, SemanticSlot>,
    outputs: Vec<(SemanticSlot, String)>,
}

impl SemanticTable {
    pub fn from_settings(settings: &CodecSettings) -> Self {
        let mut table = Self::default();
        for (slot, name) in [
            (SemanticSlot::Timestamp, &settings.timestamp_field),
            (SemanticSlot::Identifier, &settings.id_field),
            (SemanticSlot::Severity, &settings.severity_field),
            (SemanticSlot::Category, &settings.category_field),
            (SemanticSlot::Logger, &settings.logger_field),
            (SemanticSlot::EnvVersion, &settings.env_version_field),
            (SemanticSlot::Hostname, &settings.hostname_field),
            (SemanticSlot::Pid, &settings.pid_field),
        ] {
            if name.is_empty() {
                continue;
            }
            // Two slots sharing a name: the later one wins on decode.
            table.by_name.insert(name.clone(), slot);
            table.outputs.push((slot, name.clone()));
        }
        table
    }

    /// The slot fed by field `name`, if any.
    pub fn slot(&self, name: &str) -> Option<SemanticSlot> {
        self.by_name.get(name).copied()
    }

    /// Every configured slot with its output field name.
    pub fn outputs(&self) -> impl Iterator<Item = (SemanticSlot, &str)> {
        self.outputs.iter().map(|(slot, name)| (*slot, name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Value parsing
// ---------------------------------------------------------------------------

/// Look up a severity by level name, e.g. `"W"`, `"warn"`, `"WARNING"`.
pub fn severity_from_name(name: &str) -> Option<i32> {
    let level = name.to_lowercase();
    SEVERITIES
        .iter()
        .find(|(stem, _)| level.starts_with(stem) || stem.starts_with(level.as_str()))
        .map(|(_, severity)| *severity)
}

/// Parse a canonical hyphenated identifier, optionally `urn:uuid:` prefixed.
///
/// The simple (32 hex digits) and braced forms are rejected.
pub fn parse_identifier(text: &str) -> Option<Uuid> {
    let canonical = text.strip_prefix("urn:uuid:").unwrap_or(text);
    if canonical.len() != 36 {
        return None;
    }
    Uuid::parse_str(canonical).ok()
}

/// Interpret a number as epoch seconds or nanoseconds by magnitude.
pub fn numeric_timestamp(value: f64) -> i64 {
    let nanos = if value.abs() < SECONDS_THRESHOLD {
        value * 1e9
    } else {
        value
    };
    nanos as i64
}

/// Parse an RFC 3339 timestamp into nanoseconds since the epoch.
///
/// Falls back to a relaxed form that tolerates missing zero-padding and a
/// missing zone (read as UTC).
pub fn parse_timestamp(text: &str) -> Result<i64, SemanticError> {
    let invalid = |reason: String| SemanticError::InvalidTimestamp {
        value: text.to_string(),
        reason,
    };

    let parsed = DateTime::parse_from_rfc3339(text).or_else(|err| match pad_rfc3339(text) {
        Some(padded) => DateTime::parse_from_rfc3339(&padded),
        None => Err(err),
    });
    parsed
        .map_err(|err| invalid(err.to_string()))?
        .timestamp_nanos_opt()
        .ok_or_else(|| invalid("out of range for nanosecond precision".to_string()))
}

fn pad_rfc3339(text: &str) -> Option<String> {
    let caps = LOOSE_RFC3339.captures(text.trim())?;
    let part = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let zone = match part(8) {
        "" | "z" | "Z" => "Z".to_string(),
        offset => {
            let (sign, rest) = offset.split_at(1);
            let (hours, minutes) = match rest.split_once(':') {
                Some(split) => split,
                None => rest.split_at(rest.len() - 2),
            };
            format!("{sign}{hours:0>2}:{minutes}")
        }
    };
    Some(format!(
        "{}-{:0>2}-{:0>2}T{:0>2}:{:0>2}:{:0>2}{}{}",
        part(1),
        part(2),
        part(3),
        part(4),
        part(5),
        part(6),
        part(7),
        zone
    ))
}
