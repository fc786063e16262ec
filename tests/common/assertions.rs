//! Domain-specific assertion macros for logcast harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* field or slot of a record was wrong.

use logcast::{Field, Record};

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a `Record` has a specific generic field value.
///
/// ```rust
/// assert_has_field!(record, "port", 8080.0);
/// ```
#[macro_export]
macro_rules! assert_has_field {
    ($record:expr, $name:expr, $value:expr) => {{
        let record: &logcast::Record = &$record;
        let name: &str = $name;
        let expected = logcast::FieldValue::from($value);
        match record.field_value(name) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_has_field! failed:\n  record.fields[{:?}]\n  expected: {}\n  actual:   {}",
                name, expected, actual
            ),
            None => panic!(
                "assert_has_field! failed: field {:?} not found.\n  Available fields: {:?}",
                name,
                record.fields().iter().map(|f| &f.name).collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a `Record` is the two-field decode failure for `payload`.
///
/// ```rust
/// assert_decode_failure!(record, "not json", "unexpected token");
/// ```
#[macro_export]
macro_rules! assert_decode_failure {
    ($record:expr, $payload:expr, $needle:expr) => {{
        let record: &logcast::Record = &$record;
        let payload: &str = $payload;
        let needle: &str = $needle;
        let error = record
            .field_value(logcast::types::DECODE_ERROR_FIELD)
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| panic!("assert_decode_failure! failed: no decode_error in {:?}", record));
        assert!(
            error.contains(needle),
            "assert_decode_failure! failed: {:?} does not mention {:?}",
            error,
            needle
        );
        pretty_assertions::assert_eq!(
            record.field_value(logcast::types::PAYLOAD_FIELD),
            Some(&logcast::FieldValue::from(payload))
        );
        pretty_assertions::assert_eq!(record.fields().len(), 2, "extra fields: {:?}", record.fields());
        $crate::common::assert_no_attributes(record);
    }};
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Field names of `record`, sorted so order-insensitive comparisons are easy.
pub fn sorted_names(record: &Record) -> Vec<String> {
    let mut names: Vec<String> = record.fields().iter().map(|f| f.name.clone()).collect();
    names.sort();
    names
}

/// Fields of `record`, sorted by name.
pub fn sorted_fields(record: &Record) -> Vec<Field> {
    let mut fields = record.fields().to_vec();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}

/// Assert that no semantic attribute of `record` has been set.
pub fn assert_no_attributes(record: &Record) {
    assert_eq!(record.timestamp, None, "timestamp set on {record:?}");
    assert_eq!(record.identifier, None, "identifier set on {record:?}");
    assert_eq!(record.severity, logcast::types::DEFAULT_SEVERITY);
    assert!(record.category.is_empty());
    assert!(record.logger.is_empty());
    assert!(record.env_version.is_empty());
    assert!(record.hostname.is_empty());
    assert_eq!(record.pid, 0);
}

/// Parse two JSON texts and compare them as values.
pub fn assert_json_eq(actual: &[u8], expected: &str) {
    let actual: serde_json::Value =
        serde_json::from_slice(actual).expect("encoder output must be valid JSON");
    let expected: serde_json::Value =
        serde_json::from_str(expected).expect("expected text must be valid JSON");
    pretty_assertions::assert_eq!(actual, expected);
}
