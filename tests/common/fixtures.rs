//! Static payload corpora and fixed instants used across harnesses.

use chrono::{TimeZone, Utc};

/// Flat payloads holding only scalar values.
pub const CORPUS_SCALARS: &[&str] = &[
    r#"{"s":"a string"}"#,
    r#"{"n":42}"#,
    r#"{"n":-42}"#,
    r#"{"t":true}"#,
    r#"{"f":false}"#,
    r#"{"message":"Server started","port":8080,"ratio":0.25,"ok":true}"#,
    r#"{"level":"ERROR","msg":"Connection refused","host":"db.internal","port":5432}"#,
];

/// Payloads carrying nested objects, arrays and nulls.
pub const CORPUS_NESTED: &[&str] = &[
    r#"{"a":[]}"#,
    r#"{"a":[1, 2, 3, 4]}"#,
    r#"{"o":{}}"#,
    r#"{"o":{"a":"b", "c": "d"}}"#,
    r#"{"z":null}"#,
    r#"{"user":{"id":123,"roles":["admin","user"]},"tags":["prod","api"],"msg":"ok"}"#,
];

/// Input that is not JSON at all.
pub const MALFORMED: &str = "This isn't valid JSON";

pub const HASH_PAYLOAD_SHORT: &str = r#"{"timestamp": "2015-10-10T10:10:10Z"}"#;
pub const HASH_PAYLOAD_LONG: &str =
    r#"{"timestamp": "2015-10-10T10:10:10Z", "other": "stuff", "here": "too"}"#;
pub const HASH_UUID_SHORT: &str = "16bc6d00-6f37-11e5-804b-7f8b32bc10ae";
pub const HASH_UUID_LONG: &str = "16bc6d00-6f37-11e5-800b-7b8f4ee621ac";

/// Nanoseconds since the epoch of 2015-10-10T10:10:10Z plus `nanos`.
pub fn ts_2015(nanos: i64) -> i64 {
    Utc.with_ymd_and_hms(2015, 10, 10, 10, 10, 10)
        .unwrap()
        .timestamp_nanos_opt()
        .unwrap()
        + nanos
}
