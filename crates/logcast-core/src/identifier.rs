//! Deterministic identifiers from a timestamp and a content digest.
//!
//! The layout is that of a version-1 UUID: the timestamp is expressed in
//! 100 ns ticks since the Gregorian reform (1582-10-15) and split across the
//! time fields, the version nibble is `1` and the variant byte is `0x80`.
//! Where a real version-1 UUID would carry clock-sequence and node bits, the
//! last seven bytes hold the leading bytes of an MD5 digest of the payload.
//! Identical (timestamp, payload) pairs always yield identical identifiers.

use md5::{Digest, Md5};
use uuid::Uuid;

use crate::types::Record;

/// Julian day number of 1582-10-15.
const GREGORIAN_JULIAN_DAY: i64 = 2_299_160;
/// Julian day number of 1970-01-01.
const UNIX_JULIAN_DAY: i64 = 2_440_587;
/// 100 ns ticks between the two epochs.
const GREGORIAN_OFFSET_TICKS: u64 =
    ((UNIX_JULIAN_DAY - GREGORIAN_JULIAN_DAY) * 86_400 * 10_000_000) as u64;

/// Number of digest bytes embedded in the identifier.
pub const HASH_BYTES: usize = 7;

/// Build the identifier for `timestamp_nanos` and `content_hash`.
///
/// Only the first [`HASH_BYTES`] of `content_hash` are used; a shorter hash
/// leaves the remaining bytes zero.
pub fn generate(timestamp_nanos: i64, content_hash: &[u8]) -> Uuid {
    let ticks = ((timestamp_nanos / 100) as u64).wrapping_add(GREGORIAN_OFFSET_TICKS);

    let time_low = (ticks & 0xffff_ffff) as u32;
    let time_mid = ((ticks >> 32) & 0xffff) as u16;
    let time_hi = ((ticks >> 48) & 0x0fff) as u16 | 0x1000;

    let mut bytes = [0u8; 16];
    bytes[0..4].copy_from_slice(&time_low.to_be_bytes());
    bytes[4..6].copy_from_slice(&time_mid.to_be_bytes());
    bytes[6..8].copy_from_slice(&time_hi.to_be_bytes());
    bytes[8] = 0x80;
    let n = content_hash.len().min(HASH_BYTES);
    bytes[9..9 + n].copy_from_slice(&content_hash[..n]);

    Uuid::from_bytes(bytes)
}

/// 16-byte MD5 digest of `payload`.
pub fn content_hash(payload: &[u8]) -> [u8; 16] {
    let digest = Md5::digest(payload);
    let mut hash = [0u8; 16];
    hash.copy_from_slice(&digest);
    hash
}

/// Identifier for a raw payload observed at `timestamp_nanos`.
pub fn from_payload(timestamp_nanos: i64, payload: &str) -> Uuid {
    generate(timestamp_nanos, &content_hash(payload.as_bytes()))
}

/// Standalone stage that stamps a hashed identifier onto decoded records.
///
/// Uses the record's own timestamp (0 when unset) unless a fixed timestamp
/// is configured, and the record's raw payload text as hash input.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashStamp {
    pub timestamp: Option<i64>,
}

impl HashStamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always stamp with `timestamp_nanos`, ignoring the record's own.
    pub fn with_timestamp(timestamp_nanos: i64) -> Self {
        Self {
            timestamp: Some(timestamp_nanos),
        }
    }

    pub fn apply(&self, record: &mut Record) {
        let ts = self.timestamp.or(record.timestamp).unwrap_or(0);
        record.identifier = Some(from_payload(ts, &record.payload));
    }
}
