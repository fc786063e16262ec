//! Error types for the decode and encode layers.
//!
//! None of these escape [`crate::decoder::decode`]: every [`DecodeError`] is
//! folded into the two-field error record, and its `Display` text becomes the
//! `decode_error` value.

use thiserror::Error;

/// A dotted-path mutation could not be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path conflict at {path:?}: segment {segment:?} holds a non-object value")]
    Conflict { path: String, segment: String },
}

/// A value routed to a semantic attribute broke that attribute's contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("not a valid identifier: {0}")]
    InvalidIdentifier(String),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unexpected token in payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("could not re-encode field {name:?}: {source}")]
    Reencode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("field {name:?} does not hold valid JSON: {source}")]
    InvalidSubdocument {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("field {name:?} holds a non-finite number")]
    NonFiniteNumber { name: String },

    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}
