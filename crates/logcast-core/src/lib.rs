//! logcast-core: JSON log payloads to typed field records, and back.
//!
//! This crate exposes the codec layers as public modules, plus the shared
//! field model used across all of them.
//!
//! # Architecture
//!
//! ```text
//!            ┌──► path (rules, flatten)
//! payload ──► decoder ──► semantic ──► Record ──► encoder ──► JSON
//!                  └──► identifier (hash stamp)
//! ```
//!
//! Decode and encode are synchronous and pure over their inputs. A
//! [`CodecConfig`] is built once and shared by reference between any number
//! of concurrent calls.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod identifier;
pub mod path;
pub mod semantic;
pub mod types;

pub use config::{CodecConfig, CodecSettings, PathRule};
pub use decoder::decode;
pub use encoder::encode;
pub use error::{DecodeError, EncodeError, PathError, SemanticError};
pub use types::{Field, FieldValue, Record};
