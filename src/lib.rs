//! logcast: typed field records from JSON log payloads, and back.
//!
//! This crate re-exports the codec layers of `logcast-core` so that
//! integration tests and the command-line driver import one path.
//!
//! # Architecture
//!
//! ```text
//! payload ──► decode ──► Record ──► encode ──► JSON
//! ```
//!
//! See [`logcast_core`] for the individual layers.

pub use logcast_core::*;
