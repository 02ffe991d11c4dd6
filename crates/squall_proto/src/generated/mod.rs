//! Hand-maintained message definitions.
//!
//! These are written in the exact shape `prost-build` emits so the crate
//! builds without a protoc step. Field tags are part of the wire contract;
//! never reuse a tag for a new field.

pub mod schema;
pub mod signature;
