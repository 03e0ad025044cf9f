//! Shared types for the brew order-management backend
//!
//! Domain models and request payloads used by the server and by API
//! clients. Everything here is plain data: serde for the wire and file
//! formats, validator for field-level constraints, no I/O.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
