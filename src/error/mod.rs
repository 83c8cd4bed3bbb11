//! Error types for schema generation.
//!
//! Only structural problems are errors: a type kind with no JSON Schema
//! mapping aborts the whole reflection pass. Malformed field annotations are
//! never errors; they are dropped where they stand.

mod reflect_error;

pub use reflect_error::{ReflectError, UnsupportedKind};
