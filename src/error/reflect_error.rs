//! The reflection error type.

use std::fmt::{self, Display};

use crate::path::TypePath;

/// A type kind with no JSON Schema mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// A function or closure pointer.
    Function,
    /// A channel endpoint.
    Channel,
}

impl Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedKind::Function => f.write_str("function"),
            UnsupportedKind::Channel => f.write_str("channel"),
        }
    }
}

/// Errors that abort schema generation.
///
/// # Example
///
/// ```rust
/// use typeschema::{describe, reflect, ReflectError};
///
/// struct Job;
///
/// describe! {
///     Job {
///         Name: String,
///         Run: fn() -> bool,
///     }
/// }
///
/// match reflect::<Job>() {
///     Err(ReflectError::UnsupportedType { path, .. }) => assert_eq!(path.to_string(), "Job.Run"),
///     other => panic!("expected an unsupported type error, got {:?}", other),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    /// The walk reached a kind that cannot be expressed as JSON Schema.
    #[error("unsupported type {rust_type} ({kind}) at '{path}'")]
    UnsupportedType {
        /// The Rust type name of the offending type.
        rust_type: String,
        /// What kind of type it is.
        kind: UnsupportedKind,
        /// Where in the reflected type it was found.
        path: TypePath,
    },

    /// The finished document could not be encoded as JSON.
    #[error("failed to encode schema: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReflectError {
    pub(crate) fn unsupported(
        rust_type: impl Into<String>,
        kind: UnsupportedKind,
        path: &TypePath,
    ) -> Self {
        ReflectError::UnsupportedType {
            rust_type: rust_type.into(),
            kind,
            path: path.clone(),
        }
    }
}

// ReflectError crosses thread boundaries when a shared Reflector is used from
// worker threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ReflectError>();
    assert_sync::<ReflectError>();
};
