//! # Typeschema
//!
//! Generates JSON Schema documents (draft-04, draft-07, 2019-09, 2020-12)
//! from Rust type descriptions and per-field tag strings.
//!
//! ## Overview
//!
//! Types describe their own shape through the [`Describe`] trait, usually
//! via the [`describe!`] macro. A [`Reflector`] walks that description and
//! produces a [`RootSchema`]: one root node plus a table of named
//! definitions. Named structs are placed in the table and referenced with
//! `$ref`, which is also how self-referential types terminate.
//!
//! Fields carry tag strings in the conventional `key:"value"` form:
//!
//! - `json:"name,omitempty"` renames the property and makes it optional
//!   (`json:"-"` drops it)
//! - `jsonschema:"minimum=0,maxLength=20,nullable,oneof_required=A"` adds
//!   validation keywords
//! - `jsonschema_extras:"x-order=1"` adds free-form keywords
//! - `jsonschema_description:"..."` sets the description
//!
//! Malformed annotations are ignored; only types that cannot be expressed
//! as JSON Schema at all (functions, channels) make reflection fail.
//!
//! ## Core Types
//!
//! - [`Reflector`] / [`ReflectorOptions`]: configuration and entry points
//! - [`TypeDescriptor`], [`Kind`], [`Field`]: the description being walked
//! - [`schema::Schema`]: one schema node
//! - [`RootSchema`] and [`Definitions`]: the finished document
//! - [`ReflectError`]: the failure raised for unsupported types
//!
//! ## Example
//!
//! ```rust
//! use typeschema::{describe, reflect};
//! use serde_json::json;
//!
//! struct Node;
//!
//! describe! {
//!     Node {
//!         Label: String => r#"jsonschema:"minLength=1""#,
//!         Children: Vec<Node> => r#"json:"children,omitempty""#,
//!     }
//! }
//!
//! let root = reflect::<Node>().unwrap();
//! assert_eq!(
//!     root.to_value().unwrap(),
//!     json!({
//!         "$schema": "https://json-schema.org/draft-04/schema#",
//!         "$ref": "#/definitions/Node",
//!         "definitions": {
//!             "Node": {
//!                 "type": "object",
//!                 "required": ["Label"],
//!                 "properties": {
//!                     "Label": {"type": "string", "minLength": 1},
//!                     "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
//!                 },
//!                 "additionalProperties": false
//!             }
//!         }
//!     })
//! );
//! ```

pub mod annotate;
pub mod definitions;
pub mod describe;
pub mod error;
pub mod path;
pub mod reflector;
pub mod root;
pub mod schema;
pub mod version;

pub use definitions::Definitions;
pub use describe::{
    Describe, DescribeFn, Field, FloatKind, IntegerKind, Kind, StructTag, TypeDescriptor,
    WellKnown,
};
pub use error::{ReflectError, UnsupportedKind};
pub use path::{PathSegment, TypePath};
pub use reflector::{FieldProvider, Reflector, ReflectorOptions, TypeMapper, TypeNamer};
pub use root::RootSchema;
pub use schema::Schema;
pub use version::Version;

/// Reflects `T` with a default [`Reflector`].
///
/// # Errors
///
/// Returns [`ReflectError::UnsupportedType`] if `T` contains a function or
/// channel type.
pub fn reflect<T: Describe>() -> Result<RootSchema, ReflectError> {
    Reflector::new().reflect::<T>()
}
