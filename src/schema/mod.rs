//! Schema nodes.
//!
//! This module provides [`Schema`], one JSON Schema subtree, and the small
//! closed vocabularies its keywords draw from. A node only ever carries the
//! keyword family that matches its `type`; reference nodes carry `$ref` and
//! at most documentation keywords next to it.
//!
//! # Example
//!
//! ```rust
//! use typeschema::schema::{Format, InstanceType, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new(InstanceType::String)
//!     .with_format(Format::Email)
//!     .with_description("contact address");
//!
//! assert_eq!(
//!     serde_json::to_value(&schema).unwrap(),
//!     json!({"type": "string", "description": "contact address", "format": "email"})
//! );
//! ```

mod extras;
mod keywords;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::version::Version;

pub use extras::{ExtraValue, Extras};
pub use keywords::{AdditionalProperties, ExclusiveBound, Format, InstanceType};

/// Object properties in declaration order.
pub type Properties = IndexMap<String, Schema>;

/// One JSON Schema subtree.
///
/// Every keyword is optional; unset keywords are omitted from the serialized
/// form. `properties` distinguishes "no properties keyword" (`None`) from an
/// object with no declared properties (`Some` of an empty map).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "$comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "$schema", skip_serializing_if = "Version::is_unset")]
    pub version: Version,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<InstanceType>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<ExclusiveBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<ExclusiveBound>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "is_false")]
    pub unique_items: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<Box<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub pattern_properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_names: Option<Box<Schema>>,

    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub if_schema: Option<Box<Schema>>,
    #[serde(rename = "then", skip_serializing_if = "Option::is_none")]
    pub then_schema: Option<Box<Schema>>,
    #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
    pub else_schema: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_media_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub write_only: bool,

    // draft-04 hyper-schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_encoding: Option<String>,

    #[serde(flatten)]
    pub extras: Extras,
}

impl Schema {
    /// Creates a node constrained to a single instance type.
    pub fn new(instance_type: InstanceType) -> Self {
        Self {
            instance_type: Some(instance_type),
            ..Self::default()
        }
    }

    /// Creates a bare reference node.
    pub fn reference(pointer: impl Into<String>) -> Self {
        Self {
            reference: Some(pointer.into()),
            ..Self::default()
        }
    }

    /// Creates an object node with an empty property list.
    pub fn object(additional_properties: bool) -> Self {
        Self {
            instance_type: Some(InstanceType::Object),
            properties: Some(Properties::new()),
            additional_properties: Some(AdditionalProperties::Allowed(additional_properties)),
            ..Self::default()
        }
    }

    /// Creates a node accepting any JSON value.
    pub fn any() -> Self {
        Self {
            additional_properties: Some(AdditionalProperties::Allowed(true)),
            ..Self::default()
        }
    }

    /// Wraps this node so that `null` is accepted as well.
    pub fn nullable(self) -> Self {
        Self {
            one_of: vec![self, Schema::new(InstanceType::Null)],
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if this node is a `$ref` into the definitions table.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Returns the property with the given name, if this node declares it.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref()?.get(name)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_schema_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Schema::default()).unwrap(), "{}");
    }

    #[test]
    fn test_zero_bounds_are_kept() {
        let schema = Schema {
            minimum: Some(Number::from(0)),
            min_length: Some(0),
            ..Schema::new(InstanceType::Integer)
        };
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "integer", "minimum": 0, "minLength": 0})
        );
    }

    #[test]
    fn test_object_keeps_empty_properties() {
        assert_eq!(
            serde_json::to_value(Schema::object(false)).unwrap(),
            json!({"type": "object", "properties": {}, "additionalProperties": false})
        );
    }

    #[test]
    fn test_nullable_wraps_in_one_of() {
        let schema = Schema::new(InstanceType::String).nullable();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"oneOf": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let mut schema = Schema::object(false);
        let properties = schema.properties.as_mut().unwrap();
        properties.insert("zeta".into(), Schema::new(InstanceType::String));
        properties.insert("alpha".into(), Schema::new(InstanceType::Integer));

        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
    }

    #[test]
    fn test_extras_are_flattened_after_keywords() {
        let mut schema = Schema::new(InstanceType::String);
        schema.extras.set("x-display", "hidden");

        assert_eq!(
            serde_json::to_string(&schema).unwrap(),
            r#"{"type":"string","x-display":"hidden"}"#
        );
    }

    #[test]
    fn test_extras_alone() {
        let mut schema = Schema::default();
        schema.extras.set("x-only", "yes");
        assert_eq!(serde_json::to_string(&schema).unwrap(), r#"{"x-only":"yes"}"#);
    }

    #[test]
    fn test_reference_node() {
        let schema = Schema::reference("#/definitions/User");
        assert!(schema.is_reference());
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"$ref": "#/definitions/User"})
        );
    }

    #[test]
    fn test_version_keyword() {
        let schema = Schema {
            version: Version::Draft07,
            ..Schema::new(InstanceType::Boolean)
        };
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"$schema": "https://json-schema.org/draft-07/schema#", "type": "boolean"})
        );
    }
}
