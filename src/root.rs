//! The top-level schema document.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::definitions::Definitions;
use crate::error::ReflectError;
use crate::schema::Schema;
use crate::version::Version;

/// One reflected document: the root node plus every definition it refers to.
///
/// Serializes as the root node's own keywords with the definitions table
/// next to them, under `definitions` or `$defs` depending on the draft. An
/// empty table is omitted.
///
/// # Example
///
/// ```rust
/// use typeschema::{describe, reflect};
/// use serde_json::json;
///
/// struct Point;
///
/// describe! {
///     Point {
///         X: f64,
///         Y: f64,
///     }
/// }
///
/// let root = reflect::<Point>().unwrap();
/// assert_eq!(root.schema().reference.as_deref(), Some("#/definitions/Point"));
/// assert_eq!(
///     root.to_value().unwrap()["definitions"]["Point"]["required"],
///     json!(["X", "Y"])
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RootSchema {
    schema: Schema,
    definitions: Definitions,
    version: Version,
}

impl RootSchema {
    pub(crate) fn new(schema: Schema, definitions: Definitions, version: Version) -> Self {
        Self {
            schema,
            definitions,
            version,
        }
    }

    /// The root node.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Looks up the node a `$ref` pointer refers to, if it points into this
    /// document's definitions table.
    pub fn resolve(&self, pointer: &str) -> Option<&Schema> {
        let token = pointer.strip_prefix(self.version.definitions_pointer())?;
        let name = token.replace("~1", "/").replace("~0", "~");
        self.definitions.get(&name)
    }

    pub fn into_parts(self) -> (Schema, Definitions) {
        (self.schema, self.definitions)
    }

    pub fn to_value(&self) -> Result<Value, ReflectError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String, ReflectError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ReflectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(flatten)]
    schema: &'a Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    definitions: Option<&'a Definitions>,
    #[serde(rename = "$defs", skip_serializing_if = "Option::is_none")]
    defs: Option<&'a Definitions>,
}

impl Serialize for RootSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let table = (!self.definitions.is_empty()).then_some(&self.definitions);
        let (definitions, defs) = match self.version.definitions_key() {
            "$defs" => (None, table),
            _ => (table, None),
        };
        Document {
            schema: &self.schema,
            definitions,
            defs,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InstanceType;
    use serde_json::json;

    fn sample(version: Version) -> RootSchema {
        let mut definitions = Definitions::new();
        definitions.register("Name", Schema::new(InstanceType::String));
        let schema = Schema {
            version,
            ..Schema::reference(format!("{}Name", version.definitions_pointer()))
        };
        RootSchema::new(schema, definitions, version)
    }

    #[test]
    fn test_definitions_key_for_draft07() {
        assert_eq!(
            sample(Version::Draft07).to_value().unwrap(),
            json!({
                "$schema": "https://json-schema.org/draft-07/schema#",
                "$ref": "#/definitions/Name",
                "definitions": {"Name": {"type": "string"}}
            })
        );
    }

    #[test]
    fn test_defs_key_for_draft202012() {
        let value = sample(Version::Draft202012).to_value().unwrap();
        assert_eq!(value["$ref"], json!("#/$defs/Name"));
        assert_eq!(value["$defs"], json!({"Name": {"type": "string"}}));
        assert!(value.get("definitions").is_none());
    }

    #[test]
    fn test_empty_definitions_omitted() {
        let root = RootSchema::new(
            Schema::new(InstanceType::Integer),
            Definitions::new(),
            Version::Unset,
        );
        assert_eq!(root.to_json().unwrap(), r#"{"type":"integer"}"#);
    }

    #[test]
    fn test_resolve() {
        let root = sample(Version::Draft07);
        let pointer = root.schema().reference.clone().unwrap();
        assert_eq!(
            root.resolve(&pointer).and_then(|s| s.instance_type),
            Some(InstanceType::String)
        );
        assert!(root.resolve("#/$defs/Name").is_none());
    }

    #[test]
    fn test_pretty_output_is_stable() {
        let root = sample(Version::Draft07);
        assert_eq!(root.to_json_pretty().unwrap(), root.to_json_pretty().unwrap());
        assert!(root.to_json_pretty().unwrap().contains('\n'));
    }
}
