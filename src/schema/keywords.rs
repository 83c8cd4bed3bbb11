//! Closed keyword vocabularies used by schema nodes.

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Number;

use super::Schema;

/// The JSON Schema `type` keyword values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl InstanceType {
    /// Looks up a type by its keyword spelling (`"string"`, `"integer"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(InstanceType::Object),
            "array" => Some(InstanceType::Array),
            "string" => Some(InstanceType::String),
            "number" => Some(InstanceType::Number),
            "integer" => Some(InstanceType::Integer),
            "boolean" => Some(InstanceType::Boolean),
            "null" => Some(InstanceType::Null),
            _ => None,
        }
    }

    /// Returns the keyword spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceType::Object => "object",
            InstanceType::Array => "array",
            InstanceType::String => "string",
            InstanceType::Number => "number",
            InstanceType::Integer => "integer",
            InstanceType::Boolean => "boolean",
            InstanceType::Null => "null",
        }
    }
}

impl Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The accepted values of the `format` keyword.
///
/// Any other format name given in a field tag is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "hostname")]
    Hostname,
    #[serde(rename = "ipv4")]
    Ipv4,
    #[serde(rename = "ipv6")]
    Ipv6,
    #[serde(rename = "uri")]
    Uri,
}

impl Format {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date-time" => Some(Format::DateTime),
            "email" => Some(Format::Email),
            "hostname" => Some(Format::Hostname),
            "ipv4" => Some(Format::Ipv4),
            "ipv6" => Some(Format::Ipv6),
            "uri" => Some(Format::Uri),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Email => "email",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::Uri => "uri",
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `additionalProperties` slot, which holds either a boolean literal or
/// a nested schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` allows unknown properties, `false` rejects them.
    Allowed(bool),
    /// Unknown properties must match this schema.
    Schema(Box<Schema>),
}

impl From<bool> for AdditionalProperties {
    fn from(allowed: bool) -> Self {
        AdditionalProperties::Allowed(allowed)
    }
}

impl From<Schema> for AdditionalProperties {
    fn from(schema: Schema) -> Self {
        AdditionalProperties::Schema(Box::new(schema))
    }
}

/// The `exclusiveMinimum`/`exclusiveMaximum` slot.
///
/// Draft-04 spells these as boolean modifiers; later drafts as numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Value(Number),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instance_type_names() {
        for name in ["object", "array", "string", "number", "integer", "boolean", "null"] {
            let ty = InstanceType::from_name(name).unwrap();
            assert_eq!(ty.as_str(), name);
            assert_eq!(serde_json::to_value(ty).unwrap(), json!(name));
        }
        assert_eq!(InstanceType::from_name("float"), None);
    }

    #[test]
    fn test_format_whitelist() {
        assert_eq!(Format::from_name("email"), Some(Format::Email));
        assert_eq!(Format::from_name("date-time"), Some(Format::DateTime));
        assert_eq!(Format::from_name("uuid"), None);
        assert_eq!(serde_json::to_value(Format::DateTime).unwrap(), json!("date-time"));
    }

    #[test]
    fn test_additional_properties_serializes_bool_or_schema() {
        let allowed = AdditionalProperties::from(false);
        assert_eq!(serde_json::to_value(&allowed).unwrap(), json!(false));

        let nested = AdditionalProperties::from(Schema::new(InstanceType::String));
        assert_eq!(serde_json::to_value(&nested).unwrap(), json!({"type": "string"}));
    }

    #[test]
    fn test_exclusive_bound_serialization() {
        let flag = ExclusiveBound::Flag(true);
        assert_eq!(serde_json::to_value(&flag).unwrap(), json!(true));

        let value = ExclusiveBound::Value(Number::from(10));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(10));
    }
}
