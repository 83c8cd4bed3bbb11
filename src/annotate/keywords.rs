//! Annotation keyword table and tolerant value parsing.

use serde_json::{Number, Value};

use crate::schema::InstanceType;

/// The annotation keywords understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Keyword {
    // any type
    Title,
    Description,
    Type,
    Enum,
    OneOfType,
    OneOfRequired,
    // string
    MinLength,
    MaxLength,
    Pattern,
    Format,
    // string, number, integer, array
    Default,
    Example,
    // number, integer
    MultipleOf,
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    // array
    MinItems,
    MaxItems,
    UniqueItems,
}

impl Keyword {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let keyword = match name {
            "title" => Keyword::Title,
            "description" => Keyword::Description,
            "type" => Keyword::Type,
            "enum" => Keyword::Enum,
            "oneof_type" => Keyword::OneOfType,
            "oneof_required" => Keyword::OneOfRequired,
            "minLength" => Keyword::MinLength,
            "maxLength" => Keyword::MaxLength,
            "pattern" => Keyword::Pattern,
            "format" => Keyword::Format,
            "default" => Keyword::Default,
            "example" => Keyword::Example,
            "multipleOf" => Keyword::MultipleOf,
            "minimum" => Keyword::Minimum,
            "maximum" => Keyword::Maximum,
            "exclusiveMinimum" => Keyword::ExclusiveMinimum,
            "exclusiveMaximum" => Keyword::ExclusiveMaximum,
            "minItems" => Keyword::MinItems,
            "maxItems" => Keyword::MaxItems,
            "uniqueItems" => Keyword::UniqueItems,
            _ => return None,
        };
        Some(keyword)
    }
}

/// Parses an unsigned count, yielding zero for malformed text.
pub(crate) fn parse_unsigned(value: &str) -> u64 {
    value.parse().unwrap_or_default()
}

/// Parses a signed integer, yielding zero for malformed text.
pub(crate) fn parse_integer(value: &str) -> i64 {
    value.parse().unwrap_or_default()
}

/// Parses an integer or decimal, keeping integers integral.
/// Malformed text yields zero.
pub(crate) fn parse_number(value: &str) -> Number {
    if let Ok(integer) = value.parse::<i64>() {
        return Number::from(integer);
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .unwrap_or_else(|| Number::from(0))
}

/// Parses a boolean the lenient way (`1`, `t`, `TRUE`, ...), yielding false
/// for malformed text.
pub(crate) fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "true" | "TRUE" | "True")
}

/// Converts an `enum=` value according to the node's type. Values for other
/// types produce nothing.
pub(crate) fn enum_value(instance_type: Option<InstanceType>, value: &str) -> Option<Value> {
    match instance_type? {
        InstanceType::String => Some(Value::String(value.to_string())),
        InstanceType::Integer => Some(Value::from(parse_integer(value))),
        InstanceType::Number => {
            let float = value.parse::<f64>().unwrap_or_default();
            Number::from_f64(float).map(Value::Number)
        }
        _ => None,
    }
}
