//! Tests for reflector switches and caller hooks.

use pretty_assertions::assert_eq;
use serde_json::json;
use typeschema::schema::{InstanceType, Schema};
use typeschema::{describe, Field, Reflector, ReflectorOptions};

struct Audit;

describe! {
    Audit {
        CreatedBy: String,
    }
}

struct Account;

describe! {
    Account {
        #[embedded] Audit: Audit,
        Id: Uuid => r#"json:"id""#,
        Email: String => r#"json:"email,omitempty" yaml:"mail" jsonschema:"required""#,
        Secret: Secret => r#"json:"secret,omitempty""#,
    }
}

struct Uuid;

describe! { Uuid {} }

struct Secret;

describe! {
    Secret {
        Key: String,
    }
}

#[test]
fn test_allow_additional_properties() {
    let root = Reflector::new()
        .allow_additional_properties(true)
        .reflect::<Audit>()
        .unwrap();

    assert_eq!(
        root.to_value().unwrap()["definitions"]["Audit"]["additionalProperties"],
        json!(true)
    );
}

#[test]
fn test_required_from_jsonschema_tags() {
    let root = Reflector::new()
        .required_from_jsonschema_tags(true)
        .expanded_struct(true)
        .reflect::<Account>()
        .unwrap();

    assert_eq!(root.schema().required, vec!["email".to_string()]);
}

#[test]
fn test_yaml_embedded_structs() {
    let root = Reflector::new()
        .yaml_embedded_structs(true)
        .expanded_struct(true)
        .reflect::<Account>()
        .unwrap();
    let value = root.to_value().unwrap();

    assert_eq!(value["properties"]["audit"], json!({"$ref": "#/definitions/Audit"}));
    assert!(value["properties"].get("CreatedBy").is_none());
    assert_eq!(value["required"], json!(["audit", "id"]));
}

#[test]
fn test_prefer_yaml_schema() {
    let root = Reflector::new()
        .prefer_yaml_schema(true)
        .expanded_struct(true)
        .reflect::<Account>()
        .unwrap();

    let properties = root.schema().properties.as_ref().unwrap();
    assert!(properties.contains_key("mail"));
    assert!(!properties.contains_key("email"));
    // without a yaml tag the field falls back to its identifier
    assert!(properties.contains_key("Id"));
}

#[test]
fn test_fully_qualified_names() {
    let root = Reflector::new()
        .fully_qualify_type_names(true)
        .reflect::<Audit>()
        .unwrap();

    let names: Vec<_> = root.definitions().names().collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("::Audit"), "{}", names[0]);
    assert_eq!(
        root.schema().reference.as_deref(),
        Some(format!("#/definitions/{}", names[0]).as_str())
    );
}

#[test]
fn test_ignore_type() {
    let root = Reflector::new().ignore_type::<Secret>().reflect::<Account>().unwrap();
    let value = root.to_value().unwrap();

    assert_eq!(
        value["definitions"]["Secret"],
        json!({"type": "object", "properties": {}, "additionalProperties": true})
    );
    assert_eq!(
        value["definitions"]["Account"]["properties"]["secret"],
        json!({"$ref": "#/definitions/Secret"})
    );
}

#[test]
fn test_type_mapper() {
    let root = Reflector::new()
        .type_mapper(|descriptor| {
            (descriptor.name() == "Uuid").then(|| Schema {
                pattern: Some("^[0-9a-f-]{36}$".to_string()),
                ..Schema::new(InstanceType::String)
            })
        })
        .expanded_struct(true)
        .reflect::<Account>()
        .unwrap();
    let value = root.to_value().unwrap();

    assert_eq!(
        value["properties"]["id"],
        json!({"type": "string", "pattern": "^[0-9a-f-]{36}$"})
    );
    assert!(!root.definitions().contains("Uuid"));
}

#[test]
fn test_type_namer() {
    let root = Reflector::new()
        .type_namer(|descriptor| match descriptor.name() {
            "Secret" => Some("vault.Secret".to_string()),
            "Uuid" => Some(String::new()),
            _ => None,
        })
        .reflect::<Account>()
        .unwrap();

    let names: Vec<_> = root.definitions().names().collect();
    assert_eq!(names, vec!["Account", "Uuid", "vault.Secret"]);
}

#[test]
fn test_additional_fields() {
    let root = Reflector::new()
        .additional_fields(|descriptor| {
            if descriptor.name() == "Audit" {
                vec![Field::new::<i64>("Revision").tag(r#"json:"revision,omitempty""#)]
            } else {
                Vec::new()
            }
        })
        .reflect::<Audit>()
        .unwrap();
    let value = root.to_value().unwrap();

    assert_eq!(
        value["definitions"]["Audit"]["properties"],
        json!({"CreatedBy": {"type": "string"}, "revision": {"type": "integer"}})
    );
    assert_eq!(value["definitions"]["Audit"]["required"], json!(["CreatedBy"]));
}

#[test]
fn test_from_options_file() {
    let options: ReflectorOptions = serde_json::from_value(json!({
        "version": "https://json-schema.org/draft-07/schema#",
        "expanded_struct": true,
        "allow_additional_properties": true
    }))
    .unwrap();

    let root = Reflector::from_options(options).reflect::<Audit>().unwrap();
    assert_eq!(
        root.to_value().unwrap(),
        json!({
            "$schema": "https://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["CreatedBy"],
            "properties": {"CreatedBy": {"type": "string"}},
            "additionalProperties": true
        })
    );
}
