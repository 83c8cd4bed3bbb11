//! Tests for per-draft keyword spellings.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use typeschema::{describe, Describe, Reflector, ReflectorOptions, Version};

struct Reading;

describe! {
    Reading {
        Level: f64 => r#"jsonschema:"exclusiveMinimum=0,exclusiveMaximum=true""#,
        Raw: Vec<u8>,
    }
}

fn reflect_with<T: Describe>(version: Version) -> Value {
    Reflector::new()
        .with_version(version)
        .reflect::<T>()
        .unwrap()
        .to_value()
        .unwrap()
}

#[test]
fn test_schema_keyword_per_version() {
    let cases = [
        (Version::Draft04, "https://json-schema.org/draft-04/schema#"),
        (Version::Draft07, "https://json-schema.org/draft-07/schema#"),
        (Version::Draft201909, "https://json-schema.org/draft/2019-09/schema#"),
        (Version::Draft202012, "https://json-schema.org/draft/2020-12/schema#"),
    ];
    for (version, uri) in cases {
        assert_eq!(reflect_with::<Reading>(version)["$schema"], json!(uri));
    }
}

#[test]
fn test_unset_version_omits_schema_keyword() {
    let value = reflect_with::<Reading>(Version::Unset);
    assert!(value.get("$schema").is_none());
    assert_eq!(value["$ref"], json!("#/definitions/Reading"));
}

#[test]
fn test_definitions_key_per_version() {
    for version in [Version::Unset, Version::Draft04, Version::Draft07] {
        let value = reflect_with::<Reading>(version);
        assert!(value["definitions"].get("Reading").is_some(), "{version:?}");
    }
    for version in [Version::Draft201909, Version::Draft202012] {
        let value = reflect_with::<Reading>(version);
        assert!(value["$defs"].get("Reading").is_some(), "{version:?}");
        assert_eq!(value["$ref"], json!("#/$defs/Reading"));
    }
}

#[test]
fn test_draft04_exclusive_bounds_and_media() {
    let value = reflect_with::<Reading>(Version::Draft04);
    let properties = &value["definitions"]["Reading"]["properties"];

    assert_eq!(
        properties["Level"],
        json!({"type": "number", "exclusiveMinimum": false, "exclusiveMaximum": true})
    );
    assert_eq!(
        properties["Raw"],
        json!({"type": "string", "media": {"binaryEncoding": "base64"}})
    );
}

#[test]
fn test_draft07_exclusive_bounds_are_numbers() {
    let value = reflect_with::<Reading>(Version::Draft07);
    let properties = &value["definitions"]["Reading"]["properties"];

    assert_eq!(
        properties["Level"],
        json!({"type": "number", "exclusiveMinimum": 0, "exclusiveMaximum": 0})
    );
}

#[test]
fn test_byte_slices_use_media_in_every_draft() {
    let expected = json!({"type": "string", "media": {"binaryEncoding": "base64"}});
    for version in [Version::Unset, Version::Draft04, Version::Draft07] {
        let value = reflect_with::<Reading>(version);
        assert_eq!(
            value["definitions"]["Reading"]["properties"]["Raw"],
            expected,
            "{version:?}"
        );
        assert!(value["definitions"]["Reading"]["properties"]["Raw"]
            .get("contentEncoding")
            .is_none());
    }
    for version in [Version::Draft201909, Version::Draft202012] {
        let value = reflect_with::<Reading>(version);
        assert_eq!(value["$defs"]["Reading"]["properties"]["Raw"], expected, "{version:?}");
    }
}

#[test]
fn test_version_round_trips_through_options() {
    let options: ReflectorOptions =
        serde_json::from_value(json!({"version": "https://json-schema.org/draft/2019-09/schema#"}))
            .unwrap();
    assert_eq!(options.version, Version::Draft201909);

    let unknown: ReflectorOptions =
        serde_json::from_value(json!({"version": "https://example.com/custom"})).unwrap();
    assert_eq!(unknown.version, Version::Draft04);
}

#[test]
fn test_only_root_carries_schema_keyword() {
    let root = Reflector::new()
        .with_version(Version::Draft07)
        .reflect::<Reading>()
        .unwrap();

    assert_eq!(root.schema().version, Version::Draft07);
    for (_, definition) in root.definitions().iter() {
        assert_eq!(definition.version, Version::Unset);
    }
}
