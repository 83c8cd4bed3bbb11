//! How a struct field maps onto its parent's properties.

use crate::annotate::Annotations;
use crate::describe::Field;

use super::ReflectorOptions;

/// What the walker does with one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldDisposition {
    /// The field contributes nothing.
    Skip,
    /// The field's own fields are spliced into the parent.
    Embed,
    /// The field becomes a named property.
    Property {
        name: String,
        required: bool,
        nullable: bool,
    },
}

impl FieldDisposition {
    pub(crate) fn of(field: &Field, options: &ReflectorOptions) -> Self {
        let tag = field.struct_tag();
        let yaml = tag.lookup("yaml");

        let serialization = match tag.lookup("json") {
            Some(json) if !options.prefer_yaml_schema => Some(json),
            _ => yaml.clone(),
        };
        let serialization_text = serialization.as_deref().unwrap_or_default();
        let mut segments = serialization_text.split(',');
        let tag_name = segments.next().unwrap_or_default();

        if tag_name == "-" {
            return FieldDisposition::Skip;
        }

        let jsonschema = tag.get("jsonschema");
        let annotations = Annotations::parse(&jsonschema);
        if annotations.is_ignored() {
            return FieldDisposition::Skip;
        }

        let required = if options.required_from_jsonschema_tags {
            annotations.has_flag("required")
        } else {
            !segments.any(|option| option == "omitempty")
        };
        let nullable = annotations.has_flag("nullable");

        let mut name = if tag_name.is_empty() {
            field.ident().to_string()
        } else {
            tag_name.to_string()
        };

        if !field.is_anonymous() && !field.is_exported() {
            return FieldDisposition::Skip;
        }

        let mut embed = false;
        if field.is_anonymous() && serialization.is_none() {
            if options.yaml_embedded_structs {
                name = field.describe_type().deref().name().to_lowercase();
            } else {
                embed = true;
            }
        }

        let inline = yaml
            .as_deref()
            .is_some_and(|yaml| yaml.split(',').skip(1).any(|option| option == "inline"));
        if embed || inline {
            return FieldDisposition::Embed;
        }

        if name.is_empty() {
            return FieldDisposition::Skip;
        }
        FieldDisposition::Property {
            name,
            required,
            nullable,
        }
    }
}
