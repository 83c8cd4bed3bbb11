//! Tag annotation engine.
//!
//! Overlays the keywords written in a field's `jsonschema` and
//! `jsonschema_extras` tags onto the node the walker already produced for
//! the field. Generic keywords are applied first; the keyword family that
//! matches the node's resulting `type` is applied second; extension pairs
//! go into the node's [`Extras`](crate::schema::Extras) last.
//!
//! Annotation noise never fails reflection: unknown keywords, malformed
//! segments and unparseable numbers are ignored or read as zero.
//!
//! ```rust
//! use typeschema::annotate::apply_field_annotations;
//! use typeschema::schema::{InstanceType, Schema};
//! use typeschema::{StructTag, Version};
//! use serde_json::json;
//!
//! let tag = StructTag::new(r#"jsonschema:"minimum=0,maximum=130""#);
//! let mut parent = Schema::object(false);
//! let mut property = Schema::new(InstanceType::Integer);
//!
//! apply_field_annotations(&mut property, &mut parent, "Age", &tag, Version::Draft07);
//!
//! assert_eq!(
//!     serde_json::to_value(&property).unwrap(),
//!     json!({"type": "integer", "maximum": 130, "minimum": 0})
//! );
//! ```

mod keywords;
mod parser;

use serde_json::Value;

use crate::describe::StructTag;
use crate::schema::{ExclusiveBound, Format, InstanceType, Schema};
use crate::version::Version;

use keywords::{enum_value, parse_bool, parse_integer, parse_number, parse_unsigned, Keyword};

pub use parser::{Annotations, Token};

/// Applies every annotation carried by `tag` to `property`.
///
/// `parent` is the object node that owns the property; `oneof_required`
/// groups are accumulated on it. `name` is the property name the field was
/// given.
pub fn apply_field_annotations(
    property: &mut Schema,
    parent: &mut Schema,
    name: &str,
    tag: &StructTag,
    version: Version,
) {
    if let Some(description) = tag.lookup("jsonschema_description") {
        if !description.is_empty() {
            property.description = Some(description);
        }
    }

    let jsonschema = tag.get("jsonschema");
    Annotations::parse(&jsonschema).apply(property, parent, name, version);

    let extras = tag.get("jsonschema_extras");
    Annotations::parse(&extras).apply_extras(property);
}

impl Annotations<'_> {
    /// Applies the generic keywords, then the keywords of the node's type.
    pub fn apply(&self, property: &mut Schema, parent: &mut Schema, name: &str, version: Version) {
        self.apply_generic(property, parent, name);

        match property.instance_type {
            Some(InstanceType::String) => self.apply_string(property),
            Some(InstanceType::Number | InstanceType::Integer) => {
                self.apply_numeric(property, version)
            }
            Some(InstanceType::Array) => self.apply_array(property),
            _ => {}
        }
    }

    /// Stores every pair in the node's extension bag.
    pub fn apply_extras(&self, property: &mut Schema) {
        for (key, value) in self.pairs() {
            property.extras.set(key, value);
        }
    }

    fn apply_generic(&self, property: &mut Schema, parent: &mut Schema, name: &str) {
        for (key, value) in self.pairs() {
            let Some(keyword) = Keyword::lookup(key) else {
                tracing::trace!(key, "ignoring unknown annotation keyword");
                continue;
            };
            match keyword {
                Keyword::Title => property.title = Some(value.to_string()),
                Keyword::Description => property.description = Some(value.to_string()),
                Keyword::Type => match InstanceType::from_name(value) {
                    Some(instance_type) => property.instance_type = Some(instance_type),
                    None => tracing::trace!(value, "ignoring unknown type override"),
                },
                Keyword::Enum => {
                    if let Some(value) = enum_value(property.instance_type, value) {
                        property.enum_values.push(value);
                    }
                }
                Keyword::OneOfType => {
                    property.instance_type = None;
                    property.one_of.extend(
                        value
                            .split(';')
                            .filter_map(InstanceType::from_name)
                            .map(Schema::new),
                    );
                }
                Keyword::OneOfRequired => require_in_branch(parent, value, name),
                _ => {}
            }
        }
    }

    fn apply_string(&self, property: &mut Schema) {
        for (key, value) in self.pairs() {
            match Keyword::lookup(key) {
                Some(Keyword::MinLength) => property.min_length = Some(parse_unsigned(value)),
                Some(Keyword::MaxLength) => property.max_length = Some(parse_unsigned(value)),
                Some(Keyword::Pattern) => property.pattern = Some(value.to_string()),
                Some(Keyword::Format) => match Format::from_name(value) {
                    Some(format) => property.format = Some(format),
                    None => tracing::trace!(value, "ignoring format outside the whitelist"),
                },
                Some(Keyword::Default) => property.default = Some(Value::from(value)),
                Some(Keyword::Example) => property.examples.push(Value::from(value)),
                _ => {}
            }
        }
    }

    fn apply_numeric(&self, property: &mut Schema, version: Version) {
        let exclusive = |value: &str| {
            if version.exclusive_bounds_are_flags() {
                ExclusiveBound::Flag(parse_bool(value))
            } else {
                ExclusiveBound::Value(parse_number(value))
            }
        };

        for (key, value) in self.pairs() {
            match Keyword::lookup(key) {
                Some(Keyword::MultipleOf) => property.multiple_of = Some(parse_number(value)),
                Some(Keyword::Minimum) => property.minimum = Some(parse_number(value)),
                Some(Keyword::Maximum) => property.maximum = Some(parse_number(value)),
                Some(Keyword::ExclusiveMinimum) => {
                    property.exclusive_minimum = Some(exclusive(value))
                }
                Some(Keyword::ExclusiveMaximum) => {
                    property.exclusive_maximum = Some(exclusive(value))
                }
                Some(Keyword::Default) => property.default = Some(Value::from(parse_integer(value))),
                Some(Keyword::Example) => {
                    if let Ok(example) = value.parse::<i64>() {
                        property.examples.push(Value::from(example));
                    }
                }
                _ => {}
            }
        }
    }

    fn apply_array(&self, property: &mut Schema) {
        let mut defaults = Vec::new();

        for (key, value) in self.pairs() {
            match Keyword::lookup(key) {
                Some(Keyword::MinItems) => property.min_items = Some(parse_unsigned(value)),
                Some(Keyword::MaxItems) => property.max_items = Some(parse_unsigned(value)),
                Some(Keyword::UniqueItems) => property.unique_items = true,
                Some(Keyword::Default) => defaults.push(Value::from(value)),
                Some(Keyword::Enum) => {
                    if let Some(items) = property.items.as_deref_mut() {
                        if let Some(value) = enum_value(items.instance_type, value) {
                            items.enum_values.push(value);
                        }
                    }
                }
                _ => {}
            }
        }

        if self.has_flag("uniqueItems") {
            property.unique_items = true;
        }
        if !defaults.is_empty() {
            property.default = Some(Value::Array(defaults));
        }
    }
}

/// Adds `name` to the `required` list of the parent's `oneOf` branch titled
/// `title`, creating the branch on first use.
fn require_in_branch(parent: &mut Schema, title: &str, name: &str) {
    let position = parent
        .one_of
        .iter()
        .position(|branch| branch.title.as_deref() == Some(title));

    let branch = match position {
        Some(index) => &mut parent.one_of[index],
        None => {
            parent.one_of.push(Schema::default().with_title(title));
            let last = parent.one_of.len() - 1;
            &mut parent.one_of[last]
        }
    };
    branch.required.push(name.to_string());
}
