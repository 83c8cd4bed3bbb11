//! Reflector configuration and entry points.
//!
//! A [`Reflector`] holds the switches that shape the generated schema and
//! the optional caller hooks. It carries no state between calls: every
//! [`Reflector::reflect`] owns a fresh definitions table, so one reflector
//! can be shared freely across threads.
//!
//! # Example
//!
//! ```rust
//! use typeschema::{describe, Reflector, Version};
//! use serde_json::json;
//!
//! struct Person;
//!
//! describe! {
//!     Person {
//!         Name: String,
//!         Age: i64 => r#"json:",omitempty" jsonschema:"minimum=0""#,
//!     }
//! }
//!
//! let root = Reflector::new()
//!     .with_version(Version::Draft07)
//!     .expanded_struct(true)
//!     .reflect::<Person>()
//!     .unwrap();
//!
//! assert_eq!(
//!     root.to_value().unwrap(),
//!     json!({
//!         "$schema": "https://json-schema.org/draft-07/schema#",
//!         "type": "object",
//!         "required": ["Name"],
//!         "properties": {
//!             "Name": {"type": "string"},
//!             "Age": {"type": "integer", "minimum": 0}
//!         },
//!         "additionalProperties": false
//!     })
//! );
//! ```

mod fields;
mod walker;

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::describe::{Describe, Field, TypeDescriptor};
use crate::error::ReflectError;
use crate::root::RootSchema;
use crate::schema::Schema;
use crate::version::Version;

use walker::Pass;

/// Replaces the node of a type; returning `None` falls through to the
/// normal mapping.
pub type TypeMapper = Arc<dyn Fn(&TypeDescriptor) -> Option<Schema> + Send + Sync>;

/// Names a type's definition; `None` or an empty name falls back to the
/// default naming.
pub type TypeNamer = Arc<dyn Fn(&TypeDescriptor) -> Option<String> + Send + Sync>;

/// Supplies synthetic fields appended after a struct's declared fields.
pub type FieldProvider = Arc<dyn Fn(&TypeDescriptor) -> Vec<Field> + Send + Sync>;

/// The serializable switches of a [`Reflector`].
///
/// Every key is optional when deserializing:
///
/// ```rust
/// use typeschema::{ReflectorOptions, Version};
///
/// let options: ReflectorOptions = serde_json::from_str(
///     r#"{"version": "https://json-schema.org/draft-07/schema#", "expanded_struct": true}"#,
/// ).unwrap();
///
/// assert_eq!(options.version, Version::Draft07);
/// assert!(options.expanded_struct);
/// assert!(!options.do_not_reference);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReflectorOptions {
    /// The draft to declare and to take keyword spellings from.
    pub version: Version,
    /// Structs accept properties they do not declare.
    pub allow_additional_properties: bool,
    /// A field is required only when its `jsonschema` tag says `required`,
    /// instead of when its serialization tag lacks `omitempty`.
    pub required_from_jsonschema_tags: bool,
    /// Untagged embedded structs become a property named after their type
    /// instead of being spliced into the parent.
    pub yaml_embedded_structs: bool,
    /// Read property names from the `yaml` tag even when a `json` tag exists.
    pub prefer_yaml_schema: bool,
    /// The root struct is emitted inline instead of as a `$ref`.
    pub expanded_struct: bool,
    /// Named types are copied inline instead of referenced, except where a
    /// reference is needed to end a cycle.
    pub do_not_reference: bool,
    /// Definitions are named with the type's module path.
    pub fully_qualify_type_names: bool,
}

impl Default for ReflectorOptions {
    fn default() -> Self {
        Self {
            version: Version::Draft04,
            allow_additional_properties: false,
            required_from_jsonschema_tags: false,
            yaml_embedded_structs: false,
            prefer_yaml_schema: false,
            expanded_struct: false,
            do_not_reference: false,
            fully_qualify_type_names: false,
        }
    }
}

/// Converts type descriptors into schema documents.
#[derive(Clone, Default)]
pub struct Reflector {
    options: ReflectorOptions,
    ignored_types: HashSet<TypeId>,
    type_mapper: Option<TypeMapper>,
    type_namer: Option<TypeNamer>,
    additional_fields: Option<FieldProvider>,
}

impl Reflector {
    /// Creates a reflector with default options, targeting draft-04.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reflector from deserialized options, with no hooks or ignored types.
    pub fn from_options(options: ReflectorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the current switches.
    pub fn options(&self) -> &ReflectorOptions {
        &self.options
    }

    /// Sets the draft to declare in `$schema` and to take keyword spellings from.
    pub fn with_version(mut self, version: Version) -> Self {
        self.options.version = version;
        self
    }

    /// Lets struct nodes accept properties they do not declare.
    pub fn allow_additional_properties(mut self, allow: bool) -> Self {
        self.options.allow_additional_properties = allow;
        self
    }

    /// Marks a field required only when its `jsonschema` tag says `required`.
    pub fn required_from_jsonschema_tags(mut self, enabled: bool) -> Self {
        self.options.required_from_jsonschema_tags = enabled;
        self
    }

    /// Keeps untagged embedded structs as a property instead of splicing their fields.
    pub fn yaml_embedded_structs(mut self, enabled: bool) -> Self {
        self.options.yaml_embedded_structs = enabled;
        self
    }

    /// Takes property names from the `yaml` tag before the `json` tag.
    pub fn prefer_yaml_schema(mut self, enabled: bool) -> Self {
        self.options.prefer_yaml_schema = enabled;
        self
    }

    /// Emits the root struct inline instead of as a `$ref` into the definitions.
    pub fn expanded_struct(mut self, enabled: bool) -> Self {
        self.options.expanded_struct = enabled;
        self
    }

    /// Copies named types inline instead of referencing them, except to break cycles.
    pub fn do_not_reference(mut self, enabled: bool) -> Self {
        self.options.do_not_reference = enabled;
        self
    }

    /// Names definitions with the type's module path.
    pub fn fully_qualify_type_names(mut self, enabled: bool) -> Self {
        self.options.fully_qualify_type_names = enabled;
        self
    }

    /// Treats `T` as opaque: it is emitted as an object accepting anything.
    pub fn ignore_type<T: Describe>(mut self) -> Self {
        self.ignored_types.insert(TypeId::of::<T>());
        self
    }

    /// Replaces the node of any type for which `mapper` returns `Some`.
    ///
    /// The mapper runs before every other rule, so mapped types are never
    /// registered as definitions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use typeschema::schema::{InstanceType, Schema};
    /// use typeschema::{describe, Reflector};
    /// use serde_json::json;
    ///
    /// struct Uuid;
    /// describe! { Uuid {} }
    ///
    /// let root = Reflector::new()
    ///     .type_mapper(|descriptor| {
    ///         (descriptor.name() == "Uuid").then(|| Schema {
    ///             pattern: Some("^[0-9a-f-]{36}$".to_string()),
    ///             ..Schema::new(InstanceType::String)
    ///         })
    ///     })
    ///     .reflect::<Uuid>()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     root.to_value().unwrap(),
    ///     json!({
    ///         "$schema": "https://json-schema.org/draft-04/schema#",
    ///         "type": "string",
    ///         "pattern": "^[0-9a-f-]{36}$"
    ///     })
    /// );
    /// ```
    pub fn type_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> Option<Schema> + Send + Sync + 'static,
    {
        self.type_mapper = Some(Arc::new(mapper));
        self
    }

    /// Overrides definition names; `None` or an empty name keeps the default.
    pub fn type_namer<F>(mut self, namer: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> Option<String> + Send + Sync + 'static,
    {
        self.type_namer = Some(Arc::new(namer));
        self
    }

    /// Appends the fields `provider` returns to every struct, after its
    /// declared fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use typeschema::{describe, Field, Reflector};
    ///
    /// struct Audit;
    /// describe! {
    ///     Audit {
    ///         CreatedBy: String,
    ///     }
    /// }
    ///
    /// let root = Reflector::new()
    ///     .additional_fields(|descriptor| match descriptor.name() {
    ///         "Audit" => vec![Field::new::<i64>("Revision").tag(r#"json:"revision,omitempty""#)],
    ///         _ => Vec::new(),
    ///     })
    ///     .reflect::<Audit>()
    ///     .unwrap();
    ///
    /// let audit = root.definitions().get("Audit").unwrap();
    /// assert!(audit.property("revision").is_some());
    /// ```
    pub fn additional_fields<F>(mut self, provider: F) -> Self
    where
        F: Fn(&TypeDescriptor) -> Vec<Field> + Send + Sync + 'static,
    {
        self.additional_fields = Some(Arc::new(provider));
        self
    }

    /// Reflects `T` into a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectError::UnsupportedType`] if `T` reaches a function or
    /// channel type anywhere in its structure.
    pub fn reflect<T: Describe>(&self) -> Result<RootSchema, ReflectError> {
        self.reflect_descriptor(&T::describe())
    }

    /// Reflects an already built descriptor.
    pub fn reflect_descriptor(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Result<RootSchema, ReflectError> {
        Pass::new(self).run(descriptor)
    }
}

impl fmt::Debug for Reflector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reflector")
            .field("options", &self.options)
            .field("ignored_types", &self.ignored_types.len())
            .field("type_mapper", &self.type_mapper.is_some())
            .field("type_namer", &self.type_namer.is_some())
            .field("additional_fields", &self.additional_fields.is_some())
            .finish()
    }
}
