//! The recursive walk from a type descriptor to a schema tree.

use std::any::TypeId;
use std::collections::HashSet;

use crate::annotate::apply_field_annotations;
use crate::definitions::Definitions;
use crate::describe::{Field, Kind, TypeDescriptor, WellKnown};
use crate::error::{ReflectError, UnsupportedKind};
use crate::path::{PathSegment, TypePath};
use crate::root::RootSchema;
use crate::schema::{Format, InstanceType, Schema};

use super::fields::FieldDisposition;
use super::Reflector;

const INTEGER_KEY_PATTERN: &str = "^[0-9]+$";
const ANY_KEY_PATTERN: &str = ".*";

/// State of one top-level reflection call.
pub(crate) struct Pass<'r> {
    reflector: &'r Reflector,
    definitions: Definitions,
    /// Named structs whose fields are still being walked.
    in_progress: HashSet<String>,
    /// Names some `$ref` node points at.
    referenced: HashSet<String>,
}

impl<'r> Pass<'r> {
    pub(crate) fn new(reflector: &'r Reflector) -> Self {
        Self {
            reflector,
            definitions: Definitions::new(),
            in_progress: HashSet::new(),
            referenced: HashSet::new(),
        }
    }

    pub(crate) fn run(mut self, descriptor: &TypeDescriptor) -> Result<RootSchema, ReflectError> {
        let reflector = self.reflector;
        let label = if descriptor.name().is_empty() {
            descriptor.rust_type()
        } else {
            descriptor.name()
        };
        let path = TypePath::root().push_type(label);

        let target = descriptor.deref();
        let expand = reflector.options.expanded_struct && matches!(target.kind(), Kind::Struct(_));
        let mut schema = if expand {
            let name = self.type_name(&target);
            let schema = self.build_struct(&target, &name, &path)?;
            if !name.is_empty() && !self.referenced.contains(&name) {
                self.definitions.remove(&name);
            }
            schema
        } else {
            self.reflect_type(descriptor, &path)?
        };

        let version = reflector.options.version;
        schema.version = version;
        Ok(RootSchema::new(schema, self.definitions, version))
    }

    /// Maps one type to a node, consulting the definitions table first.
    fn reflect_type(
        &mut self,
        descriptor: &TypeDescriptor,
        path: &TypePath,
    ) -> Result<Schema, ReflectError> {
        let name = self.type_name(descriptor);

        if !name.is_empty() {
            if let Some(existing) = self.definitions.get(&name) {
                if self.reflector.options.do_not_reference && !self.in_progress.contains(&name) {
                    return Ok(existing.clone());
                }
                return Ok(self.reference(&name));
            }
        }

        if let Some(mapper) = &self.reflector.type_mapper {
            if let Some(schema) = mapper(descriptor) {
                tracing::debug!(rust_type = descriptor.rust_type(), "type mapped by caller");
                return Ok(schema);
            }
        }

        if let Some(custom) = descriptor.custom_schema() {
            let schema = custom();
            return Ok(self.register(&name, schema));
        }

        if descriptor.is_protocol_enum() {
            return Ok(Schema {
                one_of: vec![
                    Schema::new(InstanceType::String),
                    Schema::new(InstanceType::Integer),
                ],
                ..Schema::default()
            });
        }

        let schema = match descriptor.kind() {
            Kind::Bool => Schema::new(InstanceType::Boolean),
            Kind::Integer(_) => Schema::new(InstanceType::Integer),
            Kind::Float(_) => Schema::new(InstanceType::Number),
            Kind::String => Schema::new(InstanceType::String),
            Kind::Interface => Schema::any(),
            Kind::WellKnown(well_known) => well_known_schema(*well_known),
            Kind::Pointer(inner) => return self.reflect_type(&inner(), path),
            Kind::Struct(_) => {
                if self.reflector.ignored_types.contains(&descriptor.id()) {
                    tracing::debug!(rust_type = descriptor.rust_type(), "type ignored");
                    return Ok(self.register(&name, Schema::object(true)));
                }
                let struct_path = match path.last() {
                    Some(PathSegment::Type(_)) => path.clone(),
                    _ if descriptor.name().is_empty() => path.clone(),
                    _ => path.push_type(descriptor.name()),
                };
                let schema = self.build_struct(descriptor, &name, &struct_path)?;
                if name.is_empty() {
                    schema
                } else {
                    self.reference_or_inline(&name, schema)
                }
            }
            Kind::Map { key, value } => {
                let values = self.reflect_type(&value(), &path.push_values())?;
                let mut schema = Schema::new(InstanceType::Object);
                if matches!(key().deref().kind(), Kind::Integer(_)) {
                    schema
                        .pattern_properties
                        .insert(INTEGER_KEY_PATTERN.to_string(), values);
                    schema.additional_properties = Some(false.into());
                } else {
                    schema
                        .pattern_properties
                        .insert(ANY_KEY_PATTERN.to_string(), values);
                }
                schema
            }
            Kind::Slice(element) => {
                let element = element();
                if matches!(element.kind(), Kind::Integer(kind) if kind.is_byte()) {
                    binary_string()
                } else {
                    self.sequence(&element, None, path)?
                }
            }
            Kind::Array(element, len) => self.sequence(&element(), Some(*len as u64), path)?,
            Kind::Function => {
                return Err(ReflectError::unsupported(
                    descriptor.rust_type(),
                    UnsupportedKind::Function,
                    path,
                ))
            }
            Kind::Channel => {
                return Err(ReflectError::unsupported(
                    descriptor.rust_type(),
                    UnsupportedKind::Channel,
                    path,
                ))
            }
        };
        Ok(schema)
    }

    fn sequence(
        &mut self,
        element: &TypeDescriptor,
        len: Option<u64>,
        path: &TypePath,
    ) -> Result<Schema, ReflectError> {
        let items = self.reflect_type(element, &path.push_items())?;
        Ok(Schema {
            items: Some(Box::new(items)),
            min_items: len,
            max_items: len,
            ..Schema::new(InstanceType::Array)
        })
    }

    /// Builds the object node of a struct, registering it under `name`
    /// while its fields are walked so that cycles resolve to `$ref`.
    fn build_struct(
        &mut self,
        descriptor: &TypeDescriptor,
        name: &str,
        path: &TypePath,
    ) -> Result<Schema, ReflectError> {
        let mut schema = Schema::object(self.reflector.options.allow_additional_properties);

        if name.is_empty() {
            self.reflect_fields(&mut schema, descriptor, path, &mut vec![descriptor.id()])?;
            return Ok(schema);
        }

        self.definitions.register(name, schema.clone());
        self.in_progress.insert(name.to_string());
        let walked = self.reflect_fields(&mut schema, descriptor, path, &mut vec![descriptor.id()]);
        self.in_progress.remove(name);
        walked?;

        tracing::debug!(name, "registered definition");
        self.definitions.register(name, schema.clone());
        Ok(schema)
    }

    /// Walks the fields of `descriptor` into `parent`. `embedding` holds the
    /// chain of types whose fields are currently being spliced.
    fn reflect_fields(
        &mut self,
        parent: &mut Schema,
        descriptor: &TypeDescriptor,
        path: &TypePath,
        embedding: &mut Vec<TypeId>,
    ) -> Result<(), ReflectError> {
        let mut fields: Vec<Field> = descriptor.fields().to_vec();
        if let Some(additional) = &self.reflector.additional_fields {
            fields.extend(additional(descriptor));
        }

        for field in &fields {
            match FieldDisposition::of(field, &self.reflector.options) {
                FieldDisposition::Skip => {
                    tracing::trace!(field = field.ident(), "skipping field");
                }
                FieldDisposition::Embed => {
                    let embedded = field.describe_type().deref();
                    if embedding.contains(&embedded.id()) {
                        tracing::trace!(field = field.ident(), "embedding cycle, already spliced");
                        continue;
                    }
                    embedding.push(embedded.id());
                    let spliced = self.reflect_fields(parent, &embedded, path, embedding);
                    embedding.pop();
                    spliced?;
                }
                FieldDisposition::Property {
                    name,
                    required,
                    nullable,
                } => {
                    tracing::trace!(field = field.ident(), property = %name, "reflecting field");
                    let field_path = path.push_field(&name);
                    let mut property = self.reflect_type(&field.describe_type(), &field_path)?;

                    if let Some(doc) = descriptor.field_docs().and_then(|docs| docs(field.ident())) {
                        property.description = Some(doc);
                    }
                    apply_field_annotations(
                        &mut property,
                        parent,
                        &name,
                        field.struct_tag(),
                        self.reflector.options.version,
                    );
                    if nullable {
                        property = property.nullable();
                    }

                    parent
                        .properties
                        .get_or_insert_with(Default::default)
                        .insert(name.clone(), property);
                    if required {
                        parent.required.push(name);
                    }
                }
            }
        }
        Ok(())
    }

    /// Places a finished node in the definitions table and returns what the
    /// referring site should contain. Unnamed nodes are returned as is.
    fn register(&mut self, name: &str, schema: Schema) -> Schema {
        if name.is_empty() {
            return schema;
        }
        tracing::debug!(name, "registered definition");
        self.definitions.register(name, schema.clone());
        self.reference_or_inline(name, schema)
    }

    fn reference_or_inline(&mut self, name: &str, schema: Schema) -> Schema {
        if self.reflector.options.do_not_reference {
            schema
        } else {
            self.reference(name)
        }
    }

    fn reference(&mut self, name: &str) -> Schema {
        self.referenced.insert(name.to_string());
        let pointer = self.reflector.options.version.definitions_pointer();
        Schema::reference(format!("{pointer}{}", escape_pointer_token(name)))
    }

    fn type_name(&self, descriptor: &TypeDescriptor) -> String {
        if let Some(namer) = &self.reflector.type_namer {
            if let Some(name) = namer(descriptor).filter(|name| !name.is_empty()) {
                return name;
            }
        }
        if descriptor.name().is_empty() {
            return String::new();
        }
        if self.reflector.options.fully_qualify_type_names {
            descriptor.qualified_name()
        } else {
            descriptor.name().to_string()
        }
    }
}

fn well_known_schema(well_known: WellKnown) -> Schema {
    let string = |format| Schema::new(InstanceType::String).with_format(format);
    match well_known {
        WellKnown::Timestamp => string(Format::DateTime),
        WellKnown::IpAddr | WellKnown::Ipv4Addr => string(Format::Ipv4),
        WellKnown::Ipv6Addr => string(Format::Ipv6),
        WellKnown::Uri => string(Format::Uri),
        WellKnown::RawJson => Schema::any(),
    }
}

/// Byte slices are sent as base64 text in every draft.
fn binary_string() -> Schema {
    Schema {
        media: Some(Box::new(Schema {
            binary_encoding: Some("base64".to_string()),
            ..Schema::default()
        })),
        ..Schema::new(InstanceType::String)
    }
}

fn escape_pointer_token(name: &str) -> String {
    name.replace('~', "~0").replace('/', "~1")
}
