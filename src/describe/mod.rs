//! Type descriptors.
//!
//! The reflector never inspects values; it walks [`TypeDescriptor`]s, which
//! each type produces through the [`Describe`] trait. A descriptor states the
//! type's name, its [`Kind`], and for structs the ordered list of [`Field`]s
//! with their tag strings. Child types are referenced through plain function
//! pointers and only described on demand, so a type may refer to itself.
//!
//! Struct descriptors are usually generated with the [`describe!`](crate::describe!)
//! macro:
//!
//! ```rust
//! use typeschema::{describe, Describe, Kind};
//!
//! struct Node;
//!
//! describe! {
//!     Node {
//!         Value: i64,
//!         Children: Vec<Node> => r#"json:"children,omitempty""#,
//!     }
//! }
//!
//! let descriptor = Node::describe();
//! assert_eq!(descriptor.name(), "Node");
//! assert_eq!(descriptor.fields().len(), 2);
//! assert!(matches!(descriptor.fields()[1].describe_type().kind(), Kind::Slice(_)));
//! ```

mod impls;
mod macros;
mod struct_tag;

use std::any::TypeId;

use crate::schema::Schema;

pub use struct_tag::StructTag;

/// Produces the descriptor of a child type on demand.
pub type DescribeFn = fn() -> TypeDescriptor;

/// A type that can state its own shape.
pub trait Describe: 'static {
    fn describe() -> TypeDescriptor;
}

/// The width and signedness of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
}

impl IntegerKind {
    /// Returns true for the single-byte unsigned integer.
    pub fn is_byte(&self) -> bool {
        matches!(self, IntegerKind::U8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

/// Types with a fixed schema regardless of their structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// A point in time; `{"type": "string", "format": "date-time"}`.
    Timestamp,
    /// An IP address of either family; rendered with the `ipv4` format.
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    /// A URI; `{"type": "string", "format": "uri"}`.
    Uri,
    /// Pre-encoded JSON of any shape.
    RawJson,
}

/// The structural kind of a type.
#[derive(Debug, Clone)]
pub enum Kind {
    Bool,
    Integer(IntegerKind),
    Float(FloatKind),
    String,
    /// A record with named fields, in declaration order.
    Struct(Vec<Field>),
    /// A growable sequence.
    Slice(DescribeFn),
    /// A fixed-length sequence.
    Array(DescribeFn, usize),
    Map {
        key: DescribeFn,
        value: DescribeFn,
    },
    /// An optional or indirect reference to another type.
    Pointer(DescribeFn),
    /// Any JSON value.
    Interface,
    WellKnown(WellKnown),
    Function,
    Channel,
}

/// The shape of one type, as seen by the reflector.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    id: TypeId,
    rust_type: &'static str,
    name: String,
    path: String,
    kind: Kind,
    custom_schema: Option<fn() -> Schema>,
    protocol_enum: bool,
    field_docs: Option<fn(&str) -> Option<String>>,
}

impl TypeDescriptor {
    /// Creates a descriptor for `T` with the given bare name.
    ///
    /// The declaration path is taken from `T`'s module path.
    pub fn new<T: ?Sized + 'static>(name: impl Into<String>, kind: Kind) -> Self {
        let rust_type = std::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            rust_type,
            name: name.into(),
            path: module_path_of(rust_type).to_string(),
            kind,
            custom_schema: None,
            protocol_enum: false,
            field_docs: None,
        }
    }

    /// Creates a descriptor for an unnamed type such as `Vec<T>` or `i64`.
    ///
    /// Unnamed types are never placed in the definitions table.
    pub fn anonymous<T: ?Sized + 'static>(kind: Kind) -> Self {
        Self::new::<T>(String::new(), kind)
    }

    /// Creates a struct descriptor with no fields yet.
    pub fn structure<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new::<T>(name, Kind::Struct(Vec::new()))
    }

    /// Creates a descriptor for a type with a fixed well-known schema.
    pub fn well_known<T: ?Sized + 'static>(name: impl Into<String>, well_known: WellKnown) -> Self {
        Self::new::<T>(name, Kind::WellKnown(well_known))
    }

    /// Returns the descriptor of `T`.
    pub fn of<T: Describe>() -> Self {
        T::describe()
    }

    /// Appends a field. Has no effect unless this is a struct descriptor.
    pub fn field(mut self, field: Field) -> Self {
        if let Kind::Struct(fields) = &mut self.kind {
            fields.push(field);
        }
        self
    }

    /// Overrides the declaration path used for fully qualified names.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Lets the type produce its own schema node instead of being walked.
    pub fn with_custom_schema(mut self, schema: fn() -> Schema) -> Self {
        self.custom_schema = Some(schema);
        self
    }

    /// Marks the type as an enumeration that travels either as its textual
    /// name or as its numeric value.
    pub fn protocol_enum(mut self) -> Self {
        self.protocol_enum = true;
        self
    }

    /// Supplies per-field documentation, looked up by field identifier.
    pub fn with_field_docs(mut self, docs: fn(&str) -> Option<String>) -> Self {
        self.field_docs = Some(docs);
        self
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The Rust type name, as reported by [`std::any::type_name`].
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// The bare type name; empty for unnamed types.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaration path (module path) of the type.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declaration path joined with the bare name.
    pub fn qualified_name(&self) -> String {
        if self.path.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.path, self.name)
        }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// The declared fields; empty unless this is a struct descriptor.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            Kind::Struct(fields) => fields,
            _ => &[],
        }
    }

    pub fn custom_schema(&self) -> Option<fn() -> Schema> {
        self.custom_schema
    }

    pub fn is_protocol_enum(&self) -> bool {
        self.protocol_enum
    }

    pub fn field_docs(&self) -> Option<fn(&str) -> Option<String>> {
        self.field_docs
    }

    /// Follows pointer kinds down to the first non-pointer type.
    pub fn deref(&self) -> TypeDescriptor {
        let mut current = self.clone();
        while let Kind::Pointer(inner) = current.kind {
            current = inner();
        }
        current
    }
}

/// One declared field of a struct.
#[derive(Debug, Clone)]
pub struct Field {
    ident: String,
    ty: DescribeFn,
    tag: StructTag,
    anonymous: bool,
    exported: bool,
}

impl Field {
    /// Creates an exported, non-embedded field of type `T` with no tag.
    pub fn new<T: Describe>(ident: impl Into<String>) -> Self {
        Self::with_type(ident, T::describe)
    }

    /// Creates a field whose type is produced by `ty`.
    pub fn with_type(ident: impl Into<String>, ty: DescribeFn) -> Self {
        Self {
            ident: ident.into(),
            ty,
            tag: StructTag::default(),
            anonymous: false,
            exported: true,
        }
    }

    /// Attaches the field's tag string.
    pub fn tag(mut self, tag: impl Into<StructTag>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Marks the field as embedded: its identifier is its type's name and,
    /// unless tagged otherwise, its fields are spliced into the parent.
    pub fn embedded(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// Marks the field as not exported; such fields never appear in the schema
    /// unless embedded.
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn struct_tag(&self) -> &StructTag {
        &self.tag
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Describes the field's type.
    pub fn describe_type(&self) -> TypeDescriptor {
        (self.ty)()
    }
}

/// Strips generic arguments and the final segment from a Rust type name.
fn module_path_of(rust_type: &str) -> &str {
    let base = rust_type.split('<').next().unwrap_or(rust_type);
    base.rsplit_once("::").map_or("", |(path, _)| path)
}
