//! Locations inside the type graph being reflected.
//!
//! This module provides [`TypePath`] and [`PathSegment`], used to report where
//! in a nested type an unsupported kind was met (e.g. `Config.hooks[].run`).

use std::fmt::{self, Display};

/// A segment of a type path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named type the walk entered (`Config`)
    Type(String),
    /// A struct field (`hooks`)
    Field(String),
    /// The element type of a sequence (`[]`)
    Items,
    /// The value type of a map (`{}`)
    Values,
}

impl PathSegment {
    /// Creates a new type segment.
    pub fn type_name(name: impl Into<String>) -> Self {
        PathSegment::Type(name.into())
    }

    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }
}

/// A path from the root type to the type currently being reflected.
///
/// # Example
///
/// ```rust
/// use typeschema::TypePath;
///
/// let path = TypePath::root()
///     .push_type("Config")
///     .push_field("hooks")
///     .push_items()
///     .push_field("run");
///
/// assert_eq!(path.to_string(), "Config.hooks[].run");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypePath {
    segments: Vec<PathSegment>,
}

impl TypePath {
    /// Creates an empty path representing the root type.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a type segment appended.
    pub fn push_type(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Type(name.into()))
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path descending into sequence elements.
    pub fn push_items(&self) -> Self {
        self.push(PathSegment::Items)
    }

    /// Returns a new path descending into map values.
    pub fn push_values(&self) -> Self {
        self.push(PathSegment::Values)
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut written = false;
        for segment in &self.segments {
            match segment {
                // Only the outermost type is named; below it the fields say where we are.
                PathSegment::Type(_) if written => continue,
                PathSegment::Type(name) => write!(f, "{}", name)?,
                PathSegment::Field(name) if written => write!(f, ".{}", name)?,
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Items => write!(f, "[]")?,
                PathSegment::Values => write!(f, "{{}}")?,
            }
            written = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = TypePath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_type_then_field() {
        let path = TypePath::root().push_type("User").push_field("email");
        assert_eq!(path.to_string(), "User.email");
    }

    #[test]
    fn test_items_and_values() {
        let path = TypePath::root()
            .push_type("Index")
            .push_field("buckets")
            .push_values()
            .push_items();
        assert_eq!(path.to_string(), "Index.buckets{}[]");
    }

    #[test]
    fn test_nested_type_after_field_is_elided() {
        let path = TypePath::root()
            .push_type("Order")
            .push_field("customer")
            .push_type("Customer")
            .push_field("name");
        assert_eq!(path.to_string(), "Order.customer.name");
    }

    #[test]
    fn test_path_immutability() {
        let base = TypePath::root().push_type("Config");
        let path_a = base.push_field("a");
        let path_b = base.push_field("b");

        assert_eq!(base.to_string(), "Config");
        assert_eq!(path_a.to_string(), "Config.a");
        assert_eq!(path_b.to_string(), "Config.b");
    }

    #[test]
    fn test_last_segment() {
        let path = TypePath::root().push_type("Config").push_items();
        assert_eq!(path.last(), Some(&PathSegment::Items));
        assert_eq!(TypePath::root().last(), None);
    }
}
