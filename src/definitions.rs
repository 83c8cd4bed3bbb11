//! The definitions table accumulated during one reflection pass.
//!
//! This module provides [`Definitions`], which maps a computed type name to
//! the schema node of that type. The walker consults it to decide between
//! inlining a type and pointing at it with `$ref`, which is also how
//! self-referential types terminate.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::Schema;

/// Named schema nodes, iterated in name order for stable output.
///
/// Registering a name twice replaces the earlier node; distinct types that
/// share a bare name therefore overwrite each other unless the reflector is
/// configured with fully qualified names.
///
/// # Example
///
/// ```rust
/// use typeschema::Definitions;
/// use typeschema::schema::{InstanceType, Schema};
///
/// let mut definitions = Definitions::new();
/// definitions.register("Email", Schema::new(InstanceType::String));
/// definitions.register("Address", Schema::object(false));
///
/// assert!(definitions.contains("Email"));
/// let names: Vec<_> = definitions.names().collect();
/// assert_eq!(names, vec!["Address", "Email"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Definitions {
    schemas: BTreeMap<String, Schema>,
}

impl Definitions {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `schema` under `name`, returning the node it replaced.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> Option<Schema> {
        self.schemas.insert(name.into(), schema)
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Schema> {
        self.schemas.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Schema> {
        self.schemas.remove(name)
    }

    /// Returns the registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl<'a> IntoIterator for &'a Definitions {
    type Item = (&'a String, &'a Schema);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Schema>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InstanceType;
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let mut definitions = Definitions::new();
        assert!(definitions.is_empty());

        assert!(definitions
            .register("Email", Schema::new(InstanceType::String))
            .is_none());

        assert_eq!(definitions.len(), 1);
        assert_eq!(
            definitions.get("Email").and_then(|s| s.instance_type),
            Some(InstanceType::String)
        );
        assert!(definitions.get("Missing").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut definitions = Definitions::new();
        definitions.register("Node", Schema::default());
        let previous = definitions.register("Node", Schema::object(false));

        assert_eq!(previous, Some(Schema::default()));
        assert_eq!(definitions.len(), 1);
        assert!(definitions.get("Node").unwrap().properties.is_some());
    }

    #[test]
    fn test_remove() {
        let mut definitions = Definitions::new();
        definitions.register("A", Schema::default());
        assert!(definitions.remove("A").is_some());
        assert!(!definitions.contains("A"));
    }

    #[test]
    fn test_serializes_sorted() {
        let mut definitions = Definitions::new();
        definitions.register("b", Schema::new(InstanceType::Integer));
        definitions.register("a", Schema::new(InstanceType::String));

        assert_eq!(
            serde_json::to_string(&definitions).unwrap(),
            r#"{"a":{"type":"string"},"b":{"type":"integer"}}"#
        );
        assert_eq!(
            serde_json::to_value(&definitions).unwrap(),
            json!({"a": {"type": "string"}, "b": {"type": "integer"}})
        );
    }
}
