//! The open extension bag carried by every schema node.
//!
//! Entries are serialized at the same JSON level as the node's structured
//! keywords, after them, in insertion order.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Keys whose first value is stored as an integer rather than text.
///
/// `minimum` is also a structured keyword; an extension entry with that key
/// is emitted next to it unchanged.
const FORCED_INTEGER_KEYS: &[&str] = &["minimum"];

/// A value stored in the extension bag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtraValue {
    Text(String),
    List(Vec<String>),
    Integer(i64),
}

/// Free-form keywords attached to a schema node.
///
/// # Example
///
/// ```rust
/// use typeschema::schema::{ExtraValue, Extras};
///
/// let mut extras = Extras::new();
/// extras.set("x-group", "a");
/// extras.set("x-group", "b");
/// extras.set("x-group", "c");
///
/// assert_eq!(
///     extras.get("x-group"),
///     Some(&ExtraValue::List(vec!["a".into(), "b".into(), "c".into()]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras {
    entries: IndexMap<String, ExtraValue>,
}

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` under `key`, merging with any value already present:
    ///
    /// | existing      | result                                |
    /// |---------------|---------------------------------------|
    /// | none          | text (integer for forced-integer keys)|
    /// | text          | two-element list `[old, new]`         |
    /// | list          | list with `new` appended              |
    /// | integer       | `new` parsed as integer (0 if invalid)|
    pub fn set(&mut self, key: &str, value: &str) {
        let Some(existing) = self.entries.get_mut(key) else {
            let first = if FORCED_INTEGER_KEYS.contains(&key) {
                ExtraValue::Integer(parse_integer(value))
            } else {
                ExtraValue::Text(value.to_string())
            };
            self.entries.insert(key.to_string(), first);
            return;
        };

        match existing {
            ExtraValue::Text(old) => {
                let old = std::mem::take(old);
                *existing = ExtraValue::List(vec![old, value.to_string()]);
            }
            ExtraValue::List(values) => values.push(value.to_string()),
            ExtraValue::Integer(number) => *number = parse_integer(value),
        }
    }

    /// Stores `value` under `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: ExtraValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Extras {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn parse_integer(value: &str) -> i64 {
    value.parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_value_is_text() {
        let mut extras = Extras::new();
        extras.set("x-order", "1");
        assert_eq!(extras.get("x-order"), Some(&ExtraValue::Text("1".into())));
    }

    #[test]
    fn test_repeated_key_promotes_to_list() {
        let mut extras = Extras::new();
        extras.set("tag", "a");
        extras.set("tag", "b");
        assert_eq!(
            extras.get("tag"),
            Some(&ExtraValue::List(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn test_minimum_is_forced_integer() {
        let mut extras = Extras::new();
        extras.set("minimum", "5");
        assert_eq!(extras.get("minimum"), Some(&ExtraValue::Integer(5)));

        // integers are overwritten, not accumulated
        extras.set("minimum", "7");
        assert_eq!(extras.get("minimum"), Some(&ExtraValue::Integer(7)));

        extras.set("minimum", "seven");
        assert_eq!(extras.get("minimum"), Some(&ExtraValue::Integer(0)));
    }

    #[test]
    fn test_merge_keeps_key_position() {
        let mut extras = Extras::new();
        extras.set("a", "1");
        extras.set("b", "2");
        extras.set("a", "3");

        let keys: Vec<_> = extras.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut extras = Extras::new();
        extras.set("x-name", "a");
        extras.set("minimum", "3");
        extras.set("x-list", "a");
        extras.set("x-list", "b");

        assert_eq!(
            serde_json::to_value(&extras).unwrap(),
            json!({"x-name": "a", "minimum": 3, "x-list": ["a", "b"]})
        );
    }
}
