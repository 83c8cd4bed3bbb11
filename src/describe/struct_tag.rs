//! Field tag strings.
//!
//! A tag is a space separated list of `key:"value"` pairs, for example
//! `json:"age,omitempty" jsonschema:"minimum=0"`. Values are double-quoted
//! and may contain backslash escapes.

use std::fmt::{self, Display};

/// The tag string attached to a struct field.
///
/// # Example
///
/// ```rust
/// use typeschema::StructTag;
///
/// let tag = StructTag::new(r#"json:"age,omitempty" jsonschema:"minimum=0""#);
///
/// assert_eq!(tag.lookup("json"), Some("age,omitempty".to_string()));
/// assert_eq!(tag.get("jsonschema"), "minimum=0");
/// assert_eq!(tag.lookup("yaml"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag(String);

impl StructTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// Scanning stops at the first malformed pair, so keys after it are
    /// reported as absent.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut rest = self.0.as_str();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                return None;
            }

            let name_len = rest
                .char_indices()
                .find(|&(_, c)| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
                .map_or(rest.len(), |(i, _)| i);
            if name_len == 0 || !rest[name_len..].starts_with(":\"") {
                return None;
            }
            let name = &rest[..name_len];
            rest = &rest[name_len + 2..];

            let (quoted, after) = split_quoted(rest)?;
            rest = after;
            if name == key {
                return unquote(quoted);
            }
        }
    }

    /// Returns the value stored under `key`, or an empty string.
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StructTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for StructTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Splits `input` (positioned just after an opening quote) into the raw
/// quoted body and the text following the closing quote.
fn split_quoted(input: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some((&input[..i], &input[i + 1..])),
            _ => {}
        }
    }
    None
}

fn unquote(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            other @ ('\\' | '"' | '\'') => out.push(other),
            _ => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_multiple_keys() {
        let tag = StructTag::new(r#"json:"name" yaml:"nm,omitempty" jsonschema:"title=Name""#);
        assert_eq!(tag.lookup("json"), Some("name".into()));
        assert_eq!(tag.lookup("yaml"), Some("nm,omitempty".into()));
        assert_eq!(tag.lookup("jsonschema"), Some("title=Name".into()));
    }

    #[test]
    fn test_empty_value_is_present() {
        let tag = StructTag::new(r#"json:"""#);
        assert_eq!(tag.lookup("json"), Some(String::new()));
    }

    #[test]
    fn test_missing_key() {
        let tag = StructTag::new(r#"json:"name""#);
        assert_eq!(tag.lookup("yaml"), None);
        assert_eq!(tag.get("yaml"), "");
        assert_eq!(StructTag::default().lookup("json"), None);
    }

    #[test]
    fn test_escaped_quote_in_value() {
        let tag = StructTag::new(r#"jsonschema_description:"say \"hi\"" json:"greeting""#);
        assert_eq!(tag.get("jsonschema_description"), "say \"hi\"");
        assert_eq!(tag.get("json"), "greeting");
    }

    #[test]
    fn test_extra_spaces_between_pairs() {
        let tag = StructTag::new(r#"  json:"a"    yaml:"b"  "#);
        assert_eq!(tag.get("yaml"), "b");
    }

    #[test]
    fn test_malformed_pair_hides_later_keys() {
        let tag = StructTag::new(r#"json:"a" broken yaml:"b""#);
        assert_eq!(tag.lookup("json"), Some("a".into()));
        assert_eq!(tag.lookup("yaml"), None);
    }

    #[test]
    fn test_unterminated_value() {
        let tag = StructTag::new(r#"json:"abc"#);
        assert_eq!(tag.lookup("json"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let tag = StructTag::new(r#"json:"first" json:"second""#);
        assert_eq!(tag.get("json"), "first");
    }
}
