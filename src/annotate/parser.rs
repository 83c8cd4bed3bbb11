//! Tokenizer for the annotation micro-language.
//!
//! An annotation string is a comma separated list of segments. A segment of
//! the form `key=value` (exactly one `=`) is a pair; a segment without `=` is
//! a bare flag such as `required` or `nullable`. Segments with more than one
//! `=` are malformed and dropped, as are empty segments.

use std::sync::LazyLock;

use regex::Regex;

static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]*)=([^=]*)$").expect("pair pattern is valid"));

/// One parsed segment of an annotation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Pair { key: &'a str, value: &'a str },
    Flag(&'a str),
}

/// A parsed annotation string.
///
/// # Example
///
/// ```rust
/// use typeschema::annotate::{Annotations, Token};
///
/// let annotations = Annotations::parse("minimum=0,required,a=b=c");
///
/// assert_eq!(
///     annotations.tokens(),
///     &[Token::Pair { key: "minimum", value: "0" }, Token::Flag("required")]
/// );
/// assert!(annotations.has_flag("required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations<'a> {
    tokens: Vec<Token<'a>>,
    ignored: bool,
}

impl<'a> Annotations<'a> {
    pub fn parse(input: &'a str) -> Self {
        let ignored = input.split(',').next() == Some("-");
        let tokens = input
            .split(',')
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| {
                if !segment.contains('=') {
                    return Some(Token::Flag(segment));
                }
                match PAIR.captures(segment) {
                    Some(captures) => {
                        let key = captures.get(1).map_or("", |m| m.as_str());
                        let value = captures.get(2).map_or("", |m| m.as_str());
                        Some(Token::Pair { key, value })
                    }
                    None => {
                        tracing::trace!(segment, "dropping malformed annotation segment");
                        None
                    }
                }
            })
            .collect();
        Self { tokens, ignored }
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    /// Iterates over the `key=value` pairs in order.
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.tokens.iter().filter_map(|token| match *token {
            Token::Pair { key, value } => Some((key, value)),
            Token::Flag(_) => None,
        })
    }

    /// Returns true if the bare flag appears anywhere in the string.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Flag(f) if *f == flag))
    }

    /// Returns true if the string starts with the `-` segment, which removes
    /// the field from the schema.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
