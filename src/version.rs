//! JSON Schema draft identifiers.
//!
//! This module provides [`Version`], the closed set of drafts this crate can
//! target, together with the bidirectional mapping to their canonical `$schema`
//! URIs and the handful of keyword spellings that differ between drafts.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DRAFT04_URI: &str = "https://json-schema.org/draft-04/schema#";
const DRAFT07_URI: &str = "https://json-schema.org/draft-07/schema#";
const DRAFT201909_URI: &str = "https://json-schema.org/draft/2019-09/schema#";
const DRAFT202012_URI: &str = "https://json-schema.org/draft/2020-12/schema#";

/// A JSON Schema draft.
///
/// `Version::Unset` means "no `$schema` keyword"; for keyword spelling it
/// behaves like draft-04.
///
/// # Example
///
/// ```rust
/// use typeschema::Version;
///
/// assert_eq!(Version::Draft07.uri(), Some("https://json-schema.org/draft-07/schema#"));
/// assert_eq!(Version::from_uri("https://json-schema.org/draft/2020-12/schema#"), Version::Draft202012);
///
/// // Unknown URIs fall back to draft-04
/// assert_eq!(Version::from_uri("https://example.com/schema"), Version::Draft04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    /// No draft declared.
    #[default]
    Unset,
    /// Draft-04.
    Draft04,
    /// Draft-07.
    Draft07,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    Draft202012,
}

impl Version {
    /// All declarable drafts, oldest first.
    pub const ALL: [Version; 4] = [
        Version::Draft04,
        Version::Draft07,
        Version::Draft201909,
        Version::Draft202012,
    ];

    /// Returns the canonical `$schema` URI, or `None` for [`Version::Unset`].
    pub fn uri(&self) -> Option<&'static str> {
        match self {
            Version::Unset => None,
            Version::Draft04 => Some(DRAFT04_URI),
            Version::Draft07 => Some(DRAFT07_URI),
            Version::Draft201909 => Some(DRAFT201909_URI),
            Version::Draft202012 => Some(DRAFT202012_URI),
        }
    }

    /// Resolves a `$schema` URI, falling back to draft-04 when the URI is not
    /// one of the known drafts.
    pub fn from_uri(uri: &str) -> Version {
        match uri {
            DRAFT04_URI => Version::Draft04,
            DRAFT07_URI => Version::Draft07,
            DRAFT201909_URI => Version::Draft201909,
            DRAFT202012_URI => Version::Draft202012,
            _ => Version::Draft04,
        }
    }

    /// Returns true for [`Version::Unset`].
    pub fn is_unset(&self) -> bool {
        matches!(self, Version::Unset)
    }

    /// The root-level key holding the definitions table.
    pub fn definitions_key(&self) -> &'static str {
        match self {
            Version::Unset | Version::Draft04 | Version::Draft07 => "definitions",
            Version::Draft201909 | Version::Draft202012 => "$defs",
        }
    }

    /// The JSON pointer prefix used by `$ref` nodes pointing into the
    /// definitions table.
    pub fn definitions_pointer(&self) -> &'static str {
        match self {
            Version::Unset | Version::Draft04 | Version::Draft07 => "#/definitions/",
            Version::Draft201909 | Version::Draft202012 => "#/$defs/",
        }
    }

    /// Draft-04 spells `exclusiveMinimum`/`exclusiveMaximum` as boolean
    /// modifiers of `minimum`/`maximum`; later drafts use numbers.
    pub fn exclusive_bounds_are_flags(&self) -> bool {
        matches!(self, Version::Unset | Version::Draft04)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri().unwrap_or(""))
    }
}

impl FromStr for Version {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Version::from_uri(s))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.uri().unwrap_or(""))
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        if uri.is_empty() {
            return Ok(Version::Unset);
        }
        Ok(Version::from_uri(&uri))
    }
}
