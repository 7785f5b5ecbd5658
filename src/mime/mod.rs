//! MIME type value model.
//!
//! A [`Mime`] is an immutable `type/subtype; key=value` triple. It can be
//! parsed from and serialized to its canonical string form, compared for
//! equality, and tested for wildcard-aware inclusion:
//!
//! ```rust
//! use mimesniff::Mime;
//!
//! let accepted = Mime::parse("text/*").unwrap();
//! let plain = Mime::parse("text / plain; CHARSET=\"utf-8\"").unwrap();
//!
//! assert_eq!(plain.to_string(), "text/plain; charset=utf-8");
//! assert!(accepted.includes(&plain));
//! assert!(!plain.includes(&accepted));
//! ```
//!
//! Detection entry points live here as well: [`Mime::detect`] runs the
//! default [`MimeDetection`] engine and returns deduplicated values.

pub mod parser;
pub mod subtypes;

use crate::common::unique_by;
use crate::definitions::SignatureDefinition;
use crate::detection::MimeDetection;
use crate::errors::MimeParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use parser::{is_token, parse_mime, SUPPORTED_CHARS};
pub use subtypes::{is_known_subtype, known_subtypes, KNOWN_SUBTYPES};

/// Wildcard marker accepted for type and subtype.
pub const WILDCARD: &str = "*";

/// Options for [`Mime::equals_with`] and [`Mime::includes_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// Whether parameters take part in the comparison (default: true)
    pub check_parameters: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            check_parameters: true,
        }
    }
}

impl CompareOptions {
    /// Compare type and subtype only.
    pub fn ignore_parameters() -> Self {
        Self {
            check_parameters: false,
        }
    }
}

/// MIME parameters with lowercase keys.
///
/// Keeps insertion order for serialization; a repeated key replaces the
/// earlier value in place. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, lowercasing the key.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref().to_lowercase();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether every parameter here appears with the same value in `other`.
    pub fn is_subset_of(&self, other: &Parameters) -> bool {
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset_of(other)
    }
}

impl Eq for Parameters {}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Parameters::new();
        for (k, v) in iter {
            parameters.insert(k, v);
        }
        parameters
    }
}

/// A MIME type with its type, subtype and parameters.
#[derive(Debug, Clone)]
pub struct Mime {
    type_: String,
    subtype: String,
    parameters: Parameters,
}

impl Default for Mime {
    /// `*/*` without parameters.
    fn default() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }
}

impl Mime {
    /// Create a MIME type without parameters.
    ///
    /// No validation is performed; use [`Mime::parse`] for untrusted input.
    pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self::from_parts(type_.into(), subtype.into(), Parameters::new())
    }

    pub(crate) fn from_parts(type_: String, subtype: String, parameters: Parameters) -> Self {
        Self {
            type_,
            subtype,
            parameters,
        }
    }

    /// Add a parameter, lowercasing its key.
    #[must_use]
    pub fn with_parameter(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    /// Primary category, e.g. `text` or `image`.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// Specific format within the type, e.g. `plain` or `jpeg`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Exact equality, parameters included.
    pub fn equals(&self, other: &Mime) -> bool {
        self.equals_with(other, CompareOptions::default())
    }

    /// Exact equality of type and subtype; wildcards are not expanded.
    pub fn equals_with(&self, other: &Mime, options: CompareOptions) -> bool {
        self.type_ == other.type_
            && self.subtype == other.subtype
            && (!options.check_parameters || self.parameters == other.parameters)
    }

    /// Whether this (possibly wildcarded) type accepts `other`.
    pub fn includes(&self, other: &Mime) -> bool {
        self.includes_with(other, CompareOptions::default())
    }

    /// Wildcard-aware inclusion.
    ///
    /// Type and subtype match when this side is `*` or both are equal. With
    /// `check_parameters`, every parameter of this value must appear on
    /// `other` with the same value; extra parameters on `other` are ignored.
    pub fn includes_with(&self, other: &Mime, options: CompareOptions) -> bool {
        (self.type_ == WILDCARD || self.type_ == other.type_)
            && (self.subtype == WILDCARD || self.subtype == other.subtype)
            && (!options.check_parameters || self.parameters.is_subset_of(&other.parameters))
    }

    /// Whether any of `sources` includes any of `targets`.
    ///
    /// ```rust
    /// use mimesniff::{CompareOptions, Mime};
    ///
    /// let supported = [Mime::parse("image/*").unwrap()];
    /// let uploaded = [Mime::parse("image/png").unwrap()];
    /// assert!(Mime::includes_any(&supported, &uploaded, CompareOptions::default()));
    /// ```
    pub fn includes_any(sources: &[Mime], targets: &[Mime], options: CompareOptions) -> bool {
        sources.iter().any(|source| {
            targets
                .iter()
                .any(|target| source.includes_with(target, options))
        })
    }

    /// Parse a `type/subtype; key=value` string.
    pub fn parse(expression: &str) -> Result<Mime, MimeParseError> {
        parse_mime(expression)
    }

    /// Canonical form of a MIME type string.
    ///
    /// ```rust
    /// use mimesniff::Mime;
    ///
    /// let normalized = Mime::normalize("text / plain;  charset =\"utf-8\"").unwrap();
    /// assert_eq!(normalized, "text/plain; charset=utf-8");
    /// ```
    pub fn normalize(expression: &str) -> Result<String, MimeParseError> {
        Ok(parse_mime(expression)?.to_string())
    }

    /// Detect MIME types of `buffer` with the built-in definitions.
    ///
    /// Returns every type tied at the best priority, deduplicated.
    pub fn detect(buffer: &[u8]) -> Vec<Mime> {
        Self::detect_with(buffer, &MimeDetection::new())
    }

    /// Detect MIME types of `buffer` with a caller supplied engine.
    pub fn detect_with(buffer: &[u8], detection: &MimeDetection) -> Vec<Mime> {
        let mimes = detection
            .detect(buffer)
            .iter()
            .map(Mime::from)
            .collect::<Vec<_>>();
        unique_by(mimes, |mime| mime.to_string())
    }

    /// Types considered by automatic detection with the built-in definitions.
    pub fn known_types() -> Vec<Mime> {
        MimeDetection::new().known_types()
    }
}

impl From<&SignatureDefinition> for Mime {
    fn from(definition: &SignatureDefinition) -> Self {
        Mime::new(definition.mime_type.clone(), definition.subtype.clone())
    }
}

impl PartialEq for Mime {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Mime {}

impl fmt::Display for Mime {
    /// `type/subtype` followed by `; key=value` per parameter, never quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (key, value) in self.parameters.iter() {
            write!(f, "; {}={}", key, value)?;
        }
        Ok(())
    }
}

impl FromStr for Mime {
    type Err = MimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mime(s)
    }
}

impl TryFrom<&str> for Mime {
    type Error = MimeParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_mime(value)
    }
}

impl Serialize for Mime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Mime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_mime(&raw).map_err(serde::de::Error::custom)
    }
}
