//! Signature definitions: how to recognize one content type.
//!
//! A [`SignatureDefinition`] asserts a `type/subtype` classification and
//! carries up to three independent match facets:
//!
//! - **magic**: a [`ByteSignature`] anchored at offset 0
//! - **members**: paths that must exist when the buffer is opened as a zip archive
//! - **pattern**: a regex tested against the text-decoded buffer prefix
//!
//! A definition without any facet is still listed as a known type but never
//! matches.

pub mod builtin;

use regex::Regex;
use std::fmt;

pub use builtin::{builtin_definitions, BUFFER_CHECK_SIZE};

/// One position of a byte signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagicByte {
    /// The buffer byte must equal this value
    Byte(u8),
    /// Any byte matches
    Any,
}

impl MagicByte {
    pub fn matches(&self, byte: u8) -> bool {
        match self {
            MagicByte::Byte(expected) => *expected == byte,
            MagicByte::Any => true,
        }
    }
}

impl From<u8> for MagicByte {
    fn from(byte: u8) -> Self {
        MagicByte::Byte(byte)
    }
}

impl fmt::Display for MagicByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagicByte::Byte(b) => write!(f, "{:02X}", b),
            MagicByte::Any => f.write_str("??"),
        }
    }
}

/// Byte-or-wildcard sequences matched at offset 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteSignature {
    /// One sequence
    Single(Vec<MagicByte>),
    /// Alternative sequences; any one matching is enough
    Alternatives(Vec<Vec<MagicByte>>),
}

impl ByteSignature {
    /// A single sequence of literal bytes.
    pub fn bytes(bytes: &[u8]) -> Self {
        ByteSignature::Single(literal(bytes))
    }

    /// The sequences to try, in declaration order.
    pub fn sequences(&self) -> Vec<&[MagicByte]> {
        match self {
            ByteSignature::Single(sequence) => vec![sequence.as_slice()],
            ByteSignature::Alternatives(sequences) => {
                sequences.iter().map(Vec::as_slice).collect()
            }
        }
    }

    /// Whether some sequence is empty or there are no alternatives at all.
    pub fn has_empty_sequence(&self) -> bool {
        match self {
            ByteSignature::Single(sequence) => sequence.is_empty(),
            ByteSignature::Alternatives(sequences) => {
                sequences.is_empty() || sequences.iter().any(Vec::is_empty)
            }
        }
    }
}

/// Literal bytes as a magic sequence.
pub fn literal(bytes: &[u8]) -> Vec<MagicByte> {
    bytes.iter().copied().map(MagicByte::Byte).collect()
}

/// A registry entry describing how to recognize one content type.
#[derive(Debug, Clone)]
pub struct SignatureDefinition {
    /// Opaque label; several definitions may share one
    pub id: Option<String>,
    pub mime_type: String,
    pub subtype: String,
    pub magic: Option<ByteSignature>,
    /// Member paths required inside a zip container
    pub members: Option<Vec<String>>,
    /// Tested against the decoded first [`BUFFER_CHECK_SIZE`] bytes
    pub pattern: Option<Regex>,
}

impl SignatureDefinition {
    /// A definition with no facets; add them with the `with_*` builders.
    pub fn new(mime_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            id: None,
            mime_type: mime_type.into(),
            subtype: subtype.into(),
            magic: None,
            members: None,
            pattern: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_magic(mut self, magic: ByteSignature) -> Self {
        self.magic = Some(magic);
        self
    }

    #[must_use]
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = Some(members.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Whether at least one facet is declared.
    pub fn has_facets(&self) -> bool {
        self.magic.is_some() || self.members.is_some() || self.pattern.is_some()
    }

    /// `id`, or `type/subtype` for anonymous definitions.
    pub fn label(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.mime_type, self.subtype))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_byte_matches() {
        assert!(MagicByte::Byte(0x50).matches(0x50));
        assert!(!MagicByte::Byte(0x50).matches(0x51));
        assert!(MagicByte::Any.matches(0x00));
        assert_eq!(MagicByte::Byte(0x0a).to_string(), "0A");
        assert_eq!(MagicByte::Any.to_string(), "??");
    }

    #[test]
    fn test_sequences_of_single_and_alternatives() {
        let single = ByteSignature::bytes(&[1, 2]);
        assert_eq!(single.sequences().len(), 1);

        let alternatives = ByteSignature::Alternatives(vec![literal(&[1]), literal(&[2, 3])]);
        let sequences = alternatives.sequences();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[1], &[MagicByte::Byte(2), MagicByte::Byte(3)]);
    }

    #[test]
    fn test_has_empty_sequence() {
        assert!(ByteSignature::Single(vec![]).has_empty_sequence());
        assert!(ByteSignature::Alternatives(vec![]).has_empty_sequence());
        assert!(ByteSignature::Alternatives(vec![literal(&[1]), vec![]]).has_empty_sequence());
        assert!(!ByteSignature::bytes(&[1]).has_empty_sequence());
    }

    #[test]
    fn test_builder_and_label() {
        let definition = SignatureDefinition::new("application", "x-demo");
        assert!(!definition.has_facets());
        assert_eq!(definition.label(), "application/x-demo");

        let definition = definition
            .with_id("demo")
            .with_members(["a.txt", "b/c.xml"]);
        assert!(definition.has_facets());
        assert_eq!(definition.label(), "demo");
        assert_eq!(
            definition.members.as_deref(),
            Some(&["a.txt".to_string(), "b/c.xml".to_string()][..])
        );
    }
}
