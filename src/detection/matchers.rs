//! Facet matchers.
//!
//! Each matcher is a pure function of the buffer and one facet value. None of
//! them can fail: short buffers, undecodable text and unreadable archives are
//! all plain non-matches.

use super::archive::ArchiveReader;
use crate::definitions::{ByteSignature, MagicByte, BUFFER_CHECK_SIZE};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::debug;

/// Whether any sequence of `signature` matches the start of `buffer`.
pub fn match_magic(buffer: &[u8], signature: &ByteSignature) -> bool {
    signature
        .sequences()
        .into_iter()
        .any(|sequence| match_sequence(buffer, sequence))
}

/// Positions past the end of `buffer` never match.
pub fn match_sequence(buffer: &[u8], sequence: &[MagicByte]) -> bool {
    sequence
        .iter()
        .enumerate()
        .all(|(i, expected)| buffer.get(i).is_some_and(|byte| expected.matches(*byte)))
}

/// The first [`BUFFER_CHECK_SIZE`] bytes decoded as UTF-8, with invalid
/// sequences replaced.
pub fn decode_prefix(buffer: &[u8]) -> Cow<'_, str> {
    let end = buffer.len().min(BUFFER_CHECK_SIZE);
    String::from_utf8_lossy(&buffer[..end])
}

/// Whether `pattern` matches the decoded prefix of `buffer`.
pub fn match_pattern(buffer: &[u8], pattern: &Regex) -> bool {
    pattern.is_match(&decode_prefix(buffer))
}

/// Lazily opened view of the buffer as an archive container.
///
/// The container is opened at most once per detection, however many
/// definitions declare a member facet.
pub struct ArchiveProbe<'a> {
    buffer: &'a [u8],
    reader: &'a dyn ArchiveReader,
    members: OnceCell<Option<HashSet<String>>>,
}

impl<'a> ArchiveProbe<'a> {
    pub fn new(buffer: &'a [u8], reader: &'a dyn ArchiveReader) -> Self {
        Self {
            buffer,
            reader,
            members: OnceCell::new(),
        }
    }

    /// Member paths, or `None` when the buffer is not a readable container.
    pub fn members(&self) -> Option<&HashSet<String>> {
        self.members
            .get_or_init(|| match self.reader.member_paths(self.buffer) {
                Ok(members) => Some(members),
                Err(e) => {
                    debug!(error = %e, "buffer is not an archive");
                    None
                }
            })
            .as_ref()
    }

    /// Whether every required path is present, matched exactly.
    pub fn contains_all(&self, required: &[String]) -> bool {
        self.members()
            .is_some_and(|members| required.iter().all(|path| members.contains(path)))
    }
}
