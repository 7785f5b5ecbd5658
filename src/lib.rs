//! Content-based MIME type detection and MIME type parsing.
//!
//! Two halves:
//! - [`MimeDetection`] evaluates signature definitions (magic bytes, zip
//!   archive members, text patterns) against a byte buffer and returns the
//!   best-ranked matches.
//! - [`Mime`] is a parsed `type/subtype; key=value` value with equality and
//!   wildcard-aware inclusion.

// Export modules for library usage
pub mod cli;
pub mod common;
pub mod config;
pub mod definitions;
pub mod detection;
pub mod errors;
pub mod extensions;
pub mod mime;

// Re-export commonly used types
pub use crate::common::unique_by;

pub use crate::config::{load_config, load_config_from, MimesniffConfig, ParallelConfig};

pub use crate::definitions::{
    builtin_definitions, ByteSignature, MagicByte, SignatureDefinition, BUFFER_CHECK_SIZE,
};

pub use crate::detection::{
    archive::{ArchiveError, ArchiveReader, ZipReader},
    DetectionResult, FacetMatch, MimeDetection,
};

pub use crate::errors::{Error, MimeParseError, ParseRule, Result};

pub use crate::extensions::{extension_categories, is_known_extension, known_extensions};

pub use crate::mime::{CompareOptions, Mime, Parameters};
