//! Error types for mimesniff.
//!
//! Two kinds of failure exist in this crate:
//!
//! - [`MimeParseError`]: a MIME type string violated the `type/subtype; key=value`
//!   grammar. These are the only failures surfaced by the core API.
//! - [`Error`]: configuration, definition and I/O failures raised by the
//!   configuration layer and the command line front end.
//!
//! Detection itself is total and never produces either kind; archive, decoding
//! and matcher failures are downgraded to non-matches where they happen.
//!
//! # Example
//!
//! ```rust
//! use mimesniff::errors::ParseRule;
//! use mimesniff::Mime;
//!
//! let err = Mime::parse("textplain").unwrap_err();
//! assert_eq!(err.rule, ParseRule::MissingSeparator);
//! assert_eq!(err.expression, "textplain");
//! assert_eq!(err.format, "type/subtype; parameters");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Grammar rule violated by a MIME type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseRule {
    /// The media type part has no `/` separator.
    MissingSeparator,
    /// The type token is neither `*` nor a valid token.
    InvalidType,
    /// The subtype token is neither `*` nor a valid token.
    InvalidSubtype,
    /// A parameter segment has no `=`.
    MalformedParameter,
    /// A parameter key is empty or not a valid token.
    InvalidParameterKey,
    /// A parameter value (after unquoting) is not a valid token.
    InvalidParameterValue,
}

impl ParseRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseRule::MissingSeparator => "missing-separator",
            ParseRule::InvalidType => "invalid-type",
            ParseRule::InvalidSubtype => "invalid-subtype",
            ParseRule::MalformedParameter => "malformed-parameter",
            ParseRule::InvalidParameterKey => "invalid-parameter-key",
            ParseRule::InvalidParameterValue => "invalid-parameter-value",
        }
    }
}

impl std::fmt::Display for ParseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A MIME type string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MimeParseError {
    /// Violated grammar rule
    pub rule: ParseRule,
    /// Human-readable message, e.g. `Invalid MIME type: 'te xt'`
    pub message: String,
    /// The complete expression handed to the parser
    pub expression: String,
    /// Expected grammar or accepted character set
    pub format: String,
}

impl MimeParseError {
    pub fn new(
        rule: ParseRule,
        message: impl Into<String>,
        expression: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            message: message.into(),
            expression: expression.into(),
            format: format.into(),
        }
    }
}

/// Main error type for configuration and command line operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration file errors
    #[error("Configuration error in {}: {message}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A custom signature definition is unusable
    #[error("Invalid definition '{label}': {message}")]
    Definition { label: String, message: String },

    /// MIME type string parse errors
    #[error(transparent)]
    Parse(#[from] MimeParseError),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<inline>".to_string())
}

impl Error {
    /// Create an I/O error from a std::io::Error with path context
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::Io {
            message: format!("{}: {}", path.display(), source),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    /// Create a definition error
    pub fn definition(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Definition {
            label: label.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
