//! Custom signature definitions declared in configuration.
//!
//! ```toml
//! [[definitions]]
//! id = "lzip"
//! type = "application"
//! subtype = "x-lzip"
//! magic = [0x4c, 0x5a, 0x49, 0x50]
//!
//! [[definitions]]
//! type = "application"
//! subtype = "epub+zip"
//! magic = [[0x50, 0x4b, 0x03, 0x04], ["0x50", "0x4B", "*", "*"]]
//! members = ["mimetype", "META-INF/container.xml"]
//! ```

use crate::definitions::{ByteSignature, MagicByte, SignatureDefinition};
use crate::errors::{Error, Result};
use crate::mime::is_token;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One configured definition, converted with [`DefinitionConfig::into_definition`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefinitionConfig {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub mime_type: String,

    pub subtype: String,

    /// Byte sequence, or list of alternative sequences, anchored at offset 0
    #[serde(default)]
    pub magic: Option<MagicConfig>,

    /// Paths that must exist inside a zip container
    #[serde(default)]
    pub members: Option<Vec<String>>,

    /// Regex tested against the decoded buffer prefix
    #[serde(default)]
    pub pattern: Option<String>,
}

/// `magic = [..]` or `magic = [[..], [..]]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MagicConfig {
    Single(Vec<MagicByteConfig>),
    Alternatives(Vec<Vec<MagicByteConfig>>),
}

/// A byte as an integer, a hex string like `"0x4B"`, or the wildcard `"*"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MagicByteConfig {
    Number(i64),
    Text(String),
}

impl MagicByteConfig {
    fn to_magic_byte(&self) -> std::result::Result<MagicByte, String> {
        match self {
            MagicByteConfig::Number(n) => u8::try_from(*n)
                .map(MagicByte::Byte)
                .map_err(|_| format!("byte value {} is out of range 0-255", n)),
            MagicByteConfig::Text(text) if text == "*" => Ok(MagicByte::Any),
            MagicByteConfig::Text(text) => {
                let digits = text
                    .strip_prefix("0x")
                    .or_else(|| text.strip_prefix("0X"))
                    .ok_or_else(|| format!("'{}' is neither '*' nor a 0x-prefixed hex byte", text))?;
                u8::from_str_radix(digits, 16)
                    .map(MagicByte::Byte)
                    .map_err(|_| format!("'{}' is not a hex byte", text))
            }
        }
    }
}

fn convert_sequence(sequence: &[MagicByteConfig]) -> std::result::Result<Vec<MagicByte>, String> {
    sequence.iter().map(MagicByteConfig::to_magic_byte).collect()
}

impl MagicConfig {
    fn to_signature(&self) -> std::result::Result<ByteSignature, String> {
        let signature = match self {
            MagicConfig::Single(sequence) => ByteSignature::Single(convert_sequence(sequence)?),
            MagicConfig::Alternatives(sequences) => ByteSignature::Alternatives(
                sequences
                    .iter()
                    .map(|sequence| convert_sequence(sequence))
                    .collect::<std::result::Result<_, _>>()?,
            ),
        };
        if signature.has_empty_sequence() {
            return Err("magic must not contain empty sequences".to_string());
        }
        Ok(signature)
    }
}

impl DefinitionConfig {
    fn label(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.mime_type, self.subtype))
    }

    /// Validate and compile into a [`SignatureDefinition`].
    ///
    /// Type and subtype must be tokens, magic bytes in range, the pattern a
    /// valid regex, and at least one facet must be declared.
    pub fn into_definition(self) -> Result<SignatureDefinition> {
        let label = self.label();
        let fail = |message: String| Error::definition(label.clone(), message);

        if !is_token(&self.mime_type) {
            return Err(fail(format!("type '{}' is not a valid token", self.mime_type)));
        }
        if !is_token(&self.subtype) {
            return Err(fail(format!("subtype '{}' is not a valid token", self.subtype)));
        }

        let mut definition = SignatureDefinition::new(self.mime_type, self.subtype);
        definition.id = self.id;

        if let Some(magic) = &self.magic {
            definition.magic = Some(magic.to_signature().map_err(&fail)?);
        }
        definition.members = self.members;
        if let Some(source) = &self.pattern {
            let pattern = Regex::new(source).map_err(|e| fail(format!("invalid pattern: {}", e)))?;
            definition.pattern = Some(pattern);
        }

        if !definition.has_facets() {
            return Err(fail(
                "declares no magic, members or pattern and could never match".to_string(),
            ));
        }
        Ok(definition)
    }
}
