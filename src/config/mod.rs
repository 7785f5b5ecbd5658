//! Configuration for mimesniff.
//!
//! Configuration lives in `.mimesniff.toml`, discovered in the working
//! directory or one of its ancestors:
//!
//! ```toml
//! include_builtins = true
//!
//! [parallel]
//! enabled = true
//! max_concurrency = 4
//!
//! [[definitions]]
//! id = "lzip"
//! type = "application"
//! subtype = "x-lzip"
//! magic = [0x4c, 0x5a, 0x49, 0x50]
//! ```

mod definitions;
mod loader;
mod parallel;

pub use definitions::{DefinitionConfig, MagicByteConfig, MagicConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;

use crate::definitions::{builtin_definitions, SignatureDefinition};
use crate::detection::MimeDetection;
use crate::errors::Result;
use serde::{Deserialize, Serialize};

fn default_include_builtins() -> bool {
    true
}

/// Root configuration structure for mimesniff
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MimesniffConfig {
    /// Parallel evaluation settings
    #[serde(default)]
    pub parallel: ParallelConfig,

    /// Register the built-in definitions before the custom ones (default: true)
    #[serde(default = "default_include_builtins")]
    pub include_builtins: bool,

    /// Custom definitions, appended after the built-ins
    #[serde(default)]
    pub definitions: Vec<DefinitionConfig>,
}

impl Default for MimesniffConfig {
    fn default() -> Self {
        Self {
            parallel: ParallelConfig::default(),
            include_builtins: default_include_builtins(),
            definitions: Vec::new(),
        }
    }
}

impl MimesniffConfig {
    /// Compile the configured custom definitions, in declaration order.
    pub fn custom_definitions(&self) -> Result<Vec<SignatureDefinition>> {
        self.definitions
            .iter()
            .cloned()
            .map(DefinitionConfig::into_definition)
            .collect()
    }

    /// Build a detection engine: built-ins (unless disabled), then custom
    /// definitions.
    pub fn build_detection(&self) -> Result<MimeDetection> {
        let custom = self.custom_definitions()?;
        let mut definitions = if self.include_builtins {
            builtin_definitions()
        } else {
            Vec::new()
        };
        definitions.extend(custom);

        tracing::debug!(
            definitions = definitions.len(),
            builtins = self.include_builtins,
            concurrency = self.parallel.effective_concurrency(),
            "Building detection engine"
        );
        Ok(MimeDetection::from_definitions(definitions).with_parallel(self.parallel.clone()))
    }
}
