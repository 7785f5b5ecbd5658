//! Command handlers for CLI subcommands
//!
//! Each handler writes its report to the given writer and returns whether
//! the command fully succeeded, so the binary can pick the exit status.

mod catalog;
mod detect;
mod mime;

pub use catalog::{handle_extensions_command, handle_known_command};
pub use detect::{handle_detect_command, DetectOptions, FileDetection};
pub use mime::{handle_includes_command, handle_normalize_command, handle_parse_command};

use crate::config::{load_config, load_config_from, MimesniffConfig};
use std::path::Path;

/// Explicit config file, or discovery from the working directory.
pub fn load_effective_config(path: Option<&Path>) -> crate::errors::Result<MimesniffConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}
