//! Handlers for the catalog listings: known types and file extensions

use crate::cli::args::OutputFormat;
use crate::config::MimesniffConfig;
use crate::extensions::EXTENSION_CATEGORIES;
use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;

/// List every type the configured engine knows about.
pub fn handle_known_command(
    config: &MimesniffConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<bool> {
    let detection = config
        .build_detection()
        .context("Failed to build detection engine")?;
    let known = detection.known_types();

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &known)?;
            writeln!(out)?;
        }
        OutputFormat::Terminal => {
            for mime in &known {
                writeln!(out, "{}", mime)?;
            }
        }
    }
    Ok(true)
}

pub fn handle_extensions_command(format: OutputFormat, out: &mut dyn Write) -> Result<bool> {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = EXTENSION_CATEGORIES
                .iter()
                .map(|(category, extensions)| (category.to_string(), json!(extensions)))
                .collect();
            serde_json::to_writer_pretty(&mut *out, &map)?;
            writeln!(out)?;
        }
        OutputFormat::Terminal => {
            for (category, extensions) in EXTENSION_CATEGORIES {
                writeln!(out, "{:<14} {}", category, extensions.join(" "))?;
            }
        }
    }
    Ok(true)
}
