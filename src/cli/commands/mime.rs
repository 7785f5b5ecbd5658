//! Handlers for the MIME string subcommands: parse, normalize, includes

use crate::cli::args::OutputFormat;
use crate::errors::MimeParseError;
use crate::mime::{CompareOptions, Mime};
use anyhow::{anyhow, Result};
use serde_json::json;
use std::io::Write;

/// Parse failure with its expression and expected format.
fn describe(err: &MimeParseError) -> anyhow::Error {
    anyhow!(
        "{}\n  expression: {}\n  expected:   {}",
        err.message,
        err.expression,
        err.format
    )
}

fn parse_all(expressions: &[String]) -> Result<Vec<Mime>> {
    expressions
        .iter()
        .map(|e| Mime::parse(e).map_err(|err| describe(&err)))
        .collect()
}

pub fn handle_parse_command(
    expression: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<bool> {
    let mime = Mime::parse(expression).map_err(|err| describe(&err))?;

    match format {
        OutputFormat::Json => {
            let parameters: serde_json::Map<String, serde_json::Value> = mime
                .parameters()
                .iter()
                .map(|(k, v)| (k.to_string(), json!(v)))
                .collect();
            let value = json!({
                "type": mime.type_(),
                "subtype": mime.subtype(),
                "parameters": parameters,
                "canonical": mime.to_string(),
            });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
        OutputFormat::Terminal => {
            writeln!(out, "type:       {}", mime.type_())?;
            writeln!(out, "subtype:    {}", mime.subtype())?;
            for (key, value) in mime.parameters().iter() {
                writeln!(out, "parameter:  {}={}", key, value)?;
            }
            writeln!(out, "canonical:  {}", mime)?;
        }
    }
    Ok(true)
}

pub fn handle_normalize_command(expression: &str, out: &mut dyn Write) -> Result<bool> {
    let normalized = Mime::normalize(expression).map_err(|err| describe(&err))?;
    writeln!(out, "{}", normalized)?;
    Ok(true)
}

/// Prints `true` or `false`; both are successful outcomes.
pub fn handle_includes_command(
    accept: &[String],
    candidates: &[String],
    ignore_parameters: bool,
    out: &mut dyn Write,
) -> Result<bool> {
    let sources = parse_all(accept)?;
    let targets = parse_all(candidates)?;
    let options = if ignore_parameters {
        CompareOptions::ignore_parameters()
    } else {
        CompareOptions::default()
    };

    writeln!(out, "{}", Mime::includes_any(&sources, &targets, options))?;
    Ok(true)
}
