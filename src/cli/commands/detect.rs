//! Detect command handler

use crate::cli::args::OutputFormat;
use crate::config::MimesniffConfig;
use crate::detection::MimeDetection;
use crate::mime::Mime;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Options for the `detect` subcommand
#[derive(Debug, Clone)]
pub struct DetectOptions {
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub no_builtins: bool,
    pub no_parallel: bool,
}

/// Detection outcome for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileDetection {
    pub path: PathBuf,
    pub types: Vec<Mime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileDetection {
    fn detect(path: PathBuf, detection: &MimeDetection) -> Self {
        match std::fs::read(&path) {
            Ok(buffer) => {
                let types = Mime::detect_with(&buffer, detection);
                tracing::info!(path = %path.display(), types = types.len(), "Detected");
                Self {
                    path,
                    types,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read file");
                Self {
                    path,
                    types: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

fn build_detection(mut config: MimesniffConfig, options: &DetectOptions) -> Result<MimeDetection> {
    if options.no_builtins {
        config.include_builtins = false;
    }
    if options.no_parallel {
        config.parallel.enabled = false;
    }
    config
        .build_detection()
        .context("Failed to build detection engine")
}

/// Run detection over every file; returns false if any file could not be read.
pub fn handle_detect_command(
    config: MimesniffConfig,
    options: DetectOptions,
    out: &mut dyn Write,
) -> Result<bool> {
    let detection = build_detection(config, &options)?;

    let results: Vec<FileDetection> = options
        .files
        .iter()
        .cloned()
        .map(|path| FileDetection::detect(path, &detection))
        .collect();

    match options.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &results)?;
            writeln!(out)?;
        }
        OutputFormat::Terminal => write_terminal(&results, out)?,
    }

    Ok(results.iter().all(|r| r.error.is_none()))
}

fn write_terminal(results: &[FileDetection], out: &mut dyn Write) -> Result<()> {
    for result in results {
        let path = result.path.display().to_string();
        if let Some(error) = &result.error {
            writeln!(out, "{}: {} {}", path.bold(), "error:".red(), error)?;
        } else if result.types.is_empty() {
            writeln!(out, "{}: {}", path.bold(), "unknown".dimmed())?;
        } else {
            let types: Vec<String> = result.types.iter().map(ToString::to_string).collect();
            writeln!(out, "{}: {}", path.bold(), types.join(", ").green())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(files: Vec<PathBuf>, format: OutputFormat) -> DetectOptions {
        DetectOptions {
            files,
            format,
            no_builtins: false,
            no_parallel: true,
        }
    }

    #[test]
    fn test_detect_json_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.bin");
        std::fs::write(&path, [0xff, 0xd8, 0xff, 0xe0, 0x00]).unwrap();

        let mut out = Vec::new();
        let ok = handle_detect_command(
            MimesniffConfig::default(),
            options(vec![path], OutputFormat::Json),
            &mut out,
        )
        .unwrap();

        assert!(ok);
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["types"][0], "image/jpeg");
        assert!(json[0].get("error").is_none());
    }

    #[test]
    fn test_detect_reports_unreadable_file() {
        let dir = TempDir::new().unwrap();
        colored::control::set_override(false);

        let mut out = Vec::new();
        let ok = handle_detect_command(
            MimesniffConfig::default(),
            options(vec![dir.path().join("missing")], OutputFormat::Terminal),
            &mut out,
        )
        .unwrap();

        assert!(!ok);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error:"), "{}", text);
    }

    #[test]
    fn test_detect_without_builtins_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.bin");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let mut opts = options(vec![path], OutputFormat::Json);
        opts.no_builtins = true;
        let mut out = Vec::new();
        handle_detect_command(MimesniffConfig::default(), opts, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["types"].as_array().map(Vec::len), Some(0));
    }
}
