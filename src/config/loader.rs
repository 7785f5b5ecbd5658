use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::MimesniffConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".mimesniff.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str, path: Option<&Path>) -> Result<MimesniffConfig> {
    let config = toml::from_str::<MimesniffConfig>(contents).map_err(|e| {
        Error::config(
            format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e.message()),
            path.map(Path::to_path_buf),
        )
    })?;

    if config.parallel.max_concurrency == Some(0) {
        return Err(Error::config(
            "parallel.max_concurrency must be at least 1",
            path.map(Path::to_path_buf),
        ));
    }

    Ok(config)
}

/// Load configuration from an explicit path; a missing file is an error.
pub fn load_config_from(path: &Path) -> Result<MimesniffConfig> {
    let contents = read_config_file(path).map_err(|e| Error::io(e, path))?;
    let config = parse_config(&contents, Some(path))?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Try loading config from a path found during discovery
///
/// A missing file yields `Ok(None)`; unreadable or invalid files are errors.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Result<Option<MimesniffConfig>> {
    match read_config_file(config_path) {
        Ok(contents) => parse_config(&contents, Some(config_path)).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(e, config_path)),
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the config file.
pub fn discover_config(start: &Path) -> Result<MimesniffConfig> {
    for dir in directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH) {
        if let Some(config) = try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))? {
            tracing::debug!(dir = %dir.display(), "Loaded config");
            return Ok(config);
        }
    }

    tracing::debug!(
        depth = MAX_TRAVERSAL_DEPTH,
        "No config found, using defaults"
    );
    Ok(MimesniffConfig::default())
}

/// Load the config for the current directory, or defaults when there is none.
pub fn load_config() -> Result<MimesniffConfig> {
    match std::env::current_dir() {
        Ok(current) => discover_config(&current),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to get current directory, using default config");
            Ok(MimesniffConfig::default())
        }
    }
}
