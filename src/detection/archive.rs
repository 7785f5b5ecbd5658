//! Archive container boundary for the member facet.
//!
//! The engine only needs to know which member paths a container holds.
//! [`ArchiveReader`] is the seam; [`ZipReader`] is the default implementation.

use std::collections::HashSet;
use std::io::Cursor;
use thiserror::Error;

/// The buffer could not be opened as a container.
#[derive(Debug, Error)]
#[error("not a readable archive: {0}")]
pub struct ArchiveError(String);

impl ArchiveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Lists member paths of an in-memory container.
pub trait ArchiveReader: Send + Sync {
    /// Member paths exactly as stored in the container.
    fn member_paths(&self, buffer: &[u8]) -> Result<HashSet<String>, ArchiveError>;
}

/// Reads the central directory of a zip container.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipReader;

impl ArchiveReader for ZipReader {
    fn member_paths(&self, buffer: &[u8]) -> Result<HashSet<String>, ArchiveError> {
        let archive = zip::ZipArchive::new(Cursor::new(buffer))
            .map_err(|e| ArchiveError::new(e.to_string()))?;
        Ok(archive.file_names().map(str::to_owned).collect())
    }
}
