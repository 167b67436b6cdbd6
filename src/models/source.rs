//! Loaded input file.

use crate::config::ACCEPTED_EXTENSIONS;
use crate::error::{NormalizerError, Result};
use std::path::{Path, PathBuf};

const UTF8_BOM: char = '\u{feff}';

/// Immutable text of one input file plus the path it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    content: String,
}

/// True when the extension is one of `.csv`, `.tsv`, `.txt`, `.log` (any case).
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|ok| ext.eq_ignore_ascii_case(ok))
        })
        .unwrap_or(false)
}

impl SourceDocument {
    /// Read and decode a file from disk.
    ///
    /// The extension is checked before any I/O happens.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
        let path = path.as_ref();
        check_extension(path)?;
        let bytes = std::fs::read(path).map_err(|source| NormalizerError::UnreadableSource {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(path, bytes)
    }

    /// Build a document from bytes a front end already holds.
    pub fn from_bytes<P: AsRef<Path>>(path: P, bytes: Vec<u8>) -> Result<SourceDocument> {
        let path = path.as_ref();
        check_extension(path)?;
        let content = String::from_utf8(bytes).map_err(|e| NormalizerError::UnreadableSource {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        let content = match content.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => content,
        };
        Ok(SourceDocument {
            path: path.to_path_buf(),
            content,
        })
    }

    /// The path as provided by the caller.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Base name of the file, `unknown` when the path has none.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Absolute form of the path; falls back to the path as provided.
    pub fn absolute_path(&self) -> PathBuf {
        std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

fn check_extension(path: &Path) -> Result<()> {
    if is_supported(path) {
        Ok(())
    } else {
        log::warn!("Rejecting unsupported file type: {}", path.display());
        Err(NormalizerError::UnsupportedFileType {
            path: path.to_path_buf(),
        })
    }
}
