//! Error types for the IoC normalizer.
//!
//! Malformed rows, ragged columns and non-IP tokens are not errors. They are
//! filtered out during extraction. Only conditions the caller has to report
//! end up here.

use crate::session::Stage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Unsupported file type: {} (expected .csv, .tsv, .txt or .log)", path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("Cannot read {}: {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No valid IPv4 addresses found in {}", path.display())]
    EmptyOrNoMatches { path: PathBuf },

    #[error("Export to {} failed: {source}", path.display())]
    ExportWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Invalid export record {}: {reason}", path.display())]
    InvalidExport { path: PathBuf, reason: String },

    #[error("Cannot {action} while session is {stage}")]
    InvalidState { action: &'static str, stage: Stage },
}

impl NormalizerError {
    /// `false` for outcomes the CLI reports as a notice and exits 0 on.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, NormalizerError::EmptyOrNoMatches { .. })
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
