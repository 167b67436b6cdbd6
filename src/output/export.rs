//! Export snapshots and their persistence.
//!
//! Files are written to a temporary file in the destination directory and
//! then moved into place without overwriting, so a failed export never
//! leaves a partial file and two exports in the same second never clobber
//! each other.

use super::clipboard::to_clipboard_text;
use crate::config::{EXPORT_PREFIX, MAX_EXPORT_SUFFIX};
use crate::error::{NormalizerError, Result};
use crate::models::{CidrRecord, ExportSnapshot};
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persisted export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Structured record, see [`ExportSnapshot`].
    Json,
    /// One bare address per line.
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }

    pub fn render(&self, snapshot: &ExportSnapshot) -> Result<String> {
        match self {
            ExportFormat::Json => serde_json::to_string_pretty(snapshot).map_err(|e| {
                NormalizerError::ExportWriteFailure {
                    path: PathBuf::from(&snapshot.source_name),
                    source: std::io::Error::other(e),
                }
            }),
            ExportFormat::Text => Ok(to_plain_text(snapshot)),
        }
    }
}

/// Build the snapshot for `records` loaded from `source_path`.
pub fn snapshot(records: &[CidrRecord], source_path: &Path, now: NaiveDateTime) -> ExportSnapshot {
    let source_file = std::path::absolute(source_path)
        .unwrap_or_else(|_| source_path.to_path_buf())
        .display()
        .to_string();
    let source_name = source_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());
    ExportSnapshot {
        export_timestamp: now,
        source_file,
        source_name,
        ipv4_count: records.len(),
        terraform_list: to_clipboard_text(records),
        cidr_blocks: records.iter().map(|r| r.block).collect(),
    }
}

/// `terraform_iocs_<count>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn export_file_name(count: usize, now: NaiveDateTime, ext: &str) -> String {
    format!("{}.{ext}", export_stem(count, now))
}

fn export_stem(count: usize, now: NaiveDateTime) -> String {
    format!("{EXPORT_PREFIX}_{count}_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Newline-separated bare addresses, trailing newline included.
pub fn to_plain_text(snapshot: &ExportSnapshot) -> String {
    snapshot
        .cidr_blocks
        .iter()
        .map(|block| format!("{}\n", block.addr))
        .collect()
}

/// Write `snapshot` into `dir` once per format, all under one file stem.
///
/// Every format is staged in a temporary file before any of them is moved
/// into place. If a later move fails, files already moved by this call are
/// removed again.
///
/// # Returns
/// * `Ok(paths)` - Written files, in `formats` order
/// * `Err(ExportWriteFailure)` - No export file of this call is left behind
pub fn write_snapshot(
    snapshot: &ExportSnapshot,
    dir: &Path,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>> {
    let stem = export_stem(snapshot.ipv4_count, snapshot.export_timestamp);
    let contents = formats
        .iter()
        .map(|format| format.render(snapshot))
        .collect::<Result<Vec<String>>>()?;

    for n in 0..=MAX_EXPORT_SUFFIX {
        let paths: Vec<PathBuf> = formats
            .iter()
            .map(|format| dir.join(export_name(&stem, n, format.extension())))
            .collect();
        if let Some(taken) = paths.iter().find(|p| p.exists()) {
            log::warn!("Export name taken: {}, trying next suffix", taken.display());
            continue;
        }
        match persist_all(dir, &contents, &paths) {
            Ok(()) => {
                for path in &paths {
                    log::info!("Saved export: {}", path.display());
                }
                return Ok(paths);
            }
            Err(e) if e.source.kind() == std::io::ErrorKind::AlreadyExists => {
                log::warn!("Export name taken: {}, trying next suffix", e.path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(NormalizerError::ExportWriteFailure {
        path: dir.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("no free name for {stem}"),
        ),
    })
}

fn export_name(stem: &str, n: u32, ext: &str) -> String {
    match n {
        0 => format!("{stem}.{ext}"),
        n => format!("{stem}_{n}.{ext}"),
    }
}

struct PersistFailure {
    path: PathBuf,
    source: std::io::Error,
}

impl From<PersistFailure> for NormalizerError {
    fn from(e: PersistFailure) -> Self {
        NormalizerError::ExportWriteFailure {
            path: e.path,
            source: e.source,
        }
    }
}

/// Stage `contents` in `dir`, then move them to `paths` without overwriting.
fn persist_all(
    dir: &Path,
    contents: &[String],
    paths: &[PathBuf],
) -> std::result::Result<(), PersistFailure> {
    let mut staged = Vec::with_capacity(contents.len());
    for content in contents {
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|source| PersistFailure {
            path: dir.to_path_buf(),
            source,
        })?;
        temp_file
            .write_all(content.as_bytes())
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|source| PersistFailure {
                path: temp_file.path().to_path_buf(),
                source,
            })?;
        staged.push(temp_file);
    }

    let mut persisted: Vec<&Path> = Vec::with_capacity(paths.len());
    for (temp_file, path) in staged.into_iter().zip(paths) {
        if let Err(e) = temp_file.persist_noclobber(path) {
            for done in persisted {
                if let Err(rm) = std::fs::remove_file(done) {
                    log::warn!("Cannot remove partial export {}: {rm}", done.display());
                }
            }
            return Err(PersistFailure {
                path: path.clone(),
                source: e.error,
            });
        }
        persisted.push(path);
    }
    Ok(())
}

/// Load a persisted JSON export and check it is self-consistent.
pub fn read_export_snapshot<P: AsRef<Path>>(path: P) -> Result<ExportSnapshot> {
    let path = path.as_ref();
    let invalid = |reason: String| NormalizerError::InvalidExport {
        path: path.to_path_buf(),
        reason,
    };

    let json = std::fs::read_to_string(path).map_err(|source| NormalizerError::UnreadableSource {
        path: path.to_path_buf(),
        source,
    })?;
    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let snapshot: ExportSnapshot = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| invalid(format!("path={} error={}", e.path(), e)))?;

    if snapshot.ipv4_count != snapshot.cidr_blocks.len() {
        return Err(invalid(format!(
            "ipv4_count={} != cidr_blocks.len()={}",
            snapshot.ipv4_count,
            snapshot.cidr_blocks.len()
        )));
    }
    if let Some(block) = snapshot.cidr_blocks.iter().find(|b| !b.is_host()) {
        return Err(invalid(format!("{block} is not a /32 block")));
    }
    let records: Vec<CidrRecord> = snapshot
        .cidr_blocks
        .iter()
        .map(|b| CidrRecord::new(b.addr))
        .collect();
    if snapshot.terraform_list != to_clipboard_text(&records) {
        return Err(invalid("terraform_list does not match cidr_blocks".to_string()));
    }
    Ok(snapshot)
}
