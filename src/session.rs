//! Session state for the currently loaded file.
//!
//! A [`Session`] owns the loaded document and everything derived from it.
//! Front ends drive it through `load`, `process`, `copy_to` and `export*`,
//! and read it through the projection methods. Each trigger replaces the
//! derived state wholesale; nothing is merged across files.
//!
//! ```text
//! Empty --load--> Loaded --process--> Processed --copy/export--> Exported
//!   ^               |  ^                  |                         |
//!   +---------------+--+------load--------+-----------load----------+
//! ```

use crate::error::{NormalizerError, Result};
use crate::models::{CidrRecord, ExportSnapshot, RawAddressSet, SourceDocument};
use crate::normalize;
use crate::output::{self, ClipboardSink, ExportFormat};
use crate::parsing::DelimiterProfile;
use crate::processing::to_cidr;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Empty,
    Loaded,
    Processed,
    Exported,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Stage::Empty => "empty",
            Stage::Loaded => "loaded",
            Stage::Processed => "processed",
            Stage::Exported => "exported",
        };
        write!(f, "{name}")
    }
}

/// Counts shown next to the result lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub raw_count: usize,
    pub processed_count: usize,
    pub source_name: Option<String>,
    pub stage: Stage,
}

/// Files written by one export action.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub snapshot: ExportSnapshot,
    pub paths: Vec<PathBuf>,
}

#[derive(Debug)]
struct LoadedFile {
    document: SourceDocument,
    profile: DelimiterProfile,
    addresses: RawAddressSet,
}

#[derive(Debug, Default)]
pub struct Session {
    stage: Stage,
    loaded: Option<LoadedFile>,
    records: Vec<CidrRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Read `path` and run detection, extraction and de-duplication.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of unique valid addresses
    /// * `Err(UnsupportedFileType | UnreadableSource)` - Previous state is kept
    /// * `Err(EmptyOrNoMatches)` - The file replaces the previous one, with no addresses
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let document = SourceDocument::load(path)?;
        self.load_document(document)
    }

    /// Same as [`Session::load`] for a document the caller already read.
    pub fn load_document(&mut self, document: SourceDocument) -> Result<usize> {
        let (profile, addresses) = normalize(document.content());
        let count = addresses.len();
        log::info!(
            "Loaded {count} valid IPv4 from {} (delimiter={}, header={})",
            document.path().display(),
            profile.delimiter,
            profile.has_header
        );

        let path = document.path().to_path_buf();
        self.loaded = Some(LoadedFile {
            document,
            profile,
            addresses,
        });
        self.records.clear();
        self.stage = Stage::Loaded;

        if count == 0 {
            log::warn!("No valid IPv4 addresses found in {}", path.display());
            return Err(NormalizerError::EmptyOrNoMatches { path });
        }
        Ok(count)
    }

    /// Convert the loaded addresses to `/32` records.
    pub fn process(&mut self) -> Result<usize> {
        let loaded = match (&self.loaded, self.stage) {
            (Some(loaded), stage) if stage != Stage::Empty => loaded,
            _ => {
                return Err(NormalizerError::InvalidState {
                    action: "process",
                    stage: self.stage,
                })
            }
        };
        if loaded.addresses.is_empty() {
            return Err(NormalizerError::EmptyOrNoMatches {
                path: loaded.document.path().to_path_buf(),
            });
        }
        self.records = to_cidr(&loaded.addresses);
        self.stage = Stage::Processed;
        Ok(self.records.len())
    }

    /// Send the clipboard text to `sink`; returns the text sent.
    pub fn copy_to(&mut self, sink: &mut dyn ClipboardSink) -> Result<String> {
        self.require_processed("copy")?;
        let text = output::to_clipboard_text(&self.records);
        sink.set_text(&text)?;
        self.stage = Stage::Exported;
        Ok(text)
    }

    /// Export JSON and plain text into `dir`, timestamped now.
    pub fn export(&mut self, dir: &Path) -> Result<ExportReport> {
        let now = chrono::Local::now().naive_local();
        self.export_to(dir, now, &[ExportFormat::Json, ExportFormat::Text])
    }

    /// Snapshot the current records at `now` and write them in `formats`.
    ///
    /// On failure the session is unchanged and the call can be retried.
    pub fn export_to(
        &mut self,
        dir: &Path,
        now: NaiveDateTime,
        formats: &[ExportFormat],
    ) -> Result<ExportReport> {
        let loaded = self.require_processed("export")?;
        let snapshot = output::snapshot(&self.records, loaded.document.path(), now);
        let paths = output::write_snapshot(&snapshot, dir, formats)?;
        self.stage = Stage::Exported;
        Ok(ExportReport { snapshot, paths })
    }

    fn require_processed(&self, action: &'static str) -> Result<&LoadedFile> {
        match (&self.loaded, self.stage) {
            (Some(loaded), Stage::Processed | Stage::Exported) => Ok(loaded),
            _ => Err(NormalizerError::InvalidState {
                action,
                stage: self.stage,
            }),
        }
    }

    pub fn document(&self) -> Option<&SourceDocument> {
        self.loaded.as_ref().map(|l| &l.document)
    }

    pub fn profile(&self) -> Option<DelimiterProfile> {
        self.loaded.as_ref().map(|l| l.profile)
    }

    /// Valid IPv4 strings of the loaded file, first-seen order.
    pub fn raw_addresses(&self) -> Vec<String> {
        self.loaded
            .as_ref()
            .map(|l| l.addresses.to_strings())
            .unwrap_or_default()
    }

    /// `ip/32` strings, empty until processed.
    pub fn cidr_blocks(&self) -> Vec<String> {
        self.records.iter().map(|r| r.bare()).collect()
    }

    pub fn records(&self) -> &[CidrRecord] {
        &self.records
    }

    pub fn summary(&self) -> Summary {
        Summary {
            raw_count: self.loaded.as_ref().map_or(0, |l| l.addresses.len()),
            processed_count: self.records.len(),
            source_name: self.document().map(|d| d.name()),
            stage: self.stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryClipboard;
    use chrono::NaiveDate;

    fn doc(name: &str, content: &str) -> SourceDocument {
        SourceDocument::from_bytes(name, content.as_bytes().to_vec()).unwrap()
    }

    fn loaded_session() -> Session {
        let mut session = Session::new();
        session
            .load_document(doc("iocs.csv", "indicator,value\n192.168.1.1,malicious\n10.0.0.1,suspicious\n"))
            .unwrap();
        session
    }

    #[test]
    fn test_load_then_process() {
        let mut session = loaded_session();
        assert_eq!(session.stage(), Stage::Loaded);
        assert_eq!(session.raw_addresses(), vec!["192.168.1.1", "10.0.0.1"]);
        assert!(session.cidr_blocks().is_empty());

        assert_eq!(session.process().unwrap(), 2);
        assert_eq!(session.stage(), Stage::Processed);
        assert_eq!(session.cidr_blocks(), vec!["192.168.1.1/32", "10.0.0.1/32"]);
        assert_eq!(
            session.summary(),
            Summary {
                raw_count: 2,
                processed_count: 2,
                source_name: Some("iocs.csv".to_string()),
                stage: Stage::Processed,
            }
        );
    }

    #[test]
    fn test_process_requires_load() {
        let mut session = Session::new();
        let err = session.process().unwrap_err();
        assert!(matches!(
            err,
            NormalizerError::InvalidState {
                action: "process",
                stage: Stage::Empty
            }
        ));
    }

    #[test]
    fn test_copy_and_export_require_process() {
        let mut session = loaded_session();
        let mut sink = MemoryClipboard::default();
        assert!(matches!(
            session.copy_to(&mut sink).unwrap_err(),
            NormalizerError::InvalidState { action: "copy", .. }
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            session.export(dir.path()).unwrap_err(),
            NormalizerError::InvalidState { action: "export", .. }
        ));
        assert!(sink.contents.is_none());
        assert_eq!(session.stage(), Stage::Loaded);
    }

    #[test]
    fn test_copy_to_sink() {
        let mut session = loaded_session();
        session.process().unwrap();
        let mut sink = MemoryClipboard::default();
        let text = session.copy_to(&mut sink).unwrap();
        assert_eq!(text, r#"["192.168.1.1/32","10.0.0.1/32"]"#);
        assert_eq!(sink.contents.as_deref(), Some(text.as_str()));
        assert_eq!(session.stage(), Stage::Exported);
    }

    #[test]
    fn test_empty_file_reports_no_matches() {
        let mut session = loaded_session();
        session.process().unwrap();
        let err = session.load_document(doc("empty.txt", "")).unwrap_err();
        assert!(matches!(err, NormalizerError::EmptyOrNoMatches { .. }));
        // previous results replaced, not merged
        assert!(session.raw_addresses().is_empty());
        assert!(session.cidr_blocks().is_empty());
        assert_eq!(session.summary().source_name.as_deref(), Some("empty.txt"));
        assert!(matches!(
            session.process().unwrap_err(),
            NormalizerError::EmptyOrNoMatches { .. }
        ));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut session = loaded_session();
        session.process().unwrap();
        assert!(session.load("iocs.xlsx").is_err());
        assert!(session.load("missing/nothing.csv").is_err());
        assert_eq!(session.stage(), Stage::Processed);
        assert_eq!(session.cidr_blocks().len(), 2);
    }

    #[test]
    fn test_reload_replaces_state() {
        let mut session = loaded_session();
        session.process().unwrap();
        session.load_document(doc("b.txt", "8.8.8.8\n")).unwrap();
        assert_eq!(session.stage(), Stage::Loaded);
        assert_eq!(session.raw_addresses(), vec!["8.8.8.8"]);
        assert!(session.records().is_empty());
    }

    #[test]
    fn test_export_failure_keeps_state() {
        let mut session = loaded_session();
        session.process().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(20, 43, 7)
            .unwrap();
        let missing = dir.path().join("missing");
        let err = session
            .export_to(&missing, now, &[ExportFormat::Json])
            .unwrap_err();
        assert!(matches!(err, NormalizerError::ExportWriteFailure { .. }));
        assert_eq!(session.stage(), Stage::Processed);

        let report = session
            .export_to(dir.path(), now, &[ExportFormat::Json, ExportFormat::Text])
            .unwrap();
        assert_eq!(session.stage(), Stage::Exported);
        assert_eq!(report.snapshot.ipv4_count, 2);
        assert_eq!(
            report.paths[0].file_name().unwrap(),
            "terraform_iocs_2_20240110_204307.json"
        );
    }
}
