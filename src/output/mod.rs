//! Output formatting and export.
//!
//! This module handles everything that leaves the pipeline:
//! - [`clipboard`] - Clipboard payload and sinks
//! - [`export`] - Export snapshots, file naming and persistence
//! - [`terminal`] - Terminal rendering of the session projections

mod clipboard;
mod export;
mod terminal;

pub use clipboard::{to_clipboard_text, ClipboardSink, MemoryClipboard, SystemClipboard};
pub use export::{
    export_file_name, read_export_snapshot, snapshot, to_plain_text, write_snapshot, ExportFormat,
};
pub use terminal::{
    format_field, print_list, print_summary, render_list, render_rules, render_summary,
};
