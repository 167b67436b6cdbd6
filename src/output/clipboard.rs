//! Clipboard payload and clipboard sinks.

use crate::cmd;
use crate::error::{NormalizerError, Result};
use crate::models::CidrRecord;
use itertools::Itertools;

/// Platform clipboard helpers, tried in order.
const PLATFORM_COMMANDS: [&str; 5] = [
    "pbcopy",
    "wl-copy",
    "xclip -selection clipboard",
    "xsel --clipboard --input",
    "clip",
];

/// Single-line HCL list of quoted `/32` blocks, e.g. `["10.0.0.1/32","10.0.0.2/32"]`.
///
/// No whitespace and no trailing newline; pasted verbatim into Terraform.
pub fn to_clipboard_text(records: &[CidrRecord]) -> String {
    format!("[{}]", records.iter().map(|r| r.quoted()).join(","))
}

/// Destination for the clipboard payload.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// OS clipboard reached through an external helper command.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    commands: Vec<String>,
}

impl SystemClipboard {
    /// Use `command` when given, otherwise try the platform helpers.
    pub fn new(command: Option<&str>) -> Self {
        let commands = match command {
            Some(c) => vec![c.to_string()],
            None => PLATFORM_COMMANDS.iter().map(|c| c.to_string()).collect(),
        };
        SystemClipboard { commands }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut failures = Vec::new();
        for command in &self.commands {
            match cmd::pipe_to(command, text) {
                Ok(()) => {
                    log::info!("Copied {} bytes to clipboard via {command}", text.len());
                    return Ok(());
                }
                Err(e) => {
                    log::debug!("clipboard helper {command} failed: {e}");
                    failures.push(format!("{command}: {e}"));
                }
            }
        }
        log::warn!("No working clipboard helper found");
        Err(NormalizerError::ClipboardUnavailable(failures.join("; ")))
    }
}

/// In-process clipboard, for headless front ends and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
