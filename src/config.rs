//! Configuration constants and environment settings.

use std::path::PathBuf;

/// File extensions accepted by the loader (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["csv", "tsv", "txt", "log"];

/// Number of lines sampled when scoring delimiter candidates.
pub const SAMPLE_LINES: usize = 1000;

/// Prefix of every persisted export file name.
pub const EXPORT_PREFIX: &str = "terraform_iocs";

/// Highest collision suffix tried before giving up on a unique export name.
pub const MAX_EXPORT_SUFFIX: u32 = 999;

pub const ENV_INPUT_DIR: &str = "TF_IOC_INPUT_DIR";
pub const ENV_OUTPUT_DIR: &str = "TF_IOC_OUTPUT_DIR";
pub const ENV_CLIPBOARD_CMD: &str = "TF_IOC_CLIPBOARD_CMD";

/// Runtime settings, read from the environment (and `.env` via dotenv in main).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit clipboard command, e.g. `xclip -selection clipboard`.
    pub clipboard_cmd: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            clipboard_cmd: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Config {
            input_dir: non_empty(ENV_INPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            output_dir: non_empty(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            clipboard_cmd: non_empty(ENV_CLIPBOARD_CMD),
        }
    }

    /// Create the input and output directories if missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.input_dir, &self.output_dir] {
            if !dir.exists() {
                log::info!("Creating directory {}", dir.display());
                std::fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}
