use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{self, Context};
use serde::{Deserialize, Serialize};
use toml;

/// Where the ledger file and the two CSV exports live. Every field
/// has a default, so a missing or partial config still yields a
/// working setup.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ledger_file: PathBuf,
    pub students_csv: PathBuf,
    pub payments_csv: PathBuf,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            ledger_file: PathBuf::from("feebook.json"),
            students_csv: PathBuf::from("students.csv"),
            payments_csv: PathBuf::from("payments.csv"),
        }
    }
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        let config = toml::from_str(&file_content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    /// Reads `filepath` when it exists and falls back to the defaults
    /// without touching the filesystem when it does not.
    pub fn read_or_default(filepath: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
        if filepath.as_ref().exists() {
            return Self::read(filepath);
        }
        return Ok(AppConfig::default());
    }
}
