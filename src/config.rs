//! Runtime configuration: where the database and log files live.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".task-list";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "todo.sqlite";
/// Sub-directory of the data directory holding rolling log files.
const LOG_DIR_NAME: &str = "logs";
/// Prefix of each daily log file.
pub const LOG_FILE_PREFIX: &str = "task-list.log";
/// Environment variable that relocates the whole data directory.
pub const HOME_ENV_VAR: &str = "TASK_LIST_HOME";

/// Resolved filesystem locations for one run of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_dir: PathBuf,
}

impl Config {
    /// Build the configuration from the environment, falling back to
    /// `~/.task-list` when `TASK_LIST_HOME` is unset or blank.
    pub fn from_env() -> Result<Self> {
        if let Some(dir) = override_dir(env::var(HOME_ENV_VAR).ok()) {
            return Ok(Self::with_data_dir(dir));
        }
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Use an explicit data directory.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

/// Interpret the raw `TASK_LIST_HOME` value. Unset or blank means "use the
/// default location".
fn override_dir(value: Option<String>) -> Option<PathBuf> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
