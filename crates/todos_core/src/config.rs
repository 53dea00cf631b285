//! Runtime configuration and per-user data locations.
//!
//! # Responsibility
//! - Resolve the application-data directory holding `todos.json` and logs.
//! - Resolve the default log level.
//!
//! # Invariants
//! - Resolved directories are absolute.
//! - Environment overrides are trimmed; blank values fall back to defaults.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "TODOS_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "TODOS_LOG_LEVEL";

const APP_DIR_NAME: &str = "todos";
const STORE_FILE_NAME: &str = "todos.json";
const LOG_DIR_NAME: &str = "logs";

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The platform has no per-user data directory.
    NoDataDir,
    /// An override path is not absolute.
    InvalidPath(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(f, "could not determine the application data directory"),
            Self::InvalidPath(value) => {
                write!(f, "data directory must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved configuration for one application session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodosConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl TodosConfig {
    /// Builds a config rooted at an explicit directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
        }
    }

    /// Resolves config from `TODOS_DATA_DIR` / `TODOS_LOG_LEVEL`, falling back
    /// to the platform data directory and the build-mode log level.
    pub fn from_env() -> Result<Self, ConfigError> {
        resolve(
            std::env::var(DATA_DIR_ENV).ok().as_deref(),
            std::env::var(LOG_LEVEL_ENV).ok().as_deref(),
            dirs::data_dir(),
        )
    }

    /// Location of the persisted collection.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Directory for rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn resolve(
    data_dir_override: Option<&str>,
    log_level_override: Option<&str>,
    platform_data_dir: Option<PathBuf>,
) -> Result<TodosConfig, ConfigError> {
    let data_dir = match non_blank(data_dir_override) {
        Some(raw) => {
            let path = Path::new(raw);
            if !path.is_absolute() {
                return Err(ConfigError::InvalidPath(raw.to_string()));
            }
            path.to_path_buf()
        }
        None => platform_data_dir
            .ok_or(ConfigError::NoDataDir)?
            .join(APP_DIR_NAME),
    };

    let log_level = non_blank(log_level_override)
        .unwrap_or(default_log_level())
        .to_string();

    Ok(TodosConfig {
        data_dir,
        log_level,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
