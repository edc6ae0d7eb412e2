//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve the notes document path, log directory and log level from the
//!   environment with platform-conventional fallbacks.
//!
//! # Invariants
//! - Resolution never touches the filesystem.
//! - The resolved log directory is absolute (logging rejects relative dirs).

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_FILE_ENV: &str = "NOTEDECK_DATA_FILE";
pub const LOG_DIR_ENV: &str = "NOTEDECK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "NOTEDECK_LOG_LEVEL";

const APP_DIR_NAME: &str = "notedeck";
const DATA_FILE_NAME: &str = "notes.json";
const LOG_DIR_NAME: &str = "logs";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(value) => {
                write!(f, "{LOG_DIR_ENV} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_file = var(DATA_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(&var).join(DATA_FILE_NAME));

        let log_dir = match var(LOG_DIR_ENV) {
            Some(value) => {
                let path = PathBuf::from(&value);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(value));
                }
                path
            }
            None => absolute_or_temp(data_file.parent()).join(LOG_DIR_NAME),
        };

        let log_level = var(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            data_file,
            log_dir,
            log_level,
        })
    }
}

fn default_data_dir(var: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(xdg) = var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME);
    }
    std::env::temp_dir().join(APP_DIR_NAME)
}

fn absolute_or_temp(dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        _ => std::env::temp_dir().join(APP_DIR_NAME),
    }
}
