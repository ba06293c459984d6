//! Optional settings read from `~/.ai-library-manager/config.ron`. Every field
//! has a default, so a missing file (the common case) yields the stock desk:
//! twenty AI titles, five copies each, open to BS AI students.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use serde::Deserialize;

use crate::error::ConfigError;

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".ai-library-manager";
/// Config file name stored inside the application data directory.
const CONFIG_FILE_NAME: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing_subscriber` filter directive for the log file.
    pub log_level: String,
    /// Degree a reader must enter to get past the login screen.
    pub required_degree: String,
    /// Copies placed on the shelf for every title at startup.
    pub initial_quantity: u32,
    /// Replacement for the built-in catalog, in display order.
    pub catalog: Option<Vec<SeedBook>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            required_degree: "BS AI".to_string(),
            initial_quantity: 5,
            catalog: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedBook {
    pub title: String,
    pub author: String,
}

impl Config {
    /// Parse a RON document. Fields left out fall back to their defaults.
    pub fn from_ron(path: &Path, text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the config at `path`, treating a missing file as "use defaults".
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron(path, &text),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Resolve the application data directory inside the user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Absolute path of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}
