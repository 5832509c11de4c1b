//! Configuration loaded from a YAML file.

use crate::query::DEFAULT_PAGE_SIZE;
use eyre::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name inside the per-user config directory.
const CONFIG_FILE: &str = "tasktable.yml";

/// Default database file, relative to the working directory.
const DEFAULT_DATABASE: &str = "tasks.db";

/// Default export destination.
const DEFAULT_EXPORT_PATH: &str = "tasks.csv";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database: PathBuf,

    /// Rows per page in `list`
    pub page_size: u32,

    /// Where `export` writes when no path is given
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            page_size: DEFAULT_PAGE_SIZE,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config file is used if
    /// present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Per-user config file location: `<config_dir>/tasktable/tasktable.yml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasktable").join(CONFIG_FILE))
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes to null, not to an empty mapping
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(contents).context("Failed to parse config YAML")?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            eyre::bail!("page_size must be at least 1");
        }
        Ok(())
    }
}
