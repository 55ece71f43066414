//! Configuration management for memfile.
//!
//! Loads configuration from ${MEMFILE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config template with comments, embedded at compile time.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

pub mod paths {
    //! Path resolution for memfile configuration and log files.
    //!
    //! MEMFILE_HOME resolution order:
    //! 1. MEMFILE_HOME environment variable (if set)
    //! 2. ~/.config/memfile (default)
    //! 3. ./.memfile when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the memfile home directory.
    pub fn memfile_home() -> PathBuf {
        if let Ok(home) = std::env::var("MEMFILE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".memfile"),
            |h| h.join(".config").join("memfile"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        memfile_home().join("config.toml")
    }

    /// Returns the default log file path.
    pub fn log_path() -> PathBuf {
        memfile_home().join("logs").join("memfile.log")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write a log file even when RUST_LOG is unset.
    pub enabled: bool,

    /// Filter directive used when RUST_LOG is unset.
    pub level: String,

    /// Log file path override.
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Returns the log file path, falling back to ${MEMFILE_HOME}/logs.
    pub fn effective_file(&self) -> PathBuf {
        self.file
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map_or_else(paths::log_path, expand_home)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory downloads are written into.
    pub export_dir: Option<String>,

    /// Replace existing files on download.
    pub overwrite_exports: bool,

    /// Logging settings.
    pub log: LogConfig,
}

impl Config {
    /// Reads `${MEMFILE_HOME}/config.toml`.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        toml::from_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Returns the export directory. Empty strings are treated as unset.
    pub fn effective_export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map_or_else(|| PathBuf::from("."), expand_home)
    }

    /// Writes the commented template to `path`. Never replaces an existing file.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        write_atomic(path, DEFAULT_CONFIG_TEMPLATE)
    }

    /// Returns the commented default template.
    pub fn template() -> &'static str {
        DEFAULT_CONFIG_TEMPLATE
    }
}

/// Writes `content` to a sibling temp file, then renames it over `path`.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let staging = path.with_extension("toml.tmp");
    fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("Failed to move config into place at {}", path.display()))
}

/// Expands a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
