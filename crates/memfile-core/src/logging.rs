//! File logging.
//!
//! The TUI owns stdout/stderr, so log output always goes to a file through a
//! non-blocking writer. Logging is off unless `[log].enabled` is set or
//! `RUST_LOG` is present in the environment.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Installs the global subscriber.
///
/// Returns the writer guard; dropping it flushes and stops the writer, so the
/// caller keeps it alive for the whole process. Returns `None` when logging
/// is disabled or another global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if !config.enabled && !from_env {
        return Ok(None);
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level '{}'", config.level))?,
    };

    let path = config.effective_file();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path {}", path.display()))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // Another subscriber (tests, embedding) keeps priority; the writer is unused then.
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_err()
    {
        return Ok(None);
    }

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(Some(guard))
}
