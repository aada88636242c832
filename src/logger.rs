//! Logging setup.
//!
//! Library code logs through the `log` facade. The binary calls [`init`] once
//! to route records either to a log file (when enabled in the config) or to
//! stderr for warnings and errors only.

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::path::PathBuf;

use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};

/// Location of the log file under the local data directory
pub fn log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

fn base_dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
}

/// Install the global logger.
///
/// # Returns
/// The log file path when file logging is enabled, `None` otherwise.
///
/// # Errors
/// Fails if the log file cannot be opened or a logger is already installed.
pub fn init(enabled: bool) -> Result<Option<PathBuf>> {
    if !enabled {
        base_dispatch(LevelFilter::Warn)
            .chain(std::io::stderr())
            .apply()
            .context("Failed to install logger")?;
        return Ok(None);
    }

    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
    base_dispatch(LevelFilter::Debug)
        .chain(file)
        .apply()
        .context("Failed to install logger")?;

    log::info!("📝 Logging to {}", path.display());
    Ok(Some(path))
}
