//! Logging setup for taskdeck
//!
//! Routes the `log` facade through fern, writing to stderr and to a log
//! file under the platform data directory. Fire-and-forget persistence
//! failures surface here and nowhere else.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};

static INSTALLED: OnceCell<PathBuf> = OnceCell::new();

/// Initialize the global logger from the logging configuration.
///
/// Does nothing when logging is disabled. Safe to call more than once;
/// only the first enabled call installs the dispatcher.
///
/// # Errors
/// Returns an error if the log directory cannot be created or the
/// dispatcher cannot be installed
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let log_path = match &config.file {
        Some(path) => path.clone(),
        None => default_log_path()?,
    };

    INSTALLED.get_or_try_init(|| -> Result<PathBuf> {
        install(&log_path)?;
        Ok(log_path.clone())
    })?;

    Ok(())
}

/// Path of the installed log file, if the logger has been initialized.
pub fn log_file_path() -> Option<PathBuf> {
    INSTALLED.get().cloned()
}

/// Default log file path under the platform data directory.
pub fn default_log_path() -> Result<PathBuf> {
    dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

fn install(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr())
        .chain(
            fern::log_file(log_path)
                .with_context(|| format!("Failed to open log file: {}", log_path.display()))?,
        )
        .apply()
        .context("Failed to install logger")?;

    Ok(())
}
