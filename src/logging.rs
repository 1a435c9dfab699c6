use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

pub const LOG_ENV: &str = "MSITE_LOG";

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("msite.log")
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs to `path`; the terminal is busy drawing the playground.
pub fn init_file(path: &Path) -> AppResult<()> {
    let file = File::create(path).map_err(|source| {
        AppError::io_with_context(source, format!("failed to create log file: {}", path.display()))
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::config(format!("failed to install logger: {err}")))
}

/// Logs to stderr so stdout stays machine-readable.
pub fn init_stderr() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| AppError::config(format!("failed to install logger: {err}")))
}
