//! JSON file logging.
//!
//! The terminal belongs to the UI, so events go to a file only. When no log
//! file can be opened the subscriber is not installed and events are dropped.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{default_log_path, LogSettings};

/// Overrides the configured level, e.g. `ASSESSOR_LOG=assessor_core=debug`.
pub const LOG_ENV: &str = "ASSESSOR_LOG";

/// Install the global subscriber. Returns the log file path when logging is on.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let path = settings.file.clone().or_else(default_log_path)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).ok();
    }

    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let layer = fmt::layer()
        .json()
        .with_writer(Mutex::new(file))
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .ok()?;
    Some(path)
}
