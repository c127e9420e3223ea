//! Logging setup for the sanitize tools
//!
//! Human-readable events go to stderr so stdout stays free for results.
//! Optionally, JSON events are also written to a daily-rolling file.

mod logging;

pub use logging::{init, LogOptions};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Default directory for file logs, under the user's data directory
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "takawasi", "sanitize")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
