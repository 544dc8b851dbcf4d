//! Errors for stoppuhr.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = TimerError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("Timer is already running")]
    AlreadyRunning,
    #[error("Timer is not running")]
    NotRunning,
    #[error("Timer '{name}' does not exist ({path:?})")]
    NotFound { name: String, path: PathBuf },
    #[error("Invalid timer: {0}")]
    Invalid(String),
    #[error("Invalid timer name '{0}'")]
    InvalidName(String),
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode timer {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to encode timer: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to remove {path:?}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to list timers in {dir:?}: {source}")]
    DirectoryList {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Some timers couldn't be removed: {}", .failed.join(", "))]
    ClearAll { failed: Vec<String> },
    #[error("Location: {0}")]
    Location(String),
}
