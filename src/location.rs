//! Where stoppuhr keeps its files.

use std::path::PathBuf;

use log::debug;

use crate::errors::*;
use crate::storage::Store;

pub const APP_NAME: &str = "stoppuhr";

/// Cache directory holding the timers and config directory reserved for settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub cache_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl Location {
    /// Resolve both directories from the user's environment.
    pub fn resolve() -> Result<Self> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| TimerError::Location("Could not find cache directory".to_string()))?
            .join(APP_NAME);
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimerError::Location("Could not find config directory".to_string()))?
            .join(APP_NAME);
        Ok(Self {
            cache_dir,
            config_dir,
        })
    }

    /// Keep timers in `dir` instead of the cache directory.
    pub fn with_cache_dir<P: Into<PathBuf>>(self, dir: P) -> Self {
        Self {
            cache_dir: dir.into(),
            ..self
        }
    }

    /// Create both directories if they don't exist yet.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.cache_dir, &self.config_dir] {
            debug!("Ensuring directory {:?}", dir);
            std::fs::create_dir_all(dir).map_err(|source| TimerError::Write {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn store(&self) -> Store {
        Store::new(&self.cache_dir)
    }
}
