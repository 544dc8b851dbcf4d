//! Persistence of timers.
//!
//! Every timer lives in its own json file `<name>.json` inside one flat
//! directory. Nothing guards against two processes writing the same file at
//! once, the last write wins.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::errors::*;
use crate::timer::Timer;

/// Extension of timer files.
pub const EXTENSION: &str = "json";

/// Name used when the user does not pick one.
pub const DEFAULT_TIMER_NAME: &str = "default";

/// A timer together with the name of the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTimer {
    pub name: String,
    pub timer: Timer,
}

/// Directory of timer files.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing timer `name`.
    ///
    /// Names that would point outside of the directory are rejected.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(TimerError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", name, EXTENSION)))
    }

    /// Read timer `name`.
    ///
    /// A missing file yields a fresh timer unless `must_exist` is set.
    pub fn load(&self, name: &str, must_exist: bool) -> Result<Timer> {
        let path = self.path(name)?;
        debug!("Loading timer from {:?}", path);
        match File::open(&path) {
            Ok(f) => {
                let mut reader = BufReader::new(f);
                from_reader(&mut reader).map_err(|source| TimerError::Decode { path, source })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if must_exist {
                    Err(TimerError::NotFound {
                        name: name.to_string(),
                        path,
                    })
                } else {
                    debug!("No timer '{}' yet, starting from zero", name);
                    Ok(Timer::new())
                }
            }
            Err(source) => Err(TimerError::Read { path, source }),
        }
    }

    /// Write `timer` as `name`, replacing what was stored before.
    pub fn dump(&self, timer: &Timer, name: &str) -> Result<()> {
        let path = self.path(name)?;
        let data = serde_json::to_vec(timer)?;
        debug!("Dumping timer to {:?}", path);
        fs::write(&path, data).map_err(|source| TimerError::Write { path, source })
    }

    /// Read every timer of the directory, sorted by name.
    ///
    /// Files that fail to load are logged and skipped. Only a directory that
    /// can't be listed is an error.
    pub fn load_all(&self) -> Result<Vec<NamedTimer>> {
        let mut timers = Vec::new();
        for (name, _) in self.timer_files()? {
            match self.load(&name, true) {
                Ok(timer) => timers.push(NamedTimer { name, timer }),
                Err(e) => warn!("Skipping timer '{}' that failed to load: {}", name, e),
            }
        }
        Ok(timers)
    }

    /// Remove the file of timer `name`.
    pub fn clear(&self, name: &str) -> Result<()> {
        let path = self.path(name)?;
        debug!("Clearing timer file {:?}", path);
        fs::remove_file(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TimerError::NotFound {
                name: name.to_string(),
                path,
            },
            _ => TimerError::Delete { path, source },
        })
    }

    /// Remove every timer file.
    ///
    /// Keeps going after a failed removal. All timers that could not be
    /// removed are reported together at the end.
    pub fn clear_all(&self) -> Result<()> {
        self.clear_all_with(|path| fs::remove_file(path))
    }

    fn clear_all_with<F>(&self, mut remove: F) -> Result<()>
    where
        F: FnMut(&Path) -> io::Result<()>,
    {
        let mut failed = Vec::new();
        for (name, path) in self.timer_files()? {
            debug!("Clearing timer file {:?}", path);
            if let Err(e) = remove(&path) {
                error!("Couldn't remove timer file {:?}: {}", path, e);
                failed.push(name);
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(TimerError::ClearAll { failed })
        }
    }

    /// Regular files with the timer extension, as `(name, path)` sorted by path.
    fn timer_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| TimerError::DirectoryList {
            dir: self.dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };
            if !path.is_file() || path.extension() != Some(OsStr::new(EXTENSION)) {
                continue;
            }
            match path.file_stem().and_then(OsStr::to_str) {
                Some(name) => files.push((name.to_string(), path.clone())),
                None => warn!("Skipping timer file with a non utf-8 name {:?}", path),
            }
        }
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}

/// Deserialize json buffer.
fn from_reader<R: Read>(reader: &mut R) -> serde_json::Result<Timer> {
    serde_json::from_reader(reader)
}
