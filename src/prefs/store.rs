//! Key-value storage for persisted preferences.
//!
//! - `FileStore`: one JSON file per key under a directory (the platform
//!   config dir by default)
//! - `MemoryStore`: in-process map for tests and headless hosts

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::core::GameError;

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "parity-games";

/// String values addressed by fixed keys.
pub trait PreferenceStore {
    /// Stored value, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, GameError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store writing `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.config/parity-games` (or the platform equivalent).
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Store rooted at [`FileStore::default_dir`].
    #[must_use]
    pub fn in_config_dir() -> Self {
        Self::new(Self::default_dir())
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
