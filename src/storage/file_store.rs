//! File-backed key-value store
//!
//! Each key lives in its own `<key>.json` file under the data directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::file_io::{read_text, write_text_atomic};
use super::KeyValueStore;
use crate::config::paths::XpensPaths;
use crate::error::XpensError;

/// Stores each record in a separate file, written atomically
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store records directly in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store records in the data directory of `paths`, creating it if needed
    pub fn open(paths: &XpensPaths) -> Result<Self, XpensError> {
        paths.ensure_directories()?;
        Ok(Self::new(paths.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, XpensError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(XpensError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, XpensError> {
        let path = self.path_for(key)?;
        read_text(&path)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), XpensError> {
        let path = self.path_for(key)?;
        write_text_atomic(&path, value)?;
        debug!(key, path = %path.display(), bytes = value.len(), "record written");
        Ok(())
    }
}
