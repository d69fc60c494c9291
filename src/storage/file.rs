//! File-backed store.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tracing::debug;

use crate::storage::{PersistentStore, StorageError};

/// Store keeping every key in a single JSON document on disk.
///
/// Values are base64-encoded. Writes go to a sibling temporary file which is
/// then renamed over the document, so the document is always either the old
/// or the new version.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by the document at `path`. The file is created
    /// on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&contents).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_error = |source: io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let contents = serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let staging = self.path.with_extension("tmp");

        fs::write(&staging, contents).map_err(io_error)?;
        fs::rename(&staging, &self.path).map_err(io_error)?;

        debug!("wrote {} key(s) to {}", entries.len(), self.path.display());

        Ok(())
    }
}

impl PersistentStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let _guard = self.lock.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        let entries = self.load()?;

        entries
            .get(key)
            .map(|encoded| {
                BASE64
                    .decode(encoded)
                    .map_err(|source| StorageError::CorruptValue {
                        key: key.to_string(),
                        source,
                    })
            })
            .transpose()
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        let mut entries = self.load()?;

        entries.insert(key.to_string(), BASE64.encode(value));

        self.save(&entries)
    }
}
