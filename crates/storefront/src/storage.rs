//! File-backed storage adapter.
//!
//! All keys live in a single JSON object file (`<data dir>/storage.json`).
//! Every read goes to disk and every write rewrites the whole file through a
//! temp file + rename, so the server and the CLI can share one store without
//! seeing torn writes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use minicart_core::{StorageAdapter, StorageError};
use tempfile::NamedTempFile;

use crate::config::StorageConfig;

/// Storage keys used by the shop.
pub mod keys {
    /// JSON array of cart line items.
    pub const CART: &str = "cart_items_v1";

    /// Mock session token.
    pub const TOKEN: &str = "token";

    /// Display name of the signed-in shopper.
    pub const USER_NAME: &str = "user_name";

    /// Email of the signed-in shopper.
    pub const USER_EMAIL: &str = "user_email";

    /// Color theme, `dark` or `light`.
    pub const THEME: &str = "theme";
}

type Entries = BTreeMap<String, String>;

/// Storage adapter persisting to a JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    quota_bytes: usize,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or lazily create) the store described by `config`.
    ///
    /// The data directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&config.data_dir)?;
        Ok(Self::with_path(config.file_path(), config.quota_bytes))
    }

    /// Use `path` as the storage file with the given size limit.
    #[must_use]
    pub const fn with_path(path: PathBuf, quota_bytes: usize) -> Self {
        Self {
            path,
            quota_bytes,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(entries)?;
        if encoded.len() > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                needed: encoded.len(),
                limit: self.quota_bytes,
            });
        }

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn modify(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Serialize(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file is corrupt, starting over"
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl StorageAdapter for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}
