//! Key-value storage adapter.
//!
//! The shop keeps all of its persistent state (cart, mock identity, theme)
//! as plain strings under fixed keys, the way a browser page would use local
//! storage. Adapters are synchronous and may fail; callers decide whether a
//! failure matters (in practice they log it and carry on with in-memory
//! state).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors a storage adapter can report.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store cannot be used at all (disabled, lock poisoned, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store's size limit.
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Size the store would have after the write.
        needed: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store's contents could not be encoded or decoded.
    #[error("storage encoding error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written or is full.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: StorageAdapter + ?Sized> StorageAdapter for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage, lost when dropped.
///
/// Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("lock poisoned".to_string())
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get("token").unwrap().is_none());

        storage.set("token", "abc").unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.len(), 1);

        storage.remove("token").unwrap();
        assert!(storage.get("token").unwrap().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("nothing").is_ok());
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let shared: Arc<dyn StorageAdapter> = Arc::new(storage.clone());
        shared.set("theme", "dark").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_quota_error_message() {
        let err = StorageError::QuotaExceeded {
            needed: 10,
            limit: 5,
        };
        assert_eq!(
            err.to_string(),
            "storage quota exceeded: 10 bytes needed, limit is 5"
        );
    }
}
