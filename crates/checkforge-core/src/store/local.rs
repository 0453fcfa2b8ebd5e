//! Browser `localStorage` implementation for WebAssembly.

use super::{KeyValueStore, PersistenceError, StoreResult};
use web_sys::Storage;

/// Storage backed by the window's `localStorage`.
///
/// Note: This is intentionally not Send/Sync since WASM is single-threaded
/// and `Storage` handles are not thread-safe.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Open the window's local storage.
    pub fn new() -> StoreResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| PersistenceError::Unavailable(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| PersistenceError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| PersistenceError::Unavailable(format!("Failed to read {key}: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        // Browsers report a full store as a thrown QuotaExceededError
        self.storage.set_item(key, value).map_err(|e| {
            let message = format!("{:?}", e);
            if message.contains("QuotaExceeded") {
                PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                    needed: key.len() + value.len(),
                    limit: 0,
                }
            } else {
                PersistenceError::Unavailable(format!("Failed to write {key}: {message}"))
            }
        })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| PersistenceError::Unavailable(format!("Failed to delete {key}: {:?}", e)))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let len = self
            .storage
            .length()
            .map_err(|e| PersistenceError::Unavailable(format!("localStorage error: {:?}", e)))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Ok(Some(key)) = self.storage.key(i) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
