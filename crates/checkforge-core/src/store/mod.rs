//! Key-value storage abstraction for persisted collections.
//!
//! Every collection (layouts, presets, templates, export records, settings)
//! lives under its own string key as a JSON document. Components receive
//! the store they need; there is no ambient global store.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key holding saved check templates.
pub const TEMPLATES_KEY: &str = "checkTemplates";
/// Key holding named layouts.
pub const LAYOUTS_KEY: &str = "checkLayouts";
/// Key holding layout presets.
pub const PRESETS_KEY: &str = "layoutPresets";
/// Key holding provenance records of exported checks.
pub const EXPORTS_KEY: &str = "exportedChecks";
/// Key holding application settings.
pub const SETTINGS_KEY: &str = "appSettings";

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { key: String, needed: usize, limit: usize },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, PersistenceError>;

/// Trait for key-value storage backends.
///
/// Each key is read and written independently; there are no transactions
/// across keys.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// List all keys.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Trait for key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// List all keys.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Read a JSON collection, treating an absent or malformed value as empty.
///
/// Backend failures still propagate so callers can tell "nothing stored"
/// from "store unreadable".
pub fn read_collection<T, S>(store: &S, key: &str) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            log::warn!("Ignoring malformed {key} collection: {e}");
            Ok(T::default())
        }
    }
}

/// Serialize and write a JSON collection.
pub fn write_collection<T, S>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)
        .map_err(|e| PersistenceError::Serialization(e.to_string()))?;
    store.set(key, &json).inspect_err(|e| {
        log::error!("Failed to write {key}: {e}");
    })
}
