//! Named layouts and layout presets persisted in a key-value store.

use crate::ids::{generate_id, timestamp_now};
use crate::layout::{Layout, SavedLayout};
use crate::store::{
    KeyValueStore, LAYOUTS_KEY, PRESETS_KEY, StoreResult, read_collection, write_collection,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A reusable, normalized layout with a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub layout: Layout,
    pub created_at: String,
    pub id: String,
}

/// Persists named layouts under `checkLayouts` and presets under
/// `layoutPresets`.
pub struct LayoutStore<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Clone for LayoutStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore + ?Sized> LayoutStore<S> {
    /// Create a layout store over the given backend.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All saved layouts keyed by name.
    pub fn all(&self) -> StoreResult<BTreeMap<String, SavedLayout>> {
        read_collection(&*self.store, LAYOUTS_KEY)
    }

    /// Names of all saved layouts.
    pub fn names(&self) -> StoreResult<Vec<String>> {
        Ok(self.all()?.into_keys().collect())
    }

    /// Save `layout` under `name`, replacing any layout of that name.
    pub fn save(&self, name: &str, layout: &Layout) -> StoreResult<SavedLayout> {
        let mut layouts = self.all()?;
        let saved = SavedLayout {
            layout: layout.clone(),
            saved_at: timestamp_now(),
            id: generate_id("layout"),
        };
        layouts.insert(name.to_string(), saved.clone());
        write_collection(&*self.store, LAYOUTS_KEY, &layouts)?;
        log::debug!("Saved layout {name:?} ({} elements)", layout.len());
        Ok(saved)
    }

    /// Load the layout saved under `name`.
    ///
    /// A missing name is not an error.
    pub fn load(&self, name: &str) -> StoreResult<Option<SavedLayout>> {
        Ok(self.all()?.remove(name))
    }

    /// Delete the layout saved under `name`. Deleting a missing name is a no-op.
    pub fn delete(&self, name: &str) -> StoreResult<()> {
        let mut layouts = self.all()?;
        if layouts.remove(name).is_some() {
            write_collection(&*self.store, LAYOUTS_KEY, &layouts)?;
            log::debug!("Deleted layout {name:?}");
        }
        Ok(())
    }

    /// All presets keyed by name.
    pub fn all_presets(&self) -> StoreResult<BTreeMap<String, Preset>> {
        read_collection(&*self.store, PRESETS_KEY)
    }

    /// Store a normalized copy of `layout` as a preset named `name`.
    pub fn create_preset(&self, name: &str, layout: &Layout, description: &str) -> StoreResult<Preset> {
        let preset = Preset {
            name: name.to_string(),
            description: description.to_string(),
            layout: layout.normalize(),
            created_at: timestamp_now(),
            id: generate_id("preset"),
        };
        let mut presets = self.all_presets()?;
        presets.insert(name.to_string(), preset.clone());
        write_collection(&*self.store, PRESETS_KEY, &presets)?;
        Ok(preset)
    }

    /// Load the preset named `name`.
    pub fn load_preset(&self, name: &str) -> StoreResult<Option<Preset>> {
        Ok(self.all_presets()?.remove(name))
    }

    /// Delete the preset named `name`. Deleting a missing name is a no-op.
    pub fn delete_preset(&self, name: &str) -> StoreResult<()> {
        let mut presets = self.all_presets()?;
        if presets.remove(name).is_some() {
            write_collection(&*self.store, PRESETS_KEY, &presets)?;
        }
        Ok(())
    }
}
