//! Application settings stored as a flat JSON object under `appSettings`.

use crate::snap::GRID_SIZE;
use crate::store::{
    KeyValueStore, SETTINGS_KEY, StoreResult, read_collection, write_collection,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Setting key for the snapping grid size in pixels.
pub const GRID_SIZE_KEY: &str = "gridSize";
/// Setting key for whether drags snap to the grid.
pub const SNAP_TO_GRID_KEY: &str = "snapToGrid";
/// Setting key for the export pixel density.
pub const RASTER_SCALE_KEY: &str = "rasterScale";

/// Designer configuration derived from settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerConfig {
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub raster_scale: f32,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_to_grid: false,
            raster_scale: 2.0,
        }
    }
}

/// Merged key-value settings.
pub struct Settings<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Settings<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every stored setting.
    pub fn get_all(&self) -> StoreResult<Map<String, Value>> {
        read_collection(&*self.store, SETTINGS_KEY)
    }

    /// Merge `changes` over the stored settings and return the result.
    pub fn save(&self, changes: Map<String, Value>) -> StoreResult<Map<String, Value>> {
        let mut settings = self.get_all()?;
        settings.extend(changes);
        write_collection(&*self.store, SETTINGS_KEY, &settings)?;
        Ok(settings)
    }

    /// The setting `key` decoded as `T`, or `default` when it is absent or
    /// has the wrong shape.
    pub fn get_value<T: DeserializeOwned>(&self, key: &str, default: T) -> StoreResult<T> {
        let settings = self.get_all()?;
        Ok(settings
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default))
    }

    /// Store a single setting.
    pub fn set_value(&self, key: &str, value: Value) -> StoreResult<()> {
        let mut settings = self.get_all()?;
        settings.insert(key.to_string(), value);
        write_collection(&*self.store, SETTINGS_KEY, &settings)
    }

    /// Designer configuration, with defaults for anything not set.
    pub fn designer_config(&self) -> StoreResult<DesignerConfig> {
        let defaults = DesignerConfig::default();
        Ok(DesignerConfig {
            grid_size: self.get_value(GRID_SIZE_KEY, defaults.grid_size)?,
            snap_to_grid: self.get_value(SNAP_TO_GRID_KEY, defaults.snap_to_grid)?,
            raster_scale: self.get_value(RASTER_SCALE_KEY, defaults.raster_scale)?,
        })
    }

    /// Remove every setting.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(SETTINGS_KEY)
    }
}
