//! Storage statistics, cleanup and reset.

use crate::records::{CleanupReport, ExportRecords};
use crate::settings::Settings;
use crate::store::{KeyValueStore, StoreResult};
use crate::templates::TemplateStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Default age in days after which export records are pruned.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Entry count and serialized size of one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStats {
    pub count: usize,
    pub size: usize,
}

/// Usage across the persisted collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub templates: CollectionStats,
    pub exports: CollectionStats,
    pub settings: CollectionStats,
}

impl StorageStats {
    /// Serialized size of all collections together.
    pub fn total_size(&self) -> usize {
        self.templates.size + self.exports.size + self.settings.size
    }
}

fn collection_stats<T: Serialize>(items: &T, count: usize) -> CollectionStats {
    CollectionStats {
        count,
        size: serde_json::to_string(items).map(|s| s.len()).unwrap_or(0),
    }
}

/// Housekeeping over templates, export records and settings.
pub struct Maintenance<S: KeyValueStore + ?Sized> {
    templates: TemplateStore<S>,
    exports: ExportRecords<S>,
    settings: Settings<S>,
}

impl<S: KeyValueStore + ?Sized> Maintenance<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            templates: TemplateStore::new(Arc::clone(&store)),
            exports: ExportRecords::new(Arc::clone(&store)),
            settings: Settings::new(store),
        }
    }

    /// Remove templates, export records and settings. Named layouts and
    /// presets are kept.
    pub fn clear_all(&self) -> StoreResult<()> {
        self.templates.clear()?;
        self.exports.clear()?;
        self.settings.clear()?;
        log::debug!("Cleared templates, export records and settings");
        Ok(())
    }

    pub fn stats(&self) -> StoreResult<StorageStats> {
        let templates = self.templates.all()?;
        let exports = self.exports.all()?;
        let settings = self.settings.get_all()?;

        Ok(StorageStats {
            templates: collection_stats(&templates, templates.len()),
            exports: collection_stats(&exports, exports.len()),
            settings: collection_stats(&settings, settings.len()),
        })
    }

    /// Prune export records older than `days` days.
    pub fn cleanup(&self, days: i64, now: DateTime<Utc>) -> StoreResult<CleanupReport> {
        self.exports.cleanup(days, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::new_record;
    use crate::fields::CheckFields;
    use crate::layout::Layout;
    use crate::layout_store::LayoutStore;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 19, 12, 0, 0).unwrap()
    }

    fn populated() -> (Arc<MemoryStore>, Maintenance<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        TemplateStore::new(store.clone())
            .save("Monthly", CheckFields::sample(), None)
            .unwrap();
        let exports = ExportRecords::new(store.clone());
        let fields = CheckFields::sample();
        exports
            .append(new_record(&fields, "a.pdf", now() - Duration::days(60)))
            .unwrap();
        exports.append(new_record(&fields, "b.pdf", now())).unwrap();
        Settings::new(store.clone()).set_value("theme", json!("dark")).unwrap();
        LayoutStore::new(store.clone()).save("kept", &Layout::defaults()).unwrap();
        (store.clone(), Maintenance::new(store))
    }

    #[test]
    fn test_stats() {
        let (_, maintenance) = populated();
        let stats = maintenance.stats().unwrap();
        assert_eq!(stats.templates.count, 1);
        assert_eq!(stats.exports.count, 2);
        assert_eq!(stats.settings.count, 1);
        assert_eq!(stats.settings.size, r#"{"theme":"dark"}"#.len());
        assert_eq!(
            stats.total_size(),
            stats.templates.size + stats.exports.size + stats.settings.size
        );
    }

    #[test]
    fn test_cleanup_uses_retention() {
        let (_, maintenance) = populated();
        let report = maintenance.cleanup(DEFAULT_RETENTION_DAYS, now()).unwrap();
        assert_eq!(report.removed, 1);
        assert_eq!(report.remaining, 1);
    }

    #[test]
    fn test_clear_all_keeps_layouts() {
        let (store, maintenance) = populated();
        maintenance.clear_all().unwrap();
        assert_eq!(maintenance.stats().unwrap().exports.count, 0);
        assert_eq!(maintenance.stats().unwrap().templates.count, 0);
        assert!(LayoutStore::new(store).load("kept").unwrap().is_some());
    }
}
