//! Provenance records of exported checks.

use crate::fields::CheckFields;
use crate::ids::iso_timestamp;
use crate::store::{EXPORTS_KEY, KeyValueStore, StoreResult, read_collection, write_collection};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What was exported, when, and under which fingerprint.
///
/// Only `verified` and `verified_at` change after the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceRecord {
    pub id: String,
    pub timestamp: String,
    pub check_data: CheckFields,
    pub filename: String,
    pub hash: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<String>,
}

impl ProvenanceRecord {
    /// Whether any of the searchable fields contains `needle`
    /// (already lowercased).
    fn contains(&self, needle: &str) -> bool {
        [
            &self.id,
            &self.hash,
            &self.filename,
            &self.check_data.check_number,
            &self.check_data.pay_to,
            &self.check_data.account_holder,
        ]
        .into_iter()
        .any(|text| text.to_lowercase().contains(needle))
    }

    fn exported_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }
}

/// Result of pruning old export records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: usize,
    pub remaining: usize,
}

/// Append-only log of export records under `exportedChecks`.
pub struct ExportRecords<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Clone for ExportRecords<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore + ?Sized> ExportRecords<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All records in storage (export) order.
    pub fn all(&self) -> StoreResult<Vec<ProvenanceRecord>> {
        read_collection(&*self.store, EXPORTS_KEY)
    }

    /// Append a record to the log.
    pub fn append(&self, record: ProvenanceRecord) -> StoreResult<()> {
        let mut records = self.all()?;
        log::debug!("Recording export {} ({})", record.id, record.filename);
        records.push(record);
        write_collection(&*self.store, EXPORTS_KEY, &records)
    }

    /// The record with the given id.
    pub fn get(&self, id: &str) -> StoreResult<Option<ProvenanceRecord>> {
        Ok(self.all()?.into_iter().find(|record| record.id == id))
    }

    /// Records whose id, fingerprint, filename, check number, payee or
    /// account holder contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> StoreResult<Vec<ProvenanceRecord>> {
        let needle = query.to_lowercase();
        Ok(self
            .all()?
            .into_iter()
            .filter(|record| record.contains(&needle))
            .collect())
    }

    /// Flag a record as verified. Returns the updated record, or `None` when
    /// no record has that id.
    pub fn mark_verified(&self, id: &str, now: DateTime<Utc>) -> StoreResult<Option<ProvenanceRecord>> {
        let mut records = self.all()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };
        record.verified = true;
        record.verified_at = Some(iso_timestamp(now));
        let updated = record.clone();
        write_collection(&*self.store, EXPORTS_KEY, &records)?;
        Ok(Some(updated))
    }

    /// Drop records exported more than `days` days before `now`.
    ///
    /// Records with an unreadable timestamp are dropped as well. A retention
    /// period reaching past the representable range keeps every other record.
    pub fn cleanup(&self, days: i64, now: DateTime<Utc>) -> StoreResult<CleanupReport> {
        let cutoff = Duration::try_days(days).and_then(|period| now.checked_sub_signed(period));
        let records = self.all()?;
        let total = records.len();
        let recent: Vec<ProvenanceRecord> = records
            .into_iter()
            .filter(|record| {
                record
                    .exported_at()
                    .is_some_and(|at| cutoff.is_none_or(|cutoff| at > cutoff))
            })
            .collect();
        write_collection(&*self.store, EXPORTS_KEY, &recent)?;

        let report = CleanupReport {
            removed: total - recent.len(),
            remaining: recent.len(),
        };
        log::debug!("Export cleanup removed {} records", report.removed);
        Ok(report)
    }

    /// Remove every record.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(EXPORTS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn record(id: &str, payee: &str, at: DateTime<Utc>) -> ProvenanceRecord {
        ProvenanceRecord {
            id: id.to_string(),
            timestamp: iso_timestamp(at),
            check_data: CheckFields {
                pay_to: payee.to_string(),
                check_number: "1001".to_string(),
                account_holder: "Acme Corp".to_string(),
                ..CheckFields::default()
            },
            filename: format!("{payee}_Check.pdf"),
            hash: "1a2b3c".to_string(),
            verified: false,
            verified_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_append_preserves_order() {
        let records = ExportRecords::new(Arc::new(MemoryStore::new()));
        records.append(record("check_1", "Ada", now())).unwrap();
        records.append(record("check_2", "Grace", now())).unwrap();
        let ids: Vec<String> = records.all().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["check_1", "check_2"]);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(record("check_1", "Ada", now())).unwrap();
        assert_eq!(value["checkData"]["payTo"], "Ada");
        assert_eq!(value["verified"], false);
        assert!(value.get("verifiedAt").is_none());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = ExportRecords::new(Arc::new(MemoryStore::new()));
        records.append(record("check_1", "Ada Lovelace", now())).unwrap();
        records.append(record("check_2", "Grace Hopper", now())).unwrap();

        assert_eq!(records.search("LOVELACE").unwrap().len(), 1);
        assert_eq!(records.search("acme").unwrap().len(), 2);
        assert!(records.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_mark_verified() {
        let records = ExportRecords::new(Arc::new(MemoryStore::new()));
        records.append(record("check_1", "Ada", now())).unwrap();

        let updated = records.mark_verified("check_1", now()).unwrap().unwrap();
        assert!(updated.verified);
        assert_eq!(updated.verified_at.as_deref(), Some("2025-08-19T12:00:00.000Z"));
        assert_eq!(records.get("check_1").unwrap().unwrap(), updated);
        assert!(records.mark_verified("missing", now()).unwrap().is_none());
    }

    #[test]
    fn test_cleanup_drops_old_records() {
        let records = ExportRecords::new(Arc::new(MemoryStore::new()));
        records.append(record("old", "Ada", now() - Duration::days(45))).unwrap();
        records.append(record("new", "Grace", now() - Duration::days(2))).unwrap();

        let report = records.cleanup(30, now()).unwrap();
        assert_eq!(report, CleanupReport { removed: 1, remaining: 1 });
        assert!(records.get("old").unwrap().is_none());
        assert!(records.get("new").unwrap().is_some());
    }

    #[test]
    fn test_cleanup_with_huge_retention_keeps_records() {
        let records = ExportRecords::new(Arc::new(MemoryStore::new()));
        records.append(record("old", "Ada", now() - Duration::days(4000))).unwrap();
        records.append(record("new", "Grace", now())).unwrap();

        for days in [100_000_000, i64::MAX] {
            let report = records.cleanup(days, now()).unwrap();
            assert_eq!(report, CleanupReport { removed: 0, remaining: 2 });
        }
    }
}
