//! Looking up exported checks by id, fingerprint, filename, number or payee.

use crate::ids::iso_timestamp;
use crate::records::{ExportRecords, ProvenanceRecord};
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;

/// Number of searches kept in the history.
pub const HISTORY_LEN: usize = 5;

/// Outcome of a single lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// A matching record was found.
    Verified(ProvenanceRecord),
    /// The records were readable but nothing matched.
    NotFound,
    /// The records could not be read.
    Error(String),
}

impl LookupOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, LookupOutcome::Verified(_))
    }

    /// User-facing summary of the outcome.
    pub fn message(&self) -> &str {
        match self {
            LookupOutcome::Verified(_) => "Check verified successfully",
            LookupOutcome::NotFound => "No matching check found in our records",
            LookupOutcome::Error(message) => message,
        }
    }
}

/// One entry of the search history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub query: String,
    pub timestamp: String,
    pub found: bool,
}

/// Whether `record` matches `query`.
///
/// Id, fingerprint and check number must match exactly; filename and payee
/// match on a case-insensitive substring.
pub fn matches(record: &ProvenanceRecord, query: &str) -> bool {
    let lowered = query.to_lowercase();
    record.id == query
        || record.hash == query
        || record.filename.to_lowercase().contains(&lowered)
        || record.check_data.check_number == query
        || (!record.check_data.pay_to.is_empty()
            && record.check_data.pay_to.to_lowercase().contains(&lowered))
}

/// First record, in storage order, matching `query`.
pub fn find_record<'a>(records: &'a [ProvenanceRecord], query: &str) -> Option<&'a ProvenanceRecord> {
    records.iter().find(|record| matches(record, query))
}

/// A verification session: searches export records and remembers the most
/// recent queries.
pub struct RecordLookup<S: KeyValueStore + ?Sized> {
    records: ExportRecords<S>,
    history: VecDeque<SearchEntry>,
}

impl<S: KeyValueStore + ?Sized> RecordLookup<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            records: ExportRecords::new(store),
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Search for `query` now.
    pub fn search(&mut self, query: &str) -> LookupOutcome {
        self.search_at(query, Utc::now())
    }

    /// Search for `query`, stamping the history entry with `now`.
    ///
    /// A blank query is not searched and leaves the history untouched.
    pub fn search_at(&mut self, query: &str, now: DateTime<Utc>) -> LookupOutcome {
        if query.trim().is_empty() {
            return LookupOutcome::NotFound;
        }

        let records = match self.records.all() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Record lookup failed: {e}");
                return LookupOutcome::Error(format!(
                    "Verification service temporarily unavailable: {e}"
                ));
            }
        };

        let outcome = match find_record(&records, query) {
            Some(record) => LookupOutcome::Verified(record.clone()),
            None => LookupOutcome::NotFound,
        };

        self.history.push_front(SearchEntry {
            query: query.to_string(),
            timestamp: iso_timestamp(now),
            found: outcome.is_verified(),
        });
        self.history.truncate(HISTORY_LEN);
        outcome
    }

    /// Recent searches, newest first.
    pub fn history(&self) -> impl Iterator<Item = &SearchEntry> {
        self.history.iter()
    }
}
