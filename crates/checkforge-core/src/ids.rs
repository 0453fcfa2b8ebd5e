//! Identifiers and timestamps for persisted entries.

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Length of the random suffix in generated ids.
const SUFFIX_LEN: usize = 9;

/// Generate an id of the form `{prefix}_{unix millis}_{random suffix}`.
pub fn generate_id(prefix: &str) -> String {
    generate_id_at(prefix, Utc::now())
}

/// Generate an id stamped with the given instant.
pub fn generate_id_at(prefix: &str, now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{prefix}_{}_{suffix}", now.timestamp_millis())
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2025-08-19T14:03:07.512Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an ISO-8601 timestamp.
pub fn timestamp_now() -> String {
    iso_timestamp(Utc::now())
}
