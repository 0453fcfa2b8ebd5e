//! Export preconditions, file naming and provenance records.
//!
//! Rasterization and PDF assembly live in the render crate; this module holds
//! the parts of an export that do not touch pixels.

use crate::fields::CheckFields;
use crate::fingerprint::fingerprint;
use crate::ids::{generate_id_at, iso_timestamp};
use crate::records::ProvenanceRecord;
use crate::store::PersistenceError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export disabled: {0}")]
    Disabled(String),
    #[error("Failed to export PDF: {0}")]
    Rasterization(String),
    #[error("Failed to record export: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Check that the fields carry what an export needs: a payee and an amount.
pub fn ensure_exportable(fields: &CheckFields) -> Result<(), ExportError> {
    if fields.pay_to.is_empty() || fields.amount.is_empty() {
        return Err(ExportError::Disabled(
            "Please fill in required fields (Pay To and Amount) to enable export".to_string(),
        ));
    }
    Ok(())
}

/// File name for a check exported at `now`, e.g.
/// `Jane_Doe_Check_2025-08-19T14-03-07.pdf`.
///
/// Every character of the payee outside `[A-Za-z0-9]` becomes `_`; an empty
/// payee is named `Check`.
pub fn export_filename(payee: &str, now: DateTime<Utc>) -> String {
    let payee = if payee.is_empty() {
        "Check".to_string()
    } else {
        payee
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    let timestamp = now.format("%Y-%m-%dT%H-%M-%S");
    format!("{payee}_Check_{timestamp}.pdf")
}

/// Provenance record for fields exported as `filename` at `now`.
pub fn new_record(fields: &CheckFields, filename: &str, now: DateTime<Utc>) -> ProvenanceRecord {
    ProvenanceRecord {
        id: generate_id_at("check", now),
        timestamp: iso_timestamp(now),
        check_data: fields.clone(),
        filename: filename.to_string(),
        hash: fingerprint(fields),
        verified: false,
        verified_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 19, 14, 3, 7).unwrap()
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            export_filename("Jane Doe", now()),
            "Jane_Doe_Check_2025-08-19T14-03-07.pdf"
        );
        assert_eq!(
            export_filename("O'Brien & Sons", now()),
            "O_Brien___Sons_Check_2025-08-19T14-03-07.pdf"
        );
        assert_eq!(export_filename("", now()), "Check_Check_2025-08-19T14-03-07.pdf");
    }

    #[test]
    fn test_non_ascii_payee_is_replaced() {
        assert_eq!(
            export_filename("Zoë", now()),
            "Zo__Check_2025-08-19T14-03-07.pdf"
        );
    }

    #[test]
    fn test_requires_payee_and_amount() {
        let mut fields = CheckFields::default();
        assert!(matches!(ensure_exportable(&fields), Err(ExportError::Disabled(_))));
        fields.pay_to = "Ada".to_string();
        assert!(matches!(ensure_exportable(&fields), Err(ExportError::Disabled(_))));
        fields.amount = "10".to_string();
        assert!(ensure_exportable(&fields).is_ok());
    }

    #[test]
    fn test_new_record() {
        let fields = CheckFields {
            pay_to: "Ada".to_string(),
            amount: "10".to_string(),
            ..CheckFields::default()
        };
        let record = new_record(&fields, "Ada_Check.pdf", now());
        assert!(record.id.starts_with(&format!("check_{}_", now().timestamp_millis())));
        assert_eq!(record.timestamp, "2025-08-19T14:03:07.000Z");
        assert_eq!(record.hash, fingerprint(&fields));
        assert!(!record.verified);
        assert_eq!(record.check_data, fields);
    }
}
