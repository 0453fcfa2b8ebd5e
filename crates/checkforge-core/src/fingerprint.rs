//! Data fingerprint stored alongside exported checks.
//!
//! This is a 32-bit rolling hash over a canonical JSON rendering of the key
//! check fields. It identifies a record for lookup; it is not integrity
//! protection and anyone can forge a matching value.

use crate::fields::CheckFields;
use serde::Serialize;

/// Fields covered by the fingerprint, serialized in this order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Canonical<'a> {
    pay_to: &'a str,
    amount: &'a str,
    date: &'a str,
    check_number: &'a str,
    account_holder: &'a str,
}

/// Canonical JSON for the fingerprinted fields.
pub fn canonical_json(fields: &CheckFields) -> String {
    let canonical = Canonical {
        pay_to: &fields.pay_to,
        amount: &fields.amount,
        date: &fields.date,
        check_number: &fields.check_number,
        account_holder: &fields.account_holder,
    };
    // Serializing borrowed strings into a String cannot fail.
    serde_json::to_string(&canonical).unwrap_or_default()
}

/// `hash * 31 + unit` over UTF-16 code units with 32-bit wrapping,
/// rendered as the lowercase hex of its absolute value.
pub fn hash_text(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("{:x}", i64::from(hash).abs())
}

/// Fingerprint of a check's payee, amount, date, number and account holder.
pub fn fingerprint(fields: &CheckFields) -> String {
    hash_text(&canonical_json(fields))
}
