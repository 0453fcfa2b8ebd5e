//! Check form validation.
//!
//! Validators return an error message rather than failing; an empty error
//! map means the form is valid.

use crate::fields::{CheckField, CheckFields};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]+$").expect("valid phone regex"));
static ROUTING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{9}$").expect("valid routing number regex"));
static ACCOUNT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4,17}$").expect("valid account number regex"));
static CHECK_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,10}$").expect("valid check number regex"));
static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("valid amount regex"));
static ZIP_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("valid zip code regex"));

/// Largest amount a check may carry.
pub const MAX_AMOUNT: f64 = 999_999.99;

/// Longest accepted template name, in characters.
const MAX_TEMPLATE_NAME: usize = 50;

/// Date formats accepted on the form.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

pub fn required(value: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| "This field is required".to_string())
}

fn pattern(value: &str, regex: &Regex, message: &str) -> Option<String> {
    (!value.is_empty() && !regex.is_match(value)).then(|| message.to_string())
}

pub fn email(value: &str) -> Option<String> {
    pattern(value, &EMAIL, "Please enter a valid email address")
}

pub fn phone(value: &str) -> Option<String> {
    pattern(value, &PHONE, "Please enter a valid phone number")
}

pub fn routing_number(value: &str) -> Option<String> {
    pattern(value, &ROUTING_NUMBER, "Routing number must be exactly 9 digits")
}

pub fn account_number(value: &str) -> Option<String> {
    pattern(value, &ACCOUNT_NUMBER, "Account number must be 4-17 digits")
}

pub fn check_number(value: &str) -> Option<String> {
    pattern(value, &CHECK_NUMBER, "Check number must be 1-10 digits")
}

pub fn zip_code(value: &str) -> Option<String> {
    pattern(value, &ZIP_CODE, "Please enter a valid ZIP code")
}

pub fn amount(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    if !AMOUNT.is_match(value) {
        return Some("Please enter a valid amount (e.g., 123.45)".to_string());
    }
    let number: f64 = value.parse().unwrap_or(0.0);
    if number <= 0.0 {
        Some("Amount must be greater than 0".to_string())
    } else if number > MAX_AMOUNT {
        Some("Amount cannot exceed $999,999.99".to_string())
    } else {
        None
    }
}

/// Parse a form date in either ISO or US notation.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

/// A check may be dated today or earlier.
pub fn date(value: &str, today: NaiveDate) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match parse_date(value) {
        None => Some("Please enter a valid date".to_string()),
        Some(date) if date > today => Some("Date cannot be in the future".to_string()),
        Some(_) => None,
    }
}

/// Trimmed length must fall within `min..=max` characters. Empty values pass.
pub fn text_length(value: &str, min: usize, max: usize) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let length = value.trim().chars().count();
    (length < min || length > max).then(|| format!("Must be between {min} and {max} characters"))
}

/// Per-field errors for a check form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: BTreeMap<CheckField, String>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: CheckField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

fn validate_field(field: CheckField, value: &str, today: NaiveDate) -> Option<String> {
    let required_text = |max| required(value).or_else(|| text_length(value, 1, max));
    match field {
        CheckField::PayTo | CheckField::AccountHolder | CheckField::BankName => required_text(100),
        CheckField::Amount => required(value).or_else(|| amount(value)),
        CheckField::Date => required(value).or_else(|| date(value, today)),
        CheckField::CheckNumber => check_number(value),
        CheckField::Memo => text_length(value, 0, 100),
        CheckField::Address => text_length(value, 0, 200),
        CheckField::RoutingNumber => routing_number(value),
        CheckField::AccountNumber => account_number(value),
        CheckField::Signature => text_length(value, 0, 50),
        CheckField::AmountWords | CheckField::ParticipantId | CheckField::ReimbursementType => None,
    }
}

/// Validate every field of the check form against `today`.
pub fn validate_check_form(fields: &CheckFields, today: NaiveDate) -> FormValidation {
    const SCHEMA: [CheckField; 11] = [
        CheckField::PayTo,
        CheckField::Amount,
        CheckField::Date,
        CheckField::CheckNumber,
        CheckField::Memo,
        CheckField::AccountHolder,
        CheckField::BankName,
        CheckField::Address,
        CheckField::RoutingNumber,
        CheckField::AccountNumber,
        CheckField::Signature,
    ];

    let errors = SCHEMA
        .into_iter()
        .filter_map(|field| validate_field(field, fields.get(field), today).map(|e| (field, e)))
        .collect();
    FormValidation { errors }
}

/// Errors for a template about to be saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValidation {
    pub name: Option<String>,
    pub data: Option<String>,
    pub check_data: BTreeMap<CheckField, String>,
}

impl TemplateValidation {
    pub fn is_valid(&self) -> bool {
        self.name.is_none() && self.data.is_none() && self.check_data.is_empty()
    }
}

pub fn validate_template(name: &str, data: Option<&CheckFields>, today: NaiveDate) -> TemplateValidation {
    let name = if name.trim().is_empty() {
        Some("Template name is required".to_string())
    } else if name.chars().count() > MAX_TEMPLATE_NAME {
        Some("Template name must be 50 characters or less".to_string())
    } else {
        None
    };

    match data {
        Some(fields) => TemplateValidation {
            name,
            data: None,
            check_data: validate_check_form(fields, today).errors,
        },
        None => TemplateValidation {
            name,
            data: Some("Template must contain check data".to_string()),
            check_data: BTreeMap::new(),
        },
    }
}

/// Longest accepted search or lookup query, in characters.
pub const MAX_QUERY_LEN: usize = 100;

/// Validate a free-text search query: 2 to 100 characters, not blank.
pub fn validate_search_query(query: &str) -> Result<(), String> {
    validate_lookup_query(query)?;
    if query.chars().count() < 2 {
        return Err("Search query must be at least 2 characters".to_string());
    }
    Ok(())
}

/// Validate a record lookup query: not blank and at most 100 characters.
/// Single-character queries match one-digit check numbers.
pub fn validate_lookup_query(query: &str) -> Result<(), String> {
    if query.trim().is_empty() {
        Err("Search query is required".to_string())
    } else if query.chars().count() > MAX_QUERY_LEN {
        Err("Search query must be 100 characters or less".to_string())
    } else {
        Ok(())
    }
}

/// How to clean raw input before storing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Amount,
    Number,
}

pub fn clean_input(value: &str, kind: InputKind) -> String {
    match kind {
        InputKind::Text => value.trim().to_string(),
        InputKind::Amount => value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect(),
        InputKind::Number => value.chars().filter(char::is_ascii_digit).collect(),
    }
}

/// Two-decimal rendering of an amount, ignoring thousands separators;
/// unparseable input becomes `0.00`.
pub fn format_amount(value: &str) -> String {
    match value.trim().replace(',', "").parse::<f64>() {
        Ok(number) if number.is_finite() => format!("{number:.2}"),
        _ => "0.00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 19).unwrap()
    }

    fn valid_fields() -> CheckFields {
        CheckFields {
            pay_to: "Ada Lovelace".to_string(),
            amount: "123.45".to_string(),
            date: "2025-08-19".to_string(),
            check_number: "1001".to_string(),
            account_holder: "Analytical Engines".to_string(),
            bank_name: "First Bank".to_string(),
            routing_number: "123456789".to_string(),
            account_number: "987654321".to_string(),
            ..CheckFields::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let result = validate_check_form(&valid_fields(), today());
        assert!(result.is_valid(), "{:?}", result.errors);
    }

    #[test]
    fn test_empty_form_reports_required_fields() {
        let result = validate_check_form(&CheckFields::default(), today());
        let fields: Vec<CheckField> = result.errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec![
                CheckField::PayTo,
                CheckField::Amount,
                CheckField::Date,
                CheckField::BankName,
                CheckField::AccountHolder,
            ]
        );
        assert_eq!(result.error(CheckField::PayTo), Some("This field is required"));
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(amount("12.5"), None);
        assert_eq!(amount("12.345").as_deref(), Some("Please enter a valid amount (e.g., 123.45)"));
        assert_eq!(amount("0").as_deref(), Some("Amount must be greater than 0"));
        assert_eq!(amount("1000000").as_deref(), Some("Amount cannot exceed $999,999.99"));
        assert_eq!(amount("999999.99"), None);
        assert_eq!(amount("-1").as_deref(), Some("Please enter a valid amount (e.g., 123.45)"));
    }

    #[test]
    fn test_bank_numbers() {
        assert!(routing_number("12345678").is_some());
        assert!(routing_number("123456789").is_none());
        assert!(account_number("123").is_some());
        assert!(account_number("1234").is_none());
        assert!(check_number("12345678901").is_some());
        assert!(check_number("").is_none());
    }

    #[test]
    fn test_date_rules() {
        assert_eq!(date("2025-08-19", today()), None);
        assert_eq!(date("08/01/2025", today()), None);
        assert_eq!(date("2025-08-20", today()).as_deref(), Some("Date cannot be in the future"));
        assert_eq!(date("someday", today()).as_deref(), Some("Please enter a valid date"));
    }

    #[test]
    fn test_text_length_trims() {
        assert!(text_length(&"x".repeat(51), 0, 50).is_some());
        assert!(text_length(&format!("  {}  ", "x".repeat(50)), 0, 50).is_none());
        assert_eq!(
            text_length("   ", 1, 100).as_deref(),
            Some("Must be between 1 and 100 characters")
        );
    }

    #[test]
    fn test_contact_patterns() {
        assert!(email("ada@example.com").is_none());
        assert!(email("ada@example").is_some());
        assert!(phone("+1 (555) 010-9999").is_none());
        assert!(phone("call me").is_some());
        assert!(zip_code("12345-6789").is_none());
        assert!(zip_code("1234").is_some());
    }

    #[test]
    fn test_template_validation() {
        let result = validate_template("", None, today());
        assert_eq!(result.name.as_deref(), Some("Template name is required"));
        assert_eq!(result.data.as_deref(), Some("Template must contain check data"));

        let result = validate_template("Payroll", Some(&valid_fields()), today());
        assert!(result.is_valid());

        let long = "n".repeat(51);
        assert!(validate_template(&long, Some(&valid_fields()), today()).name.is_some());
    }

    #[test]
    fn test_search_query() {
        assert!(validate_search_query(" ").is_err());
        assert!(validate_search_query("a").is_err());
        assert!(validate_search_query("ab").is_ok());
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_lookup_query() {
        assert!(validate_lookup_query("7").is_ok());
        assert!(validate_lookup_query(&"q".repeat(100)).is_ok());
        assert!(validate_lookup_query("").is_err());
        assert!(validate_lookup_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_cleaning_and_formatting() {
        assert_eq!(clean_input("$1,234.50", InputKind::Amount), "1234.50");
        assert_eq!(clean_input("12-34", InputKind::Number), "1234");
        assert_eq!(clean_input("  hi ", InputKind::Text), "hi");
        assert_eq!(format_amount("5"), "5.00");
        assert_eq!(format_amount("abc"), "0.00");
        assert_eq!(format_amount("1,234.5"), "1234.50");
    }
}
