//! The flat set of check fields shared by the form, preview and export.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Values entered on the check form.
///
/// Every field is free text; missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckFields {
    pub pay_to: String,
    pub amount: String,
    pub amount_words: String,
    pub date: String,
    pub memo: String,
    pub check_number: String,
    pub account_number: String,
    pub routing_number: String,
    pub bank_name: String,
    pub account_holder: String,
    pub address: String,
    pub signature: String,
    pub participant_id: String,
    pub reimbursement_type: String,
}

impl CheckFields {
    /// Placeholder values used to preview a blank design.
    pub fn sample() -> Self {
        Self {
            pay_to: "Sample Payee Name".to_string(),
            amount: "1234.56".to_string(),
            amount_words: "One thousand two hundred thirty four dollars and 56/100".to_string(),
            date: "2025-08-19".to_string(),
            memo: "Sample Memo".to_string(),
            check_number: "001234".to_string(),
            account_number: "987654321".to_string(),
            routing_number: "123456789".to_string(),
            bank_name: "Bank Name".to_string(),
            account_holder: "Your Business Name".to_string(),
            address: "123 Bank Street Address\nCity, State 12345".to_string(),
            signature: "Sample Signature".to_string(),
            participant_id: "PART123".to_string(),
            reimbursement_type: "Sample Reimbursement".to_string(),
        }
    }

    /// Value of a single field.
    pub fn get(&self, field: CheckField) -> &str {
        match field {
            CheckField::PayTo => &self.pay_to,
            CheckField::Amount => &self.amount,
            CheckField::AmountWords => &self.amount_words,
            CheckField::Date => &self.date,
            CheckField::Memo => &self.memo,
            CheckField::CheckNumber => &self.check_number,
            CheckField::AccountNumber => &self.account_number,
            CheckField::RoutingNumber => &self.routing_number,
            CheckField::BankName => &self.bank_name,
            CheckField::AccountHolder => &self.account_holder,
            CheckField::Address => &self.address,
            CheckField::Signature => &self.signature,
            CheckField::ParticipantId => &self.participant_id,
            CheckField::ReimbursementType => &self.reimbursement_type,
        }
    }

    /// Mutable access to a single field.
    pub fn get_mut(&mut self, field: CheckField) -> &mut String {
        match field {
            CheckField::PayTo => &mut self.pay_to,
            CheckField::Amount => &mut self.amount,
            CheckField::AmountWords => &mut self.amount_words,
            CheckField::Date => &mut self.date,
            CheckField::Memo => &mut self.memo,
            CheckField::CheckNumber => &mut self.check_number,
            CheckField::AccountNumber => &mut self.account_number,
            CheckField::RoutingNumber => &mut self.routing_number,
            CheckField::BankName => &mut self.bank_name,
            CheckField::AccountHolder => &mut self.account_holder,
            CheckField::Address => &mut self.address,
            CheckField::Signature => &mut self.signature,
            CheckField::ParticipantId => &mut self.participant_id,
            CheckField::ReimbursementType => &mut self.reimbursement_type,
        }
    }
}

/// Names of the check form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckField {
    PayTo,
    Amount,
    AmountWords,
    Date,
    Memo,
    CheckNumber,
    AccountNumber,
    RoutingNumber,
    BankName,
    AccountHolder,
    Address,
    Signature,
    ParticipantId,
    ReimbursementType,
}

impl CheckField {
    /// The wire name of this field.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckField::PayTo => "payTo",
            CheckField::Amount => "amount",
            CheckField::AmountWords => "amountWords",
            CheckField::Date => "date",
            CheckField::Memo => "memo",
            CheckField::CheckNumber => "checkNumber",
            CheckField::AccountNumber => "accountNumber",
            CheckField::RoutingNumber => "routingNumber",
            CheckField::BankName => "bankName",
            CheckField::AccountHolder => "accountHolder",
            CheckField::Address => "address",
            CheckField::Signature => "signature",
            CheckField::ParticipantId => "participantId",
            CheckField::ReimbursementType => "reimbursementType",
        }
    }
}

impl fmt::Display for CheckField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let fields: CheckFields = serde_json::from_str(r#"{"payTo":"Ada","amount":"5"}"#).unwrap();
        assert_eq!(fields.pay_to, "Ada");
        assert_eq!(fields.amount, "5");
        assert_eq!(fields.memo, "");
    }

    #[test]
    fn test_wire_names_match_serde() {
        let value = serde_json::to_value(CheckFields::sample()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 14);
        assert!(object.contains_key(CheckField::ReimbursementType.as_str()));
        assert!(object.contains_key(CheckField::PayTo.as_str()));
    }

    #[test]
    fn test_get_mut() {
        let mut fields = CheckFields::default();
        *fields.get_mut(CheckField::Memo) = "rent".to_string();
        assert_eq!(fields.get(CheckField::Memo), "rent");
    }
}
