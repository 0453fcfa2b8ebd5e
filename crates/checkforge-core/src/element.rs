//! Positionable regions of the check template.

use crate::layout::Layout;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the fixed regions a user can reposition.
///
/// The set is closed: every layout is keyed by exactly these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementId {
    Logo,
    CompanyInfo,
    ReimbursementType,
    CheckNumber,
    Date,
    PayToLine,
    Amount,
    AmountWords,
    ParticipantInfo,
    Signature,
    MicrLine,
    StubParticipant,
    ClaimsTable,
    BalancesTable,
}

impl ElementId {
    /// Every element, in template order.
    pub const ALL: [ElementId; 14] = [
        ElementId::Logo,
        ElementId::CompanyInfo,
        ElementId::ReimbursementType,
        ElementId::CheckNumber,
        ElementId::Date,
        ElementId::PayToLine,
        ElementId::Amount,
        ElementId::AmountWords,
        ElementId::ParticipantInfo,
        ElementId::Signature,
        ElementId::MicrLine,
        ElementId::StubParticipant,
        ElementId::ClaimsTable,
        ElementId::BalancesTable,
    ];

    /// The wire name of this element.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::Logo => "logo",
            ElementId::CompanyInfo => "companyInfo",
            ElementId::ReimbursementType => "reimbursementType",
            ElementId::CheckNumber => "checkNumber",
            ElementId::Date => "date",
            ElementId::PayToLine => "payToLine",
            ElementId::Amount => "amount",
            ElementId::AmountWords => "amountWords",
            ElementId::ParticipantInfo => "participantInfo",
            ElementId::Signature => "signature",
            ElementId::MicrLine => "micrLine",
            ElementId::StubParticipant => "stubParticipant",
            ElementId::ClaimsTable => "claimsTable",
            ElementId::BalancesTable => "balancesTable",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown element id: {s}"))
    }
}

/// Default offsets: every element at the origin of its anchor.
pub fn default_positions() -> Layout {
    ElementId::ALL
        .into_iter()
        .map(|id| (id, Point::ZERO))
        .collect()
}
