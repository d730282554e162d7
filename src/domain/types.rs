// ==========================================
// Prospect Intake - Domain Types
// ==========================================
// Classification tags and rejection reasons shared by
// the engine, the exporter and the rejected-records sink
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ClassificationTag
// ==========================================
// Decided only by tax-ID membership in the existing system index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationTag {
    Insert, // not in the system of record yet
    Update, // already known to the system of record
}

impl ClassificationTag {
    /// Code expected by the downstream ingestion system (`tipo` field)
    pub fn wire_code(&self) -> &'static str {
        match self {
            ClassificationTag::Insert => "I",
            ClassificationTag::Update => "A",
        }
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationTag::Insert => write!(f, "INSERT"),
            ClassificationTag::Update => write!(f, "UPDATE"),
        }
    }
}

// ==========================================
// RejectionReason
// ==========================================
// Declaration order == validator execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InvalidTaxId,
    IncompleteName,
    InvalidBirthDate,
    InvalidEmail,
    InvalidPhone,
    InvalidPostalCode,
    AddressMismatch,
}

impl RejectionReason {
    /// All reasons, in validator execution order
    pub const ALL: [RejectionReason; 7] = [
        RejectionReason::InvalidTaxId,
        RejectionReason::IncompleteName,
        RejectionReason::InvalidBirthDate,
        RejectionReason::InvalidEmail,
        RejectionReason::InvalidPhone,
        RejectionReason::InvalidPostalCode,
        RejectionReason::AddressMismatch,
    ];

    /// Translation key under `locales/*.yml`
    pub fn i18n_key(&self) -> &'static str {
        match self {
            RejectionReason::InvalidTaxId => "reason.invalid_tax_id",
            RejectionReason::IncompleteName => "reason.incomplete_name",
            RejectionReason::InvalidBirthDate => "reason.invalid_birth_date",
            RejectionReason::InvalidEmail => "reason.invalid_email",
            RejectionReason::InvalidPhone => "reason.invalid_phone",
            RejectionReason::InvalidPostalCode => "reason.invalid_postal_code",
            RejectionReason::AddressMismatch => "reason.address_mismatch",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InvalidTaxId => write!(f, "INVALID_TAX_ID"),
            RejectionReason::IncompleteName => write!(f, "INCOMPLETE_NAME"),
            RejectionReason::InvalidBirthDate => write!(f, "INVALID_BIRTH_DATE"),
            RejectionReason::InvalidEmail => write!(f, "INVALID_EMAIL"),
            RejectionReason::InvalidPhone => write!(f, "INVALID_PHONE"),
            RejectionReason::InvalidPostalCode => write!(f, "INVALID_POSTAL_CODE"),
            RejectionReason::AddressMismatch => write!(f, "ADDRESS_MISMATCH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_wire_codes() {
        assert_eq!(ClassificationTag::Insert.wire_code(), "I");
        assert_eq!(ClassificationTag::Update.wire_code(), "A");
        assert_eq!(ClassificationTag::Update.to_string(), "UPDATE");
    }

    #[test]
    fn test_reason_keys_are_unique() {
        let keys: std::collections::HashSet<_> =
            RejectionReason::ALL.iter().map(|r| r.i18n_key()).collect();
        assert_eq!(keys.len(), RejectionReason::ALL.len());
    }
}
