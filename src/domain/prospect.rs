// ==========================================
// Prospect Intake - Prospect Domain Model
// ==========================================
// Lifecycle: one input row → RawProspectRecord (field mapping)
//            → ProspectRecord (normalization)
//            → rejected (with reasons) | accepted (with tag)
// ==========================================

use crate::domain::types::{ClassificationTag, RejectionReason};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// RawProspectRecord - field mapping output
// ==========================================
// Values exactly as read from the source, keyed by semantic field.
// Absent cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProspectRecord {
    // ===== Person =====
    pub name: String,
    pub tax_id: String,
    pub birth_date: String,
    pub email: String,
    pub phone: String,

    // ===== Address =====
    pub postal_code: String,
    pub street: String,
    pub street_number: String,
    pub district: String,
    pub city: String,
    pub region: String,

    // ===== Enrollment =====
    pub institution: String,
    pub course: String,
    pub registration_code: String,

    // ===== Provenance =====
    pub row_index: usize, // 0-based data row position in the source sheet
}

// ==========================================
// BirthDate
// ==========================================
// Parse failure is data, not an error: the birth-date
// validator turns `Unparsable` into a rejection reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BirthDate {
    Parsed(NaiveDate),
    Unparsable(String),
}

impl BirthDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            BirthDate::Parsed(date) => Some(*date),
            BirthDate::Unparsable(_) => None,
        }
    }

    /// Canonical text form (`YYYY-MM-DD`, or the raw text when unparsable)
    pub fn to_canonical_string(&self) -> String {
        match self {
            BirthDate::Parsed(date) => date.format("%Y-%m-%d").to_string(),
            BirthDate::Unparsable(raw) => raw.clone(),
        }
    }
}

// ==========================================
// ProspectRecord - normalized record
// ==========================================
// Invariants after normalization:
// - tax_id is exactly 11 ASCII digits
// - postal_code is exactly 8 ASCII digits
// - phone holds digits only (unpadded)
// Equality covers every field; it is the de-duplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProspectRecord {
    pub name: String,
    pub tax_id: String,
    pub birth_date: BirthDate,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub street: String,
    pub street_number: String,
    pub district: String,
    pub city: String,
    pub region: String,
    pub institution: String,
    pub course: String,
    pub registration_code: String,
}

impl ProspectRecord {
    /// Back to the raw shape (normalized values as text).
    ///
    /// Used by the rejected-records sink and for re-normalization.
    pub fn to_raw(&self, row_index: usize) -> RawProspectRecord {
        RawProspectRecord {
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            birth_date: self.birth_date.to_canonical_string(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            postal_code: self.postal_code.clone(),
            street: self.street.clone(),
            street_number: self.street_number.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            region: self.region.clone(),
            institution: self.institution.clone(),
            course: self.course.clone(),
            registration_code: self.registration_code.clone(),
            row_index,
        }
    }
}

/// A normalized record together with its source position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectRow {
    pub row_index: usize,
    pub record: ProspectRecord,
}

// ==========================================
// PostalAddress - postal lookup response
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub district: String,
    pub city: String,
    pub region: String,
}

// ==========================================
// ValidationOutcome
// ==========================================
// Empty reason list ⇒ valid. Reasons keep validator execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    reasons: Vec<RejectionReason>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reason: RejectionReason) {
        self.reasons.push(reason);
    }

    pub fn is_valid(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reasons(&self) -> &[RejectionReason] {
        &self.reasons
    }

    pub fn into_reasons(self) -> Vec<RejectionReason> {
        self.reasons
    }
}

// ==========================================
// Classification results
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub row: ProspectRow,
    pub reasons: Vec<RejectionReason>,
    pub reason_text: String, // reasons localized and joined with ", "
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub row: ProspectRow,
    pub tag: ClassificationTag,
}

// ==========================================
// RunSummary
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub total_read: usize,         // rows read from the input source
    pub duplicates_removed: usize, // exact duplicates collapsed by the normalizer
    pub total_valid: usize,
    pub total_invalid: usize,
    pub inserts: usize,
    pub updates: usize,
}

impl RunSummary {
    pub fn total_after_dedup(&self) -> usize {
        self.total_read.saturating_sub(self.duplicates_removed)
    }

    /// Records neither valid nor invalid. Anything but zero is a pipeline defect.
    pub fn unaccounted(&self) -> i64 {
        self.total_after_dedup() as i64 - self.total_valid as i64 - self.total_invalid as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProspectRecord {
        ProspectRecord {
            name: "MARIA SILVA".to_string(),
            tax_id: "11144477735".to_string(),
            birth_date: BirthDate::Parsed(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()),
            email: "maria@example.com".to_string(),
            phone: "11999999999".to_string(),
            postal_code: "01310100".to_string(),
            street: "AVENIDA PAULISTA".to_string(),
            street_number: "1000".to_string(),
            district: "BELA VISTA".to_string(),
            city: "SÃO PAULO".to_string(),
            region: "SP".to_string(),
            institution: "unifoo".to_string(),
            course: "DIREITO".to_string(),
            registration_code: "RA123".to_string(),
        }
    }

    #[test]
    fn test_birth_date_canonical_string() {
        let parsed = BirthDate::Parsed(NaiveDate::from_ymd_opt(2001, 2, 3).unwrap());
        assert_eq!(parsed.to_canonical_string(), "2001-02-03");
        assert_eq!(parsed.as_date(), NaiveDate::from_ymd_opt(2001, 2, 3));

        let unparsable = BirthDate::Unparsable("31/31/2000".to_string());
        assert_eq!(unparsable.to_canonical_string(), "31/31/2000");
        assert_eq!(unparsable.as_date(), None);
    }

    #[test]
    fn test_to_raw_keeps_values_and_row() {
        let raw = sample_record().to_raw(7);
        assert_eq!(raw.row_index, 7);
        assert_eq!(raw.birth_date, "1990-05-17");
        assert_eq!(raw.tax_id, "11144477735");
    }

    #[test]
    fn test_summary_unaccounted() {
        let summary = RunSummary {
            run_id: Uuid::nil(),
            total_read: 10,
            duplicates_removed: 2,
            total_valid: 5,
            total_invalid: 3,
            inserts: 4,
            updates: 1,
        };
        assert_eq!(summary.total_after_dedup(), 8);
        assert_eq!(summary.unaccounted(), 0);
    }
}
