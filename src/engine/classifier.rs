// ==========================================
// Prospect Intake - Record Classifier
// ==========================================
// 1. route: validation outcome → rejected (reasons) | accepted
// 2. classify: accepted tax ID ∈ existing index → UPDATE, else INSERT
// ==========================================

use crate::domain::{
    ClassificationTag, ClassifiedRecord, ProspectRow, RejectedRecord, RejectionReason,
    ValidationOutcome,
};
use crate::i18n;
use crate::importer::data_cleaner::TAX_ID_LEN;
use crate::importer::prospect_importer_trait::DataCleaner;
use std::collections::HashSet;

/// Separator between localized reasons in the rejected sink
pub const REASON_SEPARATOR: &str = ", ";

// ==========================================
// ExistingSystemIndex
// ==========================================
// Tax IDs already present in the system of record, normalized
// exactly like input records so both sides compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingSystemIndex {
    tax_ids: HashSet<String>,
}

impl ExistingSystemIndex {
    pub fn build<I, S>(values: I, cleaner: &dyn DataCleaner) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tax_ids = values
            .into_iter()
            .map(|v| cleaner.clean_digits(v.as_ref(), Some(TAX_ID_LEN)))
            .collect();
        Self { tax_ids }
    }

    pub fn contains(&self, tax_id: &str) -> bool {
        self.tax_ids.contains(tax_id)
    }

    pub fn len(&self) -> usize {
        self.tax_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tax_ids.is_empty()
    }
}

/// Result of routing one validated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Accepted(ProspectRow),
    Rejected(RejectedRecord),
}

// ==========================================
// RecordClassifier
// ==========================================
pub struct RecordClassifier {
    locale: String,
}

impl RecordClassifier {
    /// `locale` selects the language of the joined reason text
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    /// Localized reasons in execution order, joined with ", "
    pub fn reason_text(&self, reasons: &[RejectionReason]) -> String {
        reasons
            .iter()
            .map(|r| i18n::t_in(r.i18n_key(), &self.locale))
            .collect::<Vec<_>>()
            .join(REASON_SEPARATOR)
    }

    pub fn route(&self, row: ProspectRow, outcome: ValidationOutcome) -> Routed {
        if outcome.is_valid() {
            return Routed::Accepted(row);
        }
        let reasons = outcome.into_reasons();
        let reason_text = self.reason_text(&reasons);
        Routed::Rejected(RejectedRecord {
            row,
            reasons,
            reason_text,
        })
    }

    /// Tag every accepted row against the index, order preserved
    pub fn classify(
        &self,
        accepted: Vec<ProspectRow>,
        index: &ExistingSystemIndex,
    ) -> Vec<ClassifiedRecord> {
        if accepted.is_empty() {
            return Vec::new();
        }
        accepted
            .into_iter()
            .map(|row| {
                let tag = if index.contains(&row.record.tax_id) {
                    ClassificationTag::Update
                } else {
                    ClassificationTag::Insert
                };
                ClassifiedRecord { row, tag }
            })
            .collect()
    }
}
