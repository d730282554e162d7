// ==========================================
// Prospect Intake - Data Cleaner (Normalizer)
// ==========================================
// Responsibility: TRIM / UPPER / lower / digit extraction / date parsing
// Pure: no network, no disk. normalize(to_raw(normalize(x))) == normalize(x)
// ==========================================

use crate::domain::{BirthDate, ProspectRecord, RawProspectRecord};
use crate::importer::prospect_importer_trait::DataCleaner as DataCleanerTrait;
use chrono::NaiveDate;

/// Tax IDs are normalized to exactly this many digits
pub const TAX_ID_LEN: usize = 11;

/// Postal codes are normalized to exactly this many digits
pub const POSTAL_CODE_LEN: usize = 8;

/// Default accepted birth-date formats; the first one is canonical
pub const DEFAULT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y"];

pub struct DataCleaner {
    date_formats: Vec<String>,
}

impl DataCleaner {
    pub fn new(date_formats: Vec<String>) -> Self {
        Self { date_formats }
    }

    /// Parse a birth date with the configured formats, in order
    pub fn parse_birth_date(&self, value: &str) -> BirthDate {
        let trimmed = value.trim();
        self.date_formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .map(BirthDate::Parsed)
            .unwrap_or_else(|| BirthDate::Unparsable(trimmed.to_string()))
    }

    /// Trim + lowercase (opaque institution keys)
    pub fn clean_key(&self, value: &str) -> String {
        value.trim().to_lowercase()
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect())
    }
}

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn clean_digits(&self, value: &str, width: Option<usize>) -> String {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
        match width {
            None => digits,
            Some(w) if digits.len() >= w => digits[..w].to_string(),
            Some(w) => format!("{:0>width$}", digits, width = w),
        }
    }

    fn normalize(&self, raw: &RawProspectRecord) -> ProspectRecord {
        ProspectRecord {
            // free text: TRIM + UPPER
            name: self.clean_text(&raw.name, true),
            street: self.clean_text(&raw.street, true),
            district: self.clean_text(&raw.district, true),
            city: self.clean_text(&raw.city, true),
            region: self.clean_text(&raw.region, true),
            course: self.clean_text(&raw.course, true),

            // opaque key: TRIM + lower
            institution: self.clean_key(&raw.institution),

            // digit fields
            tax_id: self.clean_digits(&raw.tax_id, Some(TAX_ID_LEN)),
            postal_code: self.clean_digits(&raw.postal_code, Some(POSTAL_CODE_LEN)),
            phone: self.clean_digits(&raw.phone, None),

            birth_date: self.parse_birth_date(&raw.birth_date),

            // validated as-is
            email: raw.email.clone(),

            street_number: self.clean_text(&raw.street_number, false),
            registration_code: self.clean_text(&raw.registration_code, false),
        }
    }
}
