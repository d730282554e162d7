// ==========================================
// Prospect Intake - Field Validators
// ==========================================
// Fixed battery, executed in this order with no short-circuit:
//   1. tax ID checksum        → InvalidTaxId
//   2. full name (≥ 2 words)  → IncompleteName
//   3. birth date / age       → InvalidBirthDate
//   4. email pattern          → InvalidEmail
//   5. phone (10|11 digits)   → InvalidPhone
//   6. postal code lookup     → InvalidPostalCode
//   7. address vs lookup      → AddressMismatch (only when 6 succeeded)
// ==========================================

use crate::domain::{BirthDate, PostalAddress, ProspectRecord, RejectionReason, ValidationOutcome};
use crate::engine::tax_id::is_valid_tax_id;
use crate::lookup::PostalLookup;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{error, warn};

/// local-part "@" domain "." TLD, ASCII word characters, dots and hyphens
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+$";

fn email_regex() -> Result<&'static Regex, &'static regex::Error> {
    static EMAIL_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN)).as_ref()
}

// ==========================================
// Pure predicates
// ==========================================

/// At least two whitespace-separated tokens
pub fn validate_full_name(name: &str) -> bool {
    name.split_whitespace().count() >= 2
}

/// Age in whole years as `floor(days since birth / 365)`.
///
/// Not calendar-aware: leap days shift the 18th-birthday boundary
/// by a few days. Future dates give negative ages.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - birth_date).num_days().div_euclid(365)
}

pub fn validate_birth_date(birth_date: &BirthDate, today: NaiveDate, min_age_years: i64) -> bool {
    match birth_date.as_date() {
        Some(date) => age_in_years(date, today) >= min_age_years,
        None => false,
    }
}

pub fn validate_email(email: &str) -> bool {
    match email_regex() {
        Ok(re) => re.is_match(email),
        Err(e) => {
            error!(error = %e, "email pattern failed to compile");
            false
        }
    }
}

pub fn validate_phone(phone: &str) -> bool {
    matches!(phone.len(), 10 | 11) && phone.chars().all(|c| c.is_ascii_digit())
}

/// Looked-up street must be contained in the record street (the record
/// may carry a number or suffix); district, city and region must be equal.
pub fn address_matches(found: &PostalAddress, record: &ProspectRecord) -> bool {
    record.street.contains(&found.street.to_uppercase())
        && found.district.to_uppercase() == record.district
        && found.city.to_uppercase() == record.city
        && found.region.to_uppercase() == record.region
}

// ==========================================
// ProspectValidator
// ==========================================
pub struct ProspectValidator {
    postal_lookup: Arc<dyn PostalLookup>,
    min_age_years: i64,
}

impl ProspectValidator {
    pub fn new(postal_lookup: Arc<dyn PostalLookup>, min_age_years: i64) -> Self {
        Self {
            postal_lookup,
            min_age_years,
        }
    }

    /// Run the full battery on one normalized record
    ///
    /// # Arguments
    /// - record: normalized record
    /// - today: reference date for the age rule
    ///
    /// # Returns
    /// - ValidationOutcome with reasons in battery order (empty ⇒ valid)
    pub async fn validate(&self, record: &ProspectRecord, today: NaiveDate) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        if !is_valid_tax_id(&record.tax_id) {
            outcome.push(RejectionReason::InvalidTaxId);
        }
        if !validate_full_name(&record.name) {
            outcome.push(RejectionReason::IncompleteName);
        }
        if !validate_birth_date(&record.birth_date, today, self.min_age_years) {
            outcome.push(RejectionReason::InvalidBirthDate);
        }
        if !validate_email(&record.email) {
            outcome.push(RejectionReason::InvalidEmail);
        }
        if !validate_phone(&record.phone) {
            outcome.push(RejectionReason::InvalidPhone);
        }

        match self.postal_lookup.lookup(&record.postal_code).await {
            Ok(Some(found)) => {
                if !address_matches(&found, record) {
                    outcome.push(RejectionReason::AddressMismatch);
                }
            }
            Ok(None) => outcome.push(RejectionReason::InvalidPostalCode),
            Err(e) => {
                warn!(postal_code = %record.postal_code, error = %e, "postal lookup failed");
                outcome.push(RejectionReason::InvalidPostalCode);
            }
        }

        outcome
    }
}
