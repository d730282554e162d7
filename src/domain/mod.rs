// ==========================================
// Prospect Intake - Domain Layer
// ==========================================
// Responsibility: entities and value types of the intake pipeline
// No I/O, no validation logic
// ==========================================

pub mod document;
pub mod prospect;
pub mod types;

// Re-export core types
pub use document::{
    AdditionalInfoEntry, AddressEntry, CustomerDocument, EmailEntry, PhoneEntry,
    PERSON_TYPE_INDIVIDUAL, PHONE_TYPE_MOBILE,
};
pub use prospect::{
    BirthDate, ClassifiedRecord, PostalAddress, ProspectRecord, ProspectRow, RawProspectRecord,
    RejectedRecord, RunSummary, ValidationOutcome,
};
pub use types::{ClassificationTag, RejectionReason};
