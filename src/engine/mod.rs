// ==========================================
// Prospect Intake - Engine Layer
// ==========================================
// Responsibility: validation and classification rules
// No file I/O; the postal lookup is injected
// ==========================================

pub mod classifier;
pub mod events;
pub mod field_validators;
pub mod tax_id;

pub use classifier::{ExistingSystemIndex, RecordClassifier, Routed, REASON_SEPARATOR};
pub use events::{
    NoOpEventPublisher, OptionalEventPublisher, PipelineEvent, PipelineEventPublisher,
    TracingEventPublisher,
};
pub use field_validators::{
    address_matches, age_in_years, validate_birth_date, validate_email, validate_full_name,
    validate_phone, ProspectValidator,
};
pub use tax_id::{compute_check_digits, is_valid_tax_id};
