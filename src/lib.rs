// ==========================================
// Prospect Intake - Core Library
// ==========================================
// Pipeline: tabular prospects → validated, reconciled records
//           → rejected CSV + accepted JSON documents
// Stack: Rust + calamine/csv + reqwest + SQLite
// ==========================================

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Repository layer - existing system of record
pub mod repository;

// Engine layer - validation and classification rules
pub mod engine;

// Importer layer - input parsing and run orchestration
pub mod importer;

// Exporter layer - wire documents and output files
pub mod exporter;

// Postal lookup client
pub mod lookup;

// Config layer
pub mod config;

// SQLite connection setup
pub mod db;

// Logging
pub mod logging;

// i18n
pub mod i18n;

// ==========================================
// Re-exports
// ==========================================

// Domain types
pub use domain::{
    BirthDate, ClassificationTag, ClassifiedRecord, CustomerDocument, PostalAddress,
    ProspectRecord, RawProspectRecord, RejectedRecord, RejectionReason, RunSummary,
    ValidationOutcome,
};

// Engine
pub use engine::{ExistingSystemIndex, ProspectValidator, RecordClassifier};

// Importer
pub use importer::{ImportError, ImportResult, IntakeRequest, ProspectImporter, ProspectImporterImpl};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "prospect-intake";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
