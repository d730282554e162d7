// ==========================================
// Prospect Intake - Importer Layer
// ==========================================
// Responsibility: tabular input → normalized, de-duplicated records,
// and the orchestration of a whole intake run
// Supports: Excel, CSV
// ==========================================

pub mod conflict_handler;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod prospect_importer_impl;
pub mod prospect_importer_trait;

// Core types
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawTable, UniversalFileParser};
pub use prospect_importer_impl::{IntakeOutcome, IntakeReport, IntakeRequest, ProspectImporterImpl};

// Trait interfaces
pub use prospect_importer_trait::{
    ConflictHandler, DataCleaner, FieldMapper, FileParser, ProspectImporter,
};
