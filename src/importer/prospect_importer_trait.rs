// ==========================================
// Prospect Intake - Importer Traits
// ==========================================
// Interfaces of the intake pipeline stages (no implementations)
// ==========================================

use crate::domain::{ProspectRecord, ProspectRow, RawProspectRecord};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;
use crate::importer::prospect_importer_impl::{IntakeOutcome, IntakeReport, IntakeRequest};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// ProspectImporter Trait
// ==========================================
// Implemented by: ProspectImporterImpl
#[async_trait]
pub trait ProspectImporter: Send + Sync {
    /// Run the whole intake for one input file
    ///
    /// # Stages
    /// 1. Load the input file and the existing-system index (fatal on failure)
    /// 2. Field mapping
    /// 3. Normalization + de-duplication
    /// 4. Validation (one postal lookup per record)
    /// 5. Classification (INSERT / UPDATE)
    /// 6. Projection into wire documents
    /// 7. Write rejected CSV + accepted JSON
    ///
    /// # Returns
    /// - Ok(IntakeReport): summary plus both record sets
    /// - Err: dataset-level failure; no output files are written
    async fn import_file(&self, request: &IntakeRequest) -> ImportResult<IntakeReport>;

    /// Normalize, validate, classify and project already-mapped records
    ///
    /// Reads the existing-system index but writes nothing.
    async fn process_records(
        &self,
        records: Vec<RawProspectRecord>,
        today: NaiveDate,
    ) -> ImportResult<IntakeOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// Implemented by: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// Parse a file into a header list plus row maps (column name → cell text)
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// Implemented by: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// Check the header row against the column contract
    ///
    /// # Returns
    /// - Err(MissingColumns): at least one required column is absent
    fn check_columns(&self, source_name: &str, headers: &[String]) -> ImportResult<()>;

    /// Map one row into a RawProspectRecord
    fn map_to_raw_prospect(
        &self,
        row: &HashMap<String, String>,
        row_index: usize,
    ) -> RawProspectRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// Implemented by: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// Trim, optionally uppercase
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// Keep digits only, left-pad with '0' to `width` (no padding when None)
    fn clean_digits(&self, value: &str, width: Option<usize>) -> String;

    /// Normalize a whole record
    fn normalize(&self, raw: &RawProspectRecord) -> ProspectRecord;
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// Implemented by: ConflictHandlerImpl
pub trait ConflictHandler: Send + Sync {
    /// Collapse exact duplicates (first occurrence wins, order preserved)
    ///
    /// # Returns
    /// - (kept rows, row_index of every removed duplicate)
    fn collapse_duplicates(&self, rows: Vec<ProspectRow>) -> (Vec<ProspectRow>, Vec<usize>);
}
