// ==========================================
// Prospect Intake - Field Mapper
// ==========================================
// Source column → semantic field. Column names and casing are a
// fixed contract with the spreadsheet producers.
// ==========================================

use crate::domain::RawProspectRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::prospect_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;
use tracing::debug;

/// Input sheet column names
pub mod columns {
    pub const NAME: &str = "NOME";
    pub const STREET: &str = "Endereço";
    pub const DISTRICT: &str = "Bairro";
    pub const CITY: &str = "Cidade";
    pub const REGION: &str = "Estado";
    pub const COURSE: &str = "Curso";
    pub const TAX_ID: &str = "CPF";
    pub const BIRTH_DATE: &str = "Data de Nascimento";
    pub const PHONE: &str = "Telefone";
    pub const INSTITUTION: &str = "Faculdade";
    pub const POSTAL_CODE: &str = "CEP";
    pub const EMAIL: &str = "Email";
    pub const STREET_NUMBER: &str = "Numero";
    pub const REGISTRATION_CODE: &str = "RA";

    /// Existing-system dataset key column
    pub const EXISTING_TAX_ID: &str = "cpf";

    /// Every input column, in output order
    pub const INPUT_COLUMNS: [&str; 14] = [
        NAME,
        STREET,
        DISTRICT,
        CITY,
        REGION,
        COURSE,
        TAX_ID,
        BIRTH_DATE,
        PHONE,
        INSTITUTION,
        POSTAL_CODE,
        EMAIL,
        STREET_NUMBER,
        REGISTRATION_CODE,
    ];

    /// 1-based sheet column positions echoed in the wire document
    pub const NAME_SHEET_COLUMN: usize = 1;
    pub const TAX_ID_SHEET_COLUMN: usize = 2;
    pub const REGISTRATION_SHEET_COLUMN: usize = 12;

    /// 0-based data row index + this offset = 1-based sheet row (header is row 1)
    pub const SHEET_ROW_OFFSET: usize = 2;
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn check_columns(&self, source_name: &str, headers: &[String]) -> ImportResult<()> {
        let missing: Vec<String> = columns::INPUT_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();

        for header in headers {
            if !columns::INPUT_COLUMNS.contains(&header.as_str()) {
                debug!(source = source_name, column = %header, "ignoring unknown column");
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns {
                source_name: source_name.to_string(),
                columns: missing,
            })
        }
    }

    fn map_to_raw_prospect(
        &self,
        row: &HashMap<String, String>,
        row_index: usize,
    ) -> RawProspectRecord {
        RawProspectRecord {
            name: self.get_string(row, columns::NAME),
            tax_id: self.get_string(row, columns::TAX_ID),
            birth_date: self.get_string(row, columns::BIRTH_DATE),
            email: self.get_string(row, columns::EMAIL),
            phone: self.get_string(row, columns::PHONE),
            postal_code: self.get_string(row, columns::POSTAL_CODE),
            street: self.get_string(row, columns::STREET),
            street_number: self.get_string(row, columns::STREET_NUMBER),
            district: self.get_string(row, columns::DISTRICT),
            city: self.get_string(row, columns::CITY),
            region: self.get_string(row, columns::REGION),
            institution: self.get_string(row, columns::INSTITUTION),
            course: self.get_string(row, columns::COURSE),
            registration_code: self.get_string(row, columns::REGISTRATION_CODE),
            row_index,
        }
    }
}

impl FieldMapper {
    /// Cell text as-is; absent cells map to ""
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> String {
        row.get(key).cloned().unwrap_or_default()
    }
}
