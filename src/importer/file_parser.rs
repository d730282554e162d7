// ==========================================
// Prospect Intake - File Parsers
// ==========================================
// Supports: Excel (.xlsx/.xls) / CSV (.csv)
// First row is the header; fully blank rows are skipped but
// still advance the row index (coordinates stay sheet-accurate).
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::prospect_importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Parsed sheet: header names plus (0-based data row index, cells) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, HashMap<String, String>)>,
}

impl RawTable {
    /// Number of data rows kept (blank rows excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

/// Source lines one record occupies (quoted fields may span lines)
fn record_lines(record: &StringRecord, terminated: bool) -> u64 {
    let embedded: usize = record.iter().map(|field| field.matches('\n').count()).sum();
    embedded as u64 + u64::from(terminated)
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let bytes = std::fs::read(file_path)?;
        let ends_with_newline = bytes.last().map_or(true, |b| *b == b'\n' || *b == b'\r');

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // tolerate ragged rows
            .from_reader(bytes.as_slice());

        let mut record = StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Ok(RawTable::default());
        }
        let headers: Vec<String> = record
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut line_after = reader.position().line();
        let mut row_index = 0usize;
        let mut rows = Vec::new();
        while reader.read_record(&mut record)? {
            let end_line = reader.position().line();
            let terminated = ends_with_newline || reader.position().byte() < bytes.len() as u64;
            // the reader drops empty lines without yielding them; each one is still a row
            let skipped = end_line
                .saturating_sub(line_after)
                .saturating_sub(record_lines(&record, terminated));
            row_index += skipped as usize;
            line_after = end_line;

            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.to_string());
                }
            }

            if row_map.values().all(|v| v.trim().is_empty()) {
                debug!(row_index, "skipping blank CSV row");
            } else {
                rows.push((row_index, row_map));
            }
            row_index += 1;
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// Render one cell as text.
    ///
    /// Date cells become `YYYY-MM-DD`; whole floats lose the `.0`
    /// so numeric tax IDs and phones keep their digits only.
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::DateTime(_) => cell
                .as_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| cell.to_string()),
            Data::DateTimeIso(s) => s.get(..10).unwrap_or(s).to_string(),
            Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            other => other.to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // first worksheet only
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no worksheet".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("worksheet is empty".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| Self::cell_to_string(cell).trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_index, data_row) in sheet_rows.enumerate() {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), Self::cell_to_string(cell));
                }
            }

            if row_map.values().all(|v| v.trim().is_empty()) {
                debug!(row_index, "skipping blank worksheet row");
                continue;
            }

            rows.push((row_index, row_map));
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// UniversalFileParser (dispatch on extension)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_table(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(file_path),
            other => {
                ensure_exists(file_path)?;
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
