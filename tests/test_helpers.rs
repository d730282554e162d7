// ==========================================
// Test helpers
// ==========================================
// Responsibility: fixture files, stub collaborators and importer wiring
// shared by the integration tests
// ==========================================

#![allow(dead_code)]

use async_trait::async_trait;
use prospect_intake::config::ConfigManager;
use prospect_intake::domain::{CustomerDocument, PostalAddress};
use prospect_intake::engine::{PipelineEvent, PipelineEventPublisher};
use prospect_intake::importer::field_mapper::columns;
use prospect_intake::importer::{
    ConflictHandlerImpl, DataCleanerImpl, FieldMapperImpl, IntakeRequest, ProspectImporterImpl,
    UniversalFileParser,
};
use prospect_intake::lookup::{LookupError, LookupResult, PostalLookup};
use prospect_intake::repository::ExistingSystemRepository;
use rusqlite::Connection;
use std::collections::HashMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use chrono::NaiveDate;

// ==========================================
// Known-good values
// ==========================================

/// Checksum-valid tax IDs
pub const TAX_ID_A: &str = "111.444.777-35";
pub const TAX_ID_B: &str = "529.982.247-25";
pub const TAX_ID_C: &str = "123.456.789-09";
pub const TAX_ID_D: &str = "987.654.321-00";

/// Postal code known to the stub lookup
pub const PAULISTA_CEP: &str = "01310-100";

/// Reference date used by most tests
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

// ==========================================
// Input rows
// ==========================================

/// One input sheet row; starts out valid for the stub lookup
#[derive(Debug, Clone)]
pub struct ProspectRowBuilder {
    values: HashMap<&'static str, String>,
}

impl ProspectRowBuilder {
    pub fn valid(name: &str, tax_id: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(columns::NAME, name.to_string());
        values.insert(columns::STREET, "Avenida Paulista".to_string());
        values.insert(columns::DISTRICT, "Bela Vista".to_string());
        values.insert(columns::CITY, "São Paulo".to_string());
        values.insert(columns::REGION, "SP".to_string());
        values.insert(columns::COURSE, "Direito".to_string());
        values.insert(columns::TAX_ID, tax_id.to_string());
        values.insert(columns::BIRTH_DATE, "1990-05-17".to_string());
        values.insert(columns::PHONE, "(11) 98765-4321".to_string());
        values.insert(columns::INSTITUTION, "UniFoo".to_string());
        values.insert(columns::POSTAL_CODE, PAULISTA_CEP.to_string());
        values.insert(columns::EMAIL, "aluno@example.com".to_string());
        values.insert(columns::STREET_NUMBER, "1000".to_string());
        values.insert(columns::REGISTRATION_CODE, "RA0001".to_string());
        Self { values }
    }

    pub fn with(mut self, column: &'static str, value: &str) -> Self {
        self.values.insert(column, value.to_string());
        self
    }

    /// Cell values in sheet column order
    pub fn cells(&self) -> Vec<String> {
        columns::INPUT_COLUMNS
            .iter()
            .map(|c| self.values.get(c).cloned().unwrap_or_default())
            .collect()
    }
}

/// Write the input sheet as CSV with the full 14-column header
pub fn write_input_csv(
    dir: &Path,
    rows: &[ProspectRowBuilder],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("leads.csv");
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(columns::INPUT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(path)
}

/// Write the existing-system export as a one-column CSV
pub fn write_existing_csv(
    dir: &Path,
    header: &str,
    tax_ids: &[&str],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("sistema.csv");
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record([header])?;
    for tax_id in tax_ids {
        writer.write_record([*tax_id])?;
    }
    writer.flush()?;
    Ok(path)
}

/// Create a SQLite existing-system table holding `tax_ids`
pub fn create_existing_db(
    dir: &Path,
    table: &str,
    column: &str,
    tax_ids: &[&str],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("sistema.db");
    let conn = Connection::open(&path)?;
    conn.execute(
        &format!("CREATE TABLE {table} (id INTEGER PRIMARY KEY, {column} TEXT, nome TEXT)"),
        [],
    )?;
    for tax_id in tax_ids {
        conn.execute(
            &format!("INSERT INTO {table} ({column}, nome) VALUES (?1, 'existente')"),
            [tax_id],
        )?;
    }
    Ok(path)
}

// ==========================================
// Output readers
// ==========================================

/// Rejected CSV as (header, rows)
pub fn read_rejected(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

pub fn read_accepted(path: &Path) -> Result<Vec<CustomerDocument>, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

// ==========================================
// Stub postal lookup
// ==========================================

/// Answers from a fixed table; unknown codes are "not found"
#[derive(Default)]
pub struct StubPostalLookup {
    addresses: HashMap<String, PostalAddress>,
    failing: Vec<String>,
    calls: AtomicUsize,
}

impl StubPostalLookup {
    /// Knows 01310100 (Avenida Paulista, São Paulo)
    pub fn paulista() -> Self {
        Self::default().with_address(
            "01310100",
            "Avenida Paulista",
            "Bela Vista",
            "São Paulo",
            "SP",
        )
    }

    pub fn with_address(
        mut self,
        postal_code: &str,
        street: &str,
        district: &str,
        city: &str,
        region: &str,
    ) -> Self {
        self.addresses.insert(
            postal_code.to_string(),
            PostalAddress {
                street: street.to_string(),
                district: district.to_string(),
                city: city.to_string(),
                region: region.to_string(),
            },
        );
        self
    }

    /// Simulate a transport failure for this code
    pub fn failing_on(mut self, postal_code: &str) -> Self {
        self.failing.push(postal_code.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostalLookup for StubPostalLookup {
    async fn lookup(&self, postal_code: &str) -> LookupResult<Option<PostalAddress>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|c| c == postal_code) {
            return Err(LookupError::Status {
                status: 503,
                postal_code: postal_code.to_string(),
            });
        }
        Ok(self.addresses.get(postal_code).cloned())
    }
}

// ==========================================
// Recording event publisher
// ==========================================

#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingEventPublisher {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().iter().map(|e| e.as_str().to_string()).collect()
    }
}

impl PipelineEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: PipelineEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

// ==========================================
// Importer wiring
// ==========================================

pub fn create_importer<R: ExistingSystemRepository>(
    repo: R,
    config: ConfigManager,
    lookup: Arc<dyn PostalLookup>,
) -> ProspectImporterImpl<R, ConfigManager> {
    ProspectImporterImpl::new(
        repo,
        config,
        lookup,
        Box::new(UniversalFileParser),
        Box::new(FieldMapperImpl),
        Box::new(DataCleanerImpl::default()),
        Box::new(ConflictHandlerImpl),
    )
}

/// Request writing both outputs into `dir`
pub fn intake_request(dir: &Path, input_path: PathBuf, today: NaiveDate) -> IntakeRequest {
    IntakeRequest {
        input_path,
        rejected_path: dir.join("clientes_invalidos.csv"),
        accepted_path: dir.join("clientes_para_subir.json"),
        today,
    }
}
