// ==========================================
// Prospect Intake - Existing System Repository Implementations
// ==========================================
// FileExistingSystemRepo:   xlsx/csv export with a key column
// SqliteExistingSystemRepo: one column of one table (read-only)
// ==========================================

use crate::db::{is_plain_identifier, open_sqlite_connection_read_only, table_columns, table_exists};
use crate::importer::error::ImportError;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::prospect_importer_trait::FileParser;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::existing_system_repo::ExistingSystemRepository;
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

// ==========================================
// FileExistingSystemRepo
// ==========================================
pub struct FileExistingSystemRepo {
    path: PathBuf,
    column: String,
}

impl FileExistingSystemRepo {
    /// # Arguments
    /// - path: .xlsx/.xls/.csv export of the system of record
    /// - column: header of the tax-ID column (case-sensitive)
    pub fn new(path: impl Into<PathBuf>, column: &str) -> Self {
        Self {
            path: path.into(),
            column: column.to_string(),
        }
    }
}

#[async_trait]
impl ExistingSystemRepository for FileExistingSystemRepo {
    #[instrument(skip(self), fields(source = %self.path.display()))]
    async fn load_tax_ids(&self) -> RepositoryResult<Vec<String>> {
        let table = UniversalFileParser.parse_to_raw_table(&self.path)?;

        if !table.headers.iter().any(|h| h == &self.column) {
            return Err(ImportError::MissingColumns {
                source_name: self.source_name(),
                columns: vec![self.column.clone()],
            }
            .into());
        }

        let values: Vec<String> = table
            .rows
            .into_iter()
            .filter_map(|(_, mut cells)| cells.remove(&self.column))
            .filter(|v| !v.trim().is_empty())
            .collect();

        debug!(count = values.len(), "existing tax IDs loaded from file");
        Ok(values)
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

// ==========================================
// SqliteExistingSystemRepo
// ==========================================
pub struct SqliteExistingSystemRepo {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
    table: String,
    column: String,
}

/// Table and column names are interpolated into SQL, so only
/// plain identifiers are accepted.
fn check_identifier(kind: &str, value: &str) -> RepositoryResult<()> {
    if !is_plain_identifier(value) {
        return Err(RepositoryError::InvalidIdentifier {
            kind: kind.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Stored value as text; integer columns are common in exports
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Text(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) if f.fract() == 0.0 => Some(format!("{}", f as i64)),
        Value::Real(f) => Some(f.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

impl SqliteExistingSystemRepo {
    /// Open `db_path` read-only and check that `table.column` exists
    pub fn new(db_path: &str, table: &str, column: &str) -> RepositoryResult<Self> {
        check_identifier("table", table)?;
        check_identifier("column", column)?;

        let conn = open_sqlite_connection_read_only(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e)))?;

        if !table_exists(&conn, table)? {
            return Err(RepositoryError::TableNotFound(table.to_string()));
        }
        if !table_columns(&conn, table)?.iter().any(|c| c == column) {
            return Err(ImportError::MissingColumns {
                source_name: format!("{}#{}", db_path, table),
                columns: vec![column.to_string()],
            }
            .into());
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: db_path.to_string(),
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

#[async_trait]
impl ExistingSystemRepository for SqliteExistingSystemRepo {
    #[instrument(skip(self), fields(db = %self.db_path, table = %self.table))]
    async fn load_tax_ids(&self) -> RepositoryResult<Vec<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let sql = format!("SELECT {} FROM {}", self.column, self.table);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, Value>(0))?;

        let mut values = Vec::new();
        for value in rows {
            if let Some(text) = value_to_text(value?) {
                if !text.trim().is_empty() {
                    values.push(text);
                }
            }
        }

        debug!(count = values.len(), "existing tax IDs loaded from database");
        Ok(values)
    }

    fn source_name(&self) -> String {
        format!("{}#{}.{}", self.db_path, self.table, self.column)
    }
}
