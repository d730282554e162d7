// ==========================================
// Prospect Intake - Repository Error Types
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Database errors =====
    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock failed: {0}")]
    LockError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("invalid SQL identifier for {kind}: {value}")]
    InvalidIdentifier { kind: String, value: String },

    // ===== File-backed source =====
    #[error(transparent)]
    Source(#[from] ImportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Repository failures abort the run before any output is written
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Source(inner) => inner,
            other => ImportError::DatabaseQueryError(other.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_unwraps_into_import_error() {
        let err = RepositoryError::Source(ImportError::MissingColumns {
            source_name: "sistema.csv".to_string(),
            columns: vec!["cpf".to_string()],
        });
        let import: ImportError = err.into();
        assert!(matches!(import, ImportError::MissingColumns { .. }));
    }

    #[test]
    fn test_database_errors_become_query_errors() {
        let import: ImportError = RepositoryError::TableNotFound("sistema".to_string()).into();
        match import {
            ImportError::DatabaseQueryError(msg) => assert!(msg.contains("sistema")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
