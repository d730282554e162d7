// ==========================================
// Prospect Intake - Intake Config Reader Trait
// ==========================================
// Responsibility: configuration values the pipeline needs (no implementation)
// Red line: no config writes, no business logic
// ==========================================

use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::PathBuf;

// ==========================================
// IntakeConfigReader Trait
// ==========================================
// Implemented by: ConfigManager (defaults → JSON file → environment)
#[async_trait]
pub trait IntakeConfigReader: Send + Sync {
    // ===== Presentation =====

    /// Locale of rejection reasons and the reason column header
    ///
    /// # Default
    /// - "en"
    async fn get_locale(&self) -> ImportResult<String>;

    // ===== Validation rules =====

    /// Minimum age in years (days / 365, floored)
    ///
    /// # Default
    /// - 18
    async fn get_min_age_years(&self) -> ImportResult<i64>;

    /// chrono format strings tried in order when parsing birth dates
    ///
    /// # Default
    /// - ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y"]
    async fn get_birth_date_formats(&self) -> ImportResult<Vec<String>>;

    // ===== Postal lookup =====

    /// # Default
    /// - "https://viacep.com.br/ws"
    async fn get_postal_lookup_base_url(&self) -> ImportResult<String>;

    /// Per-request timeout; must be > 0
    ///
    /// # Default
    /// - 10
    async fn get_postal_lookup_timeout_secs(&self) -> ImportResult<u64>;

    // ===== Existing system (SQLite) =====

    /// # Default
    /// - "sistema"
    async fn get_existing_system_table(&self) -> ImportResult<String>;

    /// # Default
    /// - "cpf"
    async fn get_existing_system_column(&self) -> ImportResult<String>;

    // ===== Outputs =====

    /// # Default
    /// - "clientes_invalidos.csv"
    async fn get_rejected_output_path(&self) -> ImportResult<PathBuf>;

    /// # Default
    /// - "clientes_para_subir.json"
    async fn get_accepted_output_path(&self) -> ImportResult<PathBuf>;
}
