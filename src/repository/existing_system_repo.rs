// ==========================================
// Prospect Intake - Existing System Repository Trait
// ==========================================
// Responsibility: read the tax IDs already known to the system of record
// Red line: no normalization and no business rules here
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ExistingSystemRepository Trait
// ==========================================
// Implemented by: FileExistingSystemRepo (xlsx/csv export),
//                 SqliteExistingSystemRepo (table column)
#[async_trait]
pub trait ExistingSystemRepository: Send + Sync {
    /// Every non-blank tax-ID value, exactly as stored
    ///
    /// # Returns
    /// - Ok(values): may be empty (every accepted record becomes INSERT)
    /// - Err: source unreadable or key column absent (fatal for the run)
    async fn load_tax_ids(&self) -> RepositoryResult<Vec<String>>;

    /// Human-readable source name for logs
    fn source_name(&self) -> String;
}
