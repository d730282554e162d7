// ==========================================
// Prospect Intake - Repository Layer
// ==========================================
// Responsibility: read access to the existing system of record
// Red line: repositories hold no business rules
// ==========================================

pub mod error;
pub mod existing_system_repo;
pub mod existing_system_repo_impl;

pub use error::{RepositoryError, RepositoryResult};
pub use existing_system_repo::ExistingSystemRepository;
pub use existing_system_repo_impl::{FileExistingSystemRepo, SqliteExistingSystemRepo};
