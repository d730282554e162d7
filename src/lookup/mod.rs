// ==========================================
// Prospect Intake - Postal Lookup
// ==========================================
// External collaborator: postal code → structured address.
// Every failure mode collapses to "not found" at the validator.
// ==========================================

pub mod error;
pub mod viacep;

pub use error::{LookupError, LookupResult};
pub use viacep::ViaCepClient;

use crate::domain::PostalAddress;
use async_trait::async_trait;

// ==========================================
// PostalLookup Trait
// ==========================================
// Implemented by: ViaCepClient (HTTP), test stubs
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Look up one normalized (8-digit) postal code
    ///
    /// # Returns
    /// - Ok(Some(address)): postal code exists
    /// - Ok(None): service answered "not found"
    /// - Err: transport or decode failure (single attempt, no retry)
    async fn lookup(&self, postal_code: &str) -> LookupResult<Option<PostalAddress>>;
}
