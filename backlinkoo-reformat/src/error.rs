//! Error types for the reformat engine

use backlinkoo_client::ClientError;
use thiserror::Error;

/// Result type alias for reformat operations
pub type Result<T> = std::result::Result<T, ReformatError>;

/// Errors that abort a reformat run
///
/// Per-row PATCH failures are not here: the engine logs and counts them
/// without stopping the run.
#[derive(Debug, Error)]
pub enum ReformatError {
    /// The requested domain filter does not match any registered domain
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Options failed validation
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A page fetch or domain lookup failed
    #[error("Supabase request failed: {0}")]
    Client(#[from] ClientError),
}
