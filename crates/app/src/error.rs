//! Application error types.

use order_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the entry point.
#[derive(Debug, Error)]
pub enum AppError {
    /// A store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The report could not be rendered.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
