//! Catalog error taxonomy
//!
//! Every failure carries a stable machine-readable kind plus a message.
//! Enrichment and storage errors are never retried inside the catalog.

use thiserror::Error;

use crate::enrichment::EnrichmentError;

/// Catalog operation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or out-of-range client input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced song does not exist
    #[error("Song not found: {0}")]
    NotFound(i64),

    /// Provider unreachable or timed out
    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),

    /// Provider answered with a non-success status
    #[error("Enrichment rejected with status {status}: {message}")]
    EnrichmentRejected { status: u16, message: String },

    /// Provider body could not be decoded
    #[error("Enrichment returned a malformed response: {0}")]
    EnrichmentMalformedResponse(String),

    /// Read failed or timed out
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Write failed or timed out; the write may or may not have applied
    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    /// Shutdown began before the write was issued; nothing was written
    #[error("Operation cancelled before {0}")]
    Cancelled(&'static str),
}

impl CatalogError {
    /// Stable error code
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::EnrichmentUnavailable(_) => "ENRICHMENT_UNAVAILABLE",
            CatalogError::EnrichmentRejected { .. } => "ENRICHMENT_REJECTED",
            CatalogError::EnrichmentMalformedResponse(_) => "ENRICHMENT_MALFORMED_RESPONSE",
            CatalogError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            CatalogError::StorageWriteFailed(_) => "STORAGE_WRITE_FAILED",
            CatalogError::Cancelled(_) => "CANCELLED",
        }
    }
}

impl From<EnrichmentError> for CatalogError {
    fn from(err: EnrichmentError) -> Self {
        match err {
            EnrichmentError::Unavailable(msg) => CatalogError::EnrichmentUnavailable(msg),
            EnrichmentError::Rejected { status, body } => CatalogError::EnrichmentRejected {
                status,
                message: body,
            },
            EnrichmentError::Malformed(msg) => CatalogError::EnrichmentMalformedResponse(msg),
        }
    }
}

impl From<songcat_common::Error> for CatalogError {
    fn from(err: songcat_common::Error) -> Self {
        match err {
            songcat_common::Error::InvalidInput(msg) => CatalogError::InvalidArgument(msg),
            other => CatalogError::StorageUnavailable(other.to_string()),
        }
    }
}
