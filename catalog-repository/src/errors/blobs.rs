//! Error types for the blob store adapter.

use thiserror::Error;

/// Represents errors that can occur within the blob store.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
