//! Error types for the product mutation pipeline.

use catalog_repository::{BlobStoreError, CategoryRepositoryError, ProductRepositoryError};
use thiserror::Error;

/// Errors surfaced by the product mutation orchestrator.
///
/// Search-index and publish failures that happen after the durable write has
/// committed never appear here: the client has already earned its success
/// response, so those failures are logged and swallowed, and the divergence
/// is reconciled out-of-band.
#[derive(Debug, Error)]
pub enum ProductServiceError {
    /// The referenced category does not exist.
    #[error("Category not found")]
    CategoryNotFound,

    /// No product with the requested id.
    #[error("Product not found")]
    ProductNotFound,

    /// The acting user is not the product's seller.
    #[error("Unauthorized")]
    NotOwner,

    /// Input rejected before any write occurred.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Primary store failure.
    #[error(transparent)]
    Repository(#[from] ProductRepositoryError),

    /// Category lookup failure.
    #[error(transparent)]
    Category(#[from] CategoryRepositoryError),

    /// Blob store failure.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
}

impl ProductServiceError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
