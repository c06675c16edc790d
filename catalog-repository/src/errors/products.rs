//! Error types for the product repository.
//! Defines specific errors that can occur during primary-store operations.

use thiserror::Error;

/// Represents errors that can occur within the product repository.
#[derive(Debug, Error)]
pub enum ProductRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
