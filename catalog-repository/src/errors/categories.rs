//! Error types for the category resolver.

use thiserror::Error;

/// Represents errors that can occur while resolving categories.
#[derive(Debug, Error)]
pub enum CategoryRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
