//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, etc.).

use async_trait::async_trait;
use catalog_shared::ProductDocument;
use uuid::Uuid;

use crate::errors::SearchIndexError;

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into the mutation orchestrator to enable
/// dependency injection and easy testing with mock implementations. The
/// index mirrors the primary store eventually: callers synchronize it after
/// the durable write has committed, and both operations are idempotent so
/// they stay safe under at-least-once re-delivery by downstream consumers.
///
/// # Index Initialization
///
/// Implementations should have `ensure_index_exists` called during
/// application startup so the backend schema is in place before any
/// document operation runs. The call must be a no-op when the index is
/// already present.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the search index exists, creating it with the fixed product
    /// schema if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError)` - If initialization fails
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Write the denormalized product document, replacing any previous
    /// content for that id in full (upsert semantics).
    ///
    /// # Arguments
    ///
    /// * `document` - The complete denormalized product snapshot
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was created or replaced successfully
    /// * `Err(SearchIndexError)` - If the operation fails
    async fn upsert_document(&self, document: &ProductDocument) -> Result<(), SearchIndexError>;

    /// Delete the document for a product id.
    ///
    /// If the document doesn't exist, the operation is considered
    /// successful.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted (or didn't exist)
    /// * `Err(SearchIndexError)` - If the deletion fails
    async fn delete_document(&self, product_id: Uuid) -> Result<(), SearchIndexError>;
}
