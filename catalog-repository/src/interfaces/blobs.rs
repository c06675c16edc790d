//! This module defines the `BlobStore` trait, the adapter for binary image
//! payloads. Blobs are addressed by an opaque id; the product record only
//! ever holds the reference.

use uuid::Uuid;

use crate::errors::BlobStoreError;

/// A trait that defines the blob store adapter.
///
/// Implementations are constructed once at startup and injected; operations
/// must fail clearly if the backing store is unreachable rather than binding
/// lazily on first use.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores a binary payload and returns its opaque reference.
    async fn store(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<Uuid, BlobStoreError>;

    /// Deletes a blob by reference.
    ///
    /// Deleting an absent blob is not an error; the operation is idempotent.
    async fn delete(&self, id: Uuid) -> Result<(), BlobStoreError>;
}
