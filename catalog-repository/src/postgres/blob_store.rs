//! PostgreSQL blob storage for uploaded images.
//!
//! Payloads are held in a `bytea` column and addressed by an opaque id.
//! No deduplication and no streaming; payloads are written and removed
//! whole.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::errors::BlobStoreError;
use crate::interfaces::BlobStore;

/// PostgreSQL implementation of the blob store adapter.
pub struct PostgresBlobStore {
    pool: sqlx::PgPool,
}

impl PostgresBlobStore {
    /// Creates a new blob store over an existing connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlobStore for PostgresBlobStore {
    async fn store(
        &self,
        bytes: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<Uuid, BlobStoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO blobs (id, filename, content_type, data, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(filename)
        .bind(content_type)
        .bind(bytes)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(blob_id = %id, filename, size = bytes.len(), "Blob stored");
        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> Result<(), BlobStoreError> {
        let result = sqlx::query("DELETE FROM blobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        // Absent blobs are fine; deletion is idempotent.
        debug!(blob_id = %id, removed = result.rows_affected() > 0, "Blob delete");
        Ok(())
    }
}
