//! This module defines the `ProductRepository` trait, the interface to the
//! primary product store. The primary store is the source of truth: writes
//! here are the unit of atomicity for every mutation, and the search index
//! and event bus are only ever synchronized after a write has committed.

use catalog_shared::Product;
use uuid::Uuid;

use crate::errors::ProductRepositoryError;

/// A trait that defines the interface for the primary product store.
///
/// Implementors provide durable CRUD over product records by id. There is no
/// optimistic concurrency control; concurrent updates to the same record are
/// last-write-wins.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persists a new product record.
    ///
    /// # Arguments
    ///
    /// * `product` - The fully built record, id already assigned.
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or a `ProductRepositoryError` if the
    /// insertion fails.
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError>;

    /// Fetches a product by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(product))` - The record, if present
    /// * `Ok(None)` - No record with that id
    async fn get(&self, id: Uuid) -> Result<Option<Product>, ProductRepositoryError>;

    /// Fetches all product records as a finite, materialized sequence.
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Replaces an existing record in full.
    async fn update(&self, product: &Product) -> Result<(), ProductRepositoryError>;

    /// Removes a record by id.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - No record with that id existed
    async fn delete(&self, id: Uuid) -> Result<bool, ProductRepositoryError>;

    /// Checks whether the backing tables exist.
    ///
    /// Called once at startup as a readiness probe so that a misconfigured
    /// deployment fails clearly instead of erroring on the first request.
    async fn check_tables_created(&self) -> Result<bool, ProductRepositoryError>;
}
