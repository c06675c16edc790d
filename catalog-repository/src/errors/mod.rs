//! Error types for the catalog repositories.
//! Consolidates and re-exports error types for product, category, and blob
//! store operations.

mod blobs;
mod categories;
mod products;

pub use blobs::BlobStoreError;
pub use categories::CategoryRepositoryError;
pub use products::ProductRepositoryError;
