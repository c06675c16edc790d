//! # Catalog Repository
//! This crate provides traits and implementations for the catalog's backing
//! stores: the primary product store, the read-only category resolver, and
//! the blob store for uploaded images. It includes definitions for errors,
//! interfaces, and concrete implementations for PostgreSQL.

pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::{BlobStoreError, CategoryRepositoryError, ProductRepositoryError};
pub use interfaces::{BlobStore, CategoryRepository, ProductRepository};
pub use postgres::{PostgresBlobStore, PostgresCategoryRepository, PostgresProductRepository};
