//! # Catalog Search Repository
//!
//! This crate provides traits and implementations for keeping the product
//! search index synchronized with the primary store. It includes definitions
//! for errors, interfaces, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider, DEFAULT_INDEX_NAME};
