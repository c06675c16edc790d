//! # Catalog Shared
//!
//! This crate defines the shared data structures used across the product
//! catalog service: the product record held by the primary store, the
//! denormalized document written to the search index, and the change events
//! published to the message bus.

pub mod types;

pub use types::{
    Product, ProductDocument, ProductEvent, ProductEventKind, ProductImage, Seller, SellerDocument,
};
