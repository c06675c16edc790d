//! Core data structures for the product catalog.

pub mod product;
pub mod product_document;
pub mod product_event;

pub use product::{Product, ProductImage, Seller};
pub use product_document::{ProductDocument, SellerDocument};
pub use product_event::{ProductEvent, ProductEventKind};
