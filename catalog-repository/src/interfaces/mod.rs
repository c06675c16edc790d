//! This module defines and re-exports the interfaces for the catalog's
//! backing stores. It serves as a central point for accessing traits related
//! to data interaction.

mod blobs;
mod categories;
mod products;

pub use blobs::BlobStore;
pub use categories::CategoryRepository;
pub use products::ProductRepository;
