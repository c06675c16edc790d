//! PostgreSQL implementations of the catalog repositories.

mod blob_store;
mod category_repository;
mod product_repository;

pub use blob_store::PostgresBlobStore;
pub use category_repository::PostgresCategoryRepository;
pub use product_repository::PostgresProductRepository;
