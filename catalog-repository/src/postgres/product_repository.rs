//! PostgreSQL implementation of the primary product store.
//!
//! Products live in a single `products` row with the seller sub-entity
//! flattened into prefixed columns. The image invariant (URL and blob
//! reference are mutually exclusive) is enforced both by the domain enum and
//! by a table check constraint.
//!
//! Queries are built at runtime so the crate compiles without a live
//! database connection.

use async_trait::async_trait;
use catalog_shared::{Product, ProductImage, Seller};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::ProductRepositoryError;
use crate::interfaces::ProductRepository;

/// PostgreSQL implementation of the primary product store.
///
/// Holds a `sqlx::PgPool`; each operation runs as a single statement, which
/// is the unit of atomicity for the whole mutation protocol.
pub struct PostgresProductRepository {
    pool: sqlx::PgPool,
}

impl PostgresProductRepository {
    /// Creates a new repository over an existing connection pool.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

/// Flat row shape mapped from the `products` table.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    title: String,
    description: String,
    category_id: Uuid,
    price: Decimal,
    quantity: i32,
    image_url: Option<String>,
    image_blob_id: Option<Uuid>,
    seller_id: Uuid,
    seller_profile_url: Option<String>,
    seller_profile_image_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let image = match (row.image_url, row.image_blob_id) {
            (Some(url), _) => Some(ProductImage::Url(url)),
            (None, Some(blob_id)) => Some(ProductImage::Blob(blob_id)),
            (None, None) => None,
        };

        Product {
            id: row.id,
            title: row.title,
            description: row.description,
            category_id: row.category_id,
            price: row.price,
            quantity: row.quantity,
            image,
            seller: Seller {
                id: row.seller_id,
                profile_url: row.seller_profile_url,
                profile_image_id: row.seller_profile_image_id,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, title, description, category_id, price, quantity, \
     image_url, image_blob_id, seller_id, seller_profile_url, seller_profile_image_id, \
     created_at, updated_at";

fn image_columns(product: &Product) -> (Option<&str>, Option<Uuid>) {
    match &product.image {
        Some(ProductImage::Url(url)) => (Some(url.as_str()), None),
        Some(ProductImage::Blob(blob_id)) => (None, Some(*blob_id)),
        None => (None, None),
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let (image_url, image_blob_id) = image_columns(product);

        sqlx::query(
            "INSERT INTO products (id, title, description, category_id, price, quantity, \
             image_url, image_blob_id, seller_id, seller_profile_url, seller_profile_image_id, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.quantity)
        .bind(image_url)
        .bind(image_blob_id)
        .bind(product.seller.id)
        .bind(&product.seller.profile_url)
        .bind(product.seller.profile_image_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ProductRepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn update(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let (image_url, image_blob_id) = image_columns(product);

        sqlx::query(
            "UPDATE products SET title = $2, description = $3, category_id = $4, price = $5, \
             quantity = $6, image_url = $7, image_blob_id = $8, seller_profile_url = $9, \
             seller_profile_image_id = $10, updated_at = $11 \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.price)
        .bind(product.quantity)
        .bind(image_url)
        .bind(image_blob_id)
        .bind(&product.seller.profile_url)
        .bind(product.seller.profile_image_id)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ProductRepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn check_tables_created(&self) -> Result<bool, ProductRepositoryError> {
        for table in ["products", "categories", "blobs"] {
            let table_exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
            )
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
            if !table_exists {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
