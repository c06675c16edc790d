//! Operation inputs for the product mutation orchestrator.

use rust_decimal::Decimal;
use uuid::Uuid;

/// A binary image payload received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub price: Decimal,
    pub quantity: i32,
    /// External image URL; wins over `image` when both are supplied.
    pub image_url: Option<String>,
    /// Uploaded image payload, persisted via the blob store.
    pub image: Option<ImageUpload>,
    pub profile_url: Option<String>,
    /// Uploaded seller profile image.
    pub profile_image: Option<ImageUpload>,
}

/// Input for updating a product.
///
/// Text and numeric fields follow the service's falsy-skip contract: a
/// missing, empty, or zero value leaves the stored field untouched. The
/// category and image fields are replaced whenever they are supplied.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
    pub image: Option<ImageUpload>,
    pub profile_url: Option<String>,
}
