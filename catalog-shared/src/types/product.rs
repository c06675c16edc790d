//! Product record types as held by the primary store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Where a product's image lives.
///
/// A product carries at most one image source at a time: either an external
/// URL stored as-is, or a reference to a blob held by the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductImage {
    /// Externally hosted image URL.
    Url(String),
    /// Reference to an uploaded blob.
    Blob(Uuid),
}

/// Seller sub-entity embedded in a product.
///
/// `id` is fixed at creation time and equals the creating actor's identity.
/// Ownership checks on update/delete compare against it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub id: Uuid,
    pub profile_url: Option<String>,
    /// Blob reference to the seller's profile image, if one was uploaded.
    pub profile_image_id: Option<Uuid>,
}

/// A product record as held by the primary store.
///
/// The record is the source of truth; the search index and event consumers
/// only ever see the denormalized projection derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Reference to the owning category; must resolve at write time.
    pub category_id: Uuid,
    pub price: Decimal,
    pub quantity: i32,
    pub image: Option<ProductImage>,
    pub seller: Seller,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The image URL, if the product is URL-backed.
    pub fn image_url(&self) -> Option<&str> {
        match &self.image {
            Some(ProductImage::Url(url)) => Some(url),
            _ => None,
        }
    }

    /// The blob reference, if the product image is blob-backed.
    pub fn image_blob_id(&self) -> Option<Uuid> {
        match &self.image {
            Some(ProductImage::Blob(id)) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product(image: Option<ProductImage>) -> Product {
        Product {
            id: Uuid::new_v4(),
            title: "Chair".to_string(),
            description: "A chair".to_string(),
            category_id: Uuid::new_v4(),
            price: Decimal::new(4999, 2),
            quantity: 10,
            image,
            seller: Seller {
                id: Uuid::new_v4(),
                profile_url: None,
                profile_image_id: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn url_backed_image_has_no_blob_id() {
        let product = sample_product(Some(ProductImage::Url("https://img.test/1.png".into())));
        assert_eq!(product.image_url(), Some("https://img.test/1.png"));
        assert!(product.image_blob_id().is_none());
    }

    #[test]
    fn blob_backed_image_has_no_url() {
        let blob_id = Uuid::new_v4();
        let product = sample_product(Some(ProductImage::Blob(blob_id)));
        assert!(product.image_url().is_none());
        assert_eq!(product.image_blob_id(), Some(blob_id));
    }

    #[test]
    fn missing_image_yields_neither() {
        let product = sample_product(None);
        assert!(product.image_url().is_none());
        assert!(product.image_blob_id().is_none());
    }
}
