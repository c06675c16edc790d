//! Denormalized product projection.
//!
//! A single projection serves both downstream sinks: it is the document
//! written to the search index and the `data` payload of outbound product
//! events, so consumers never have to read back from the primary store.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::product::{Product, ProductImage};

/// Seller sub-object as it appears in documents and event payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SellerDocument {
    pub id: Uuid,
    #[serde(rename = "profileUrl", skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(rename = "profileImageId", skip_serializing_if = "Option::is_none")]
    pub profile_image_id: Option<Uuid>,
}

/// Document representation of a product with its category name embedded.
///
/// Keyed by product id in the search index; each sync replaces the whole
/// document (upsert semantics), and the document is removed when the product
/// is deleted. The wire field names match what event consumers already
/// expect from this service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDocument {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    /// Resolved category name; `None` when the referenced category no
    /// longer exists.
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i32,
    /// External image URL, when the product is URL-backed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Blob reference, when the product image is blob-backed.
    #[serde(rename = "imageId", skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Uuid>,
    pub seller: SellerDocument,
}

impl ProductDocument {
    /// Denormalize a product with its resolved category name.
    pub fn from_product(product: &Product, category: Option<String>) -> Self {
        let (image, image_id) = match &product.image {
            Some(ProductImage::Url(url)) => (Some(url.clone()), None),
            Some(ProductImage::Blob(id)) => (None, Some(*id)),
            None => (None, None),
        };

        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            category_id: product.category_id,
            category,
            price: product.price.to_f64().unwrap_or_default(),
            quantity: product.quantity,
            image,
            image_id,
            seller: SellerDocument {
                id: product.seller.id,
                profile_url: product.seller.profile_url.clone(),
                profile_image_id: product.seller.profile_image_id,
            },
        }
    }

    /// The id used for the search-index document.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::product::Seller;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn sample_product() -> Product {
        Product {
            id: Uuid::new_v4(),
            title: "Chair".to_string(),
            description: "A sturdy chair".to_string(),
            category_id: Uuid::new_v4(),
            price: Decimal::new(4999, 2),
            quantity: 10,
            image: Some(ProductImage::Url("https://img.test/chair.png".into())),
            seller: Seller {
                id: Uuid::new_v4(),
                profile_url: Some("https://shop.test/u/1".into()),
                profile_image_id: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn denormalizes_category_and_price() {
        let product = sample_product();
        let doc = ProductDocument::from_product(&product, Some("Furniture".to_string()));

        assert_eq!(doc.id, product.id);
        assert_eq!(doc.category.as_deref(), Some("Furniture"));
        assert_eq!(doc.price, 49.99);
        assert_eq!(doc.quantity, 10);
        assert_eq!(doc.image.as_deref(), Some("https://img.test/chair.png"));
        assert!(doc.image_id.is_none());
        assert_eq!(doc.seller.id, product.seller.id);
    }

    #[test]
    fn blob_backed_image_maps_to_image_id() {
        let mut product = sample_product();
        let blob_id = Uuid::new_v4();
        product.image = Some(ProductImage::Blob(blob_id));

        let doc = ProductDocument::from_product(&product, None);
        assert!(doc.image.is_none());
        assert_eq!(doc.image_id, Some(blob_id));
        assert!(doc.category.is_none());
    }

    #[test]
    fn document_id_is_the_product_id() {
        let product = sample_product();
        let doc = ProductDocument::from_product(&product, None);
        assert_eq!(doc.document_id(), product.id.to_string());
    }

    #[test]
    fn serializes_price_as_float_and_camel_case_wire_names() {
        let product = sample_product();
        let doc = ProductDocument::from_product(&product, Some("Furniture".to_string()));

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["price"].is_f64());
        assert_eq!(json["category"], "Furniture");
        assert_eq!(json["seller"]["profileUrl"], "https://shop.test/u/1");
        // Absent optional fields are omitted entirely.
        assert!(json.get("imageId").is_none());
    }

    #[test]
    fn serialization_round_trips() {
        let product = sample_product();
        let doc = ProductDocument::from_product(&product, Some("Furniture".to_string()));

        let json = serde_json::to_string(&doc).unwrap();
        let back: ProductDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
