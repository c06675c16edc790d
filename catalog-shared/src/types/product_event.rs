//! Outbound product change events.

use serde::{Deserialize, Serialize};

use crate::types::product_document::ProductDocument;

/// The kind of change an event describes.
///
/// The serialized values are the wire-level `type` strings consumers already
/// match on; they are part of the published contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEventKind {
    #[serde(rename = "product_created")]
    Created,
    #[serde(rename = "product_updated")]
    Updated,
    #[serde(rename = "product_deleted")]
    Deleted,
}

/// Envelope published to the product topics.
///
/// Immutable once emitted and never persisted by this service. The payload
/// carries the full denormalized snapshot (category name included) so that
/// downstream consumers do not depend on the primary store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductEvent {
    #[serde(rename = "type")]
    pub kind: ProductEventKind,
    pub data: ProductDocument,
}

impl ProductEvent {
    pub fn new(kind: ProductEventKind, data: ProductDocument) -> Self {
        Self { kind, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::product_document::SellerDocument;
    use uuid::Uuid;

    fn sample_document() -> ProductDocument {
        ProductDocument {
            id: Uuid::new_v4(),
            title: "Chair".to_string(),
            description: "A chair".to_string(),
            category_id: Uuid::new_v4(),
            category: Some("Furniture".to_string()),
            price: 49.99,
            quantity: 10,
            image: None,
            image_id: None,
            seller: SellerDocument {
                id: Uuid::new_v4(),
                profile_url: None,
                profile_image_id: None,
            },
        }
    }

    #[test]
    fn event_kind_uses_wire_names() {
        let event = ProductEvent::new(ProductEventKind::Created, sample_document());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "product_created");

        let event = ProductEvent::new(ProductEventKind::Deleted, sample_document());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "product_deleted");
    }

    #[test]
    fn event_carries_the_full_snapshot() {
        let doc = sample_document();
        let event = ProductEvent::new(ProductEventKind::Updated, doc.clone());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["title"], "Chair");
        assert_eq!(json["data"]["category"], "Furniture");
        assert_eq!(event.data, doc);
    }
}
