//! The product mutation orchestrator.
//!
//! Coordinates every client mutation across the three systems of record:
//! the PostgreSQL primary store, the OpenSearch index, and the Kafka topics.
//! There is no distributed transaction across them. The primary-store write
//! is the unit of atomicity; once it commits, index sync and event publish
//! run in a fixed order and their failures are logged and swallowed: the
//! client still receives success, and the divergence is reconciled
//! out-of-band.

mod requests;

pub use requests::{CreateProductInput, ImageUpload, UpdateProductInput};

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use catalog_kafka::{
    ProductEventPublisher, TOPIC_PRODUCT_EVENTS, TOPIC_PRODUCT_NOTIFICATIONS,
};
use catalog_repository::{BlobStore, CategoryRepository, ProductRepository};
use catalog_search_repository::SearchIndexProvider;
use catalog_shared::{
    Product, ProductDocument, ProductEvent, ProductEventKind, ProductImage, Seller,
};

use crate::errors::ProductServiceError;

/// Coordinates create/read/update/delete across the backing systems.
///
/// All collaborators are constructed at startup and injected; the
/// orchestrator itself is a straight-through per-request pipeline with no
/// internal queuing or shared mutable state.
pub struct ProductOrchestrator {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    blobs: Arc<dyn BlobStore>,
    search: Arc<dyn SearchIndexProvider>,
    publisher: Arc<dyn ProductEventPublisher>,
}

impl ProductOrchestrator {
    /// Create a new orchestrator with the given collaborators.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        blobs: Arc<dyn BlobStore>,
        search: Arc<dyn SearchIndexProvider>,
        publisher: Arc<dyn ProductEventPublisher>,
    ) -> Self {
        Self {
            products,
            categories,
            blobs,
            search,
            publisher,
        }
    }

    /// Create a product on behalf of `actor`.
    ///
    /// The category must resolve before anything is written; the seller id
    /// of the new record is the acting user and never changes afterwards.
    pub async fn create(
        &self,
        input: CreateProductInput,
        actor: Uuid,
    ) -> Result<ProductDocument, ProductServiceError> {
        if input.price < Decimal::ZERO {
            return Err(ProductServiceError::validation("price must be non-negative"));
        }
        if input.quantity < 0 {
            return Err(ProductServiceError::validation(
                "quantity must be non-negative",
            ));
        }

        let category = self
            .categories
            .resolve_name(input.category_id)
            .await?
            .ok_or(ProductServiceError::CategoryNotFound)?;

        let image = self.resolve_image(input.image_url, input.image).await?;

        let profile_image_id = match input.profile_image {
            Some(upload) => Some(
                self.blobs
                    .store(&upload.bytes, &upload.filename, &upload.content_type)
                    .await?,
            ),
            None => None,
        };

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category_id: input.category_id,
            price: input.price,
            quantity: input.quantity,
            image,
            seller: Seller {
                id: actor,
                profile_url: input.profile_url.filter(|u| !u.is_empty()),
                profile_image_id,
            },
            created_at: now,
            updated_at: now,
        };

        self.products.insert(&product).await?;
        info!(product_id = %product.id, seller_id = %actor, "Product created");

        let document = ProductDocument::from_product(&product, Some(category));
        self.propagate(ProductEventKind::Created, &document).await;

        Ok(document)
    }

    /// Fetch a product by id with its category name joined in.
    pub async fn get(&self, id: Uuid) -> Result<ProductDocument, ProductServiceError> {
        let product = self
            .products
            .get(id)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)?;

        let category = self.categories.resolve_name(product.category_id).await?;
        Ok(ProductDocument::from_product(&product, category))
    }

    /// Fetch all products with their category names resolved in one batch.
    pub async fn list(&self) -> Result<Vec<ProductDocument>, ProductServiceError> {
        let products = self.products.list().await?;

        let category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();
        let names = self.categories.name_map(&category_ids).await?;

        Ok(products
            .iter()
            .map(|product| {
                ProductDocument::from_product(product, names.get(&product.category_id).cloned())
            })
            .collect())
    }

    /// Update a product on behalf of `actor`.
    ///
    /// Only the owning seller may update. A changed category is validated
    /// before any write; empty or zero field values mean "no change", which
    /// is part of the service's published contract.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateProductInput,
        actor: Uuid,
    ) -> Result<ProductDocument, ProductServiceError> {
        if input.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(ProductServiceError::validation("price must be non-negative"));
        }
        if input.quantity.is_some_and(|q| q < 0) {
            return Err(ProductServiceError::validation(
                "quantity must be non-negative",
            ));
        }

        let mut product = self
            .products
            .get(id)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)?;

        if product.seller.id != actor {
            return Err(ProductServiceError::NotOwner);
        }

        // A changed category must resolve; an unchanged one only needs its
        // name re-read for denormalization.
        let category = match input.category_id {
            Some(new_category) if new_category != product.category_id => {
                let name = self
                    .categories
                    .resolve_name(new_category)
                    .await?
                    .ok_or(ProductServiceError::CategoryNotFound)?;
                product.category_id = new_category;
                Some(name)
            }
            _ => self.categories.resolve_name(product.category_id).await?,
        };

        if let Some(title) = input.title.filter(|t| !t.is_empty()) {
            product.title = title;
        }
        if let Some(description) = input.description.filter(|d| !d.is_empty()) {
            product.description = description;
        }
        if let Some(price) = input.price.filter(|p| !p.is_zero()) {
            product.price = price;
        }
        if let Some(quantity) = input.quantity.filter(|q| *q != 0) {
            product.quantity = quantity;
        }
        if let Some(profile_url) = input.profile_url.filter(|u| !u.is_empty()) {
            product.seller.profile_url = Some(profile_url);
        }

        if let Some(image) = self.resolve_image(input.image_url, input.image).await? {
            if let Some(ProductImage::Blob(old_blob)) = &product.image {
                // The displaced blob is not reclaimed here; surface it for
                // operational cleanup.
                warn!(
                    product_id = %product.id,
                    blob_id = %old_blob,
                    "Replacing blob-backed image leaves an orphaned blob"
                );
            }
            product.image = Some(image);
        }

        product.updated_at = Utc::now();
        self.products.update(&product).await?;
        info!(product_id = %product.id, "Product updated");

        let document = ProductDocument::from_product(&product, category);
        self.propagate(ProductEventKind::Updated, &document).await;

        Ok(document)
    }

    /// Delete a product on behalf of `actor`.
    ///
    /// Owned blobs (product image, seller profile image) are deleted first,
    /// each independently; a failure in one never prevents the other or
    /// the record deletion. The category name is snapshotted before the
    /// record disappears so the `deleted` event carries it.
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> Result<(), ProductServiceError> {
        let product = self
            .products
            .get(id)
            .await?
            .ok_or(ProductServiceError::ProductNotFound)?;

        if product.seller.id != actor {
            return Err(ProductServiceError::NotOwner);
        }

        if let Some(ProductImage::Blob(blob_id)) = &product.image {
            if let Err(e) = self.blobs.delete(*blob_id).await {
                warn!(
                    product_id = %id,
                    blob_id = %blob_id,
                    error = %e,
                    "Failed to delete product image blob"
                );
            }
        }
        if let Some(profile_blob) = product.seller.profile_image_id {
            if let Err(e) = self.blobs.delete(profile_blob).await {
                warn!(
                    product_id = %id,
                    blob_id = %profile_blob,
                    error = %e,
                    "Failed to delete seller profile image blob"
                );
            }
        }

        let category = self.categories.resolve_name(product.category_id).await?;

        if !self.products.delete(id).await? {
            return Err(ProductServiceError::ProductNotFound);
        }
        info!(product_id = %id, "Product deleted");

        let document = ProductDocument::from_product(&product, category);
        self.propagate(ProductEventKind::Deleted, &document).await;

        Ok(())
    }

    /// Resolve the image input to its stored representation.
    ///
    /// An external URL wins over an uploaded payload; never both. An empty
    /// URL counts as absent.
    async fn resolve_image(
        &self,
        image_url: Option<String>,
        upload: Option<ImageUpload>,
    ) -> Result<Option<ProductImage>, ProductServiceError> {
        if let Some(url) = image_url.filter(|u| !u.is_empty()) {
            return Ok(Some(ProductImage::Url(url)));
        }

        match upload {
            Some(file) => {
                let blob_id = self
                    .blobs
                    .store(&file.bytes, &file.filename, &file.content_type)
                    .await?;
                Ok(Some(ProductImage::Blob(blob_id)))
            }
            None => Ok(None),
        }
    }

    /// Fan a committed mutation out to the search index and both topics.
    ///
    /// Ordering is fixed: index sync, then the general topic, then the
    /// notifications topic. The durable write has already committed, so
    /// failures here are logged and swallowed, never surfaced to the
    /// client, and never roll back the write.
    async fn propagate(&self, kind: ProductEventKind, document: &ProductDocument) {
        match kind {
            ProductEventKind::Deleted => {
                if let Err(e) = self.search.delete_document(document.id).await {
                    error!(
                        product_id = %document.id,
                        error = %e,
                        "Failed to remove product from search index"
                    );
                }
            }
            _ => {
                if let Err(e) = self.search.upsert_document(document).await {
                    error!(
                        product_id = %document.id,
                        error = %e,
                        "Failed to sync product to search index"
                    );
                }
            }
        }

        let event = ProductEvent::new(kind, document.clone());
        for topic in [TOPIC_PRODUCT_EVENTS, TOPIC_PRODUCT_NOTIFICATIONS] {
            if let Err(e) = self.publisher.publish(topic, &event) {
                error!(
                    product_id = %document.id,
                    topic,
                    error = %e,
                    "Failed to publish product event"
                );
            }
        }
    }
}
