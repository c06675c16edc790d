//! End-to-end tests for the product mutation pipeline.
//!
//! These tests use the real `ProductOrchestrator` but mock collaborators
//! (primary store, category resolver, blob store, search provider, and
//! event publisher) so every write-path property can be asserted without
//! backing services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use catalog_kafka::{
    ProductEventPublisher, PublishError, TOPIC_PRODUCT_EVENTS, TOPIC_PRODUCT_NOTIFICATIONS,
};
use catalog_repository::{
    BlobStore, BlobStoreError, CategoryRepository, CategoryRepositoryError, ProductRepository,
    ProductRepositoryError,
};
use catalog_search_repository::{SearchIndexError, SearchIndexProvider};
use catalog_service::orchestrator::{CreateProductInput, ImageUpload, ProductOrchestrator};
use catalog_service::ProductServiceError;
use catalog_shared::{Product, ProductDocument, ProductEvent, ProductEventKind};

struct InMemoryProducts {
    records: Mutex<HashMap<Uuid, Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        self.records
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        self.records
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ProductRepositoryError> {
        Ok(self.records.lock().unwrap().remove(&id).is_some())
    }

    async fn check_tables_created(&self) -> Result<bool, ProductRepositoryError> {
        Ok(true)
    }
}

struct StaticCategories {
    names: HashMap<Uuid, String>,
}

#[async_trait]
impl CategoryRepository for StaticCategories {
    async fn resolve_name(&self, id: Uuid) -> Result<Option<String>, CategoryRepositoryError> {
        Ok(self.names.get(&id).cloned())
    }

    async fn name_map(
        &self,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, CategoryRepositoryError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.names.get(id).map(|name| (*id, name.clone())))
            .collect())
    }
}

struct RecordingBlobStore {
    deleted: Mutex<Vec<Uuid>>,
    fail_delete: bool,
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    async fn store(
        &self,
        _bytes: &[u8],
        _filename: &str,
        _content_type: &str,
    ) -> Result<Uuid, BlobStoreError> {
        Ok(Uuid::new_v4())
    }

    async fn delete(&self, id: Uuid) -> Result<(), BlobStoreError> {
        if self.fail_delete {
            return Err(BlobStoreError::DatabaseError(sqlx::Error::PoolClosed));
        }
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

struct RecordingSearchIndex {
    documents: Mutex<HashMap<Uuid, ProductDocument>>,
}

#[async_trait]
impl SearchIndexProvider for RecordingSearchIndex {
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn upsert_document(&self, document: &ProductDocument) -> Result<(), SearchIndexError> {
        self.documents
            .lock()
            .unwrap()
            .insert(document.id, document.clone());
        Ok(())
    }

    async fn delete_document(&self, product_id: Uuid) -> Result<(), SearchIndexError> {
        self.documents.lock().unwrap().remove(&product_id);
        Ok(())
    }
}

struct RecordingPublisher {
    events: Mutex<Vec<(String, ProductEvent)>>,
}

impl ProductEventPublisher for RecordingPublisher {
    fn publish(&self, topic: &str, event: &ProductEvent) -> Result<(), PublishError> {
        self.events
            .lock()
            .unwrap()
            .push((topic.to_string(), event.clone()));
        Ok(())
    }
}

struct Fixture {
    orchestrator: ProductOrchestrator,
    products: Arc<InMemoryProducts>,
    blobs: Arc<RecordingBlobStore>,
    search: Arc<RecordingSearchIndex>,
    publisher: Arc<RecordingPublisher>,
    furniture: Uuid,
}

fn fixture() -> Fixture {
    let furniture = Uuid::new_v4();

    let products = Arc::new(InMemoryProducts {
        records: Mutex::new(HashMap::new()),
    });
    let categories = Arc::new(StaticCategories {
        names: HashMap::from([(furniture, "Furniture".to_string())]),
    });
    let blobs = Arc::new(RecordingBlobStore {
        deleted: Mutex::new(Vec::new()),
        fail_delete: false,
    });
    let search = Arc::new(RecordingSearchIndex {
        documents: Mutex::new(HashMap::new()),
    });
    let publisher = Arc::new(RecordingPublisher {
        events: Mutex::new(Vec::new()),
    });

    let orchestrator = ProductOrchestrator::new(
        products.clone(),
        categories,
        blobs.clone(),
        search.clone(),
        publisher.clone(),
    );

    Fixture {
        orchestrator,
        products,
        blobs,
        search,
        publisher,
        furniture,
    }
}

fn chair_input(category_id: Uuid) -> CreateProductInput {
    CreateProductInput {
        title: "Chair".to_string(),
        description: "A sturdy chair".to_string(),
        category_id,
        price: Decimal::new(4999, 2),
        quantity: 10,
        image_url: None,
        image: None,
        profile_url: None,
        profile_image: None,
    }
}

fn png_upload(name: &str) -> ImageUpload {
    ImageUpload {
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
        filename: name.to_string(),
        content_type: "image/png".to_string(),
    }
}

/// Scenario: a valid create lands in all three systems with the resolved
/// category name everywhere.
#[tokio::test]
async fn created_product_is_visible_in_store_index_and_both_topics() {
    let fx = fixture();
    let seller = Uuid::new_v4();

    let document = fx
        .orchestrator
        .create(chair_input(fx.furniture), seller)
        .await
        .unwrap();

    assert_eq!(document.category.as_deref(), Some("Furniture"));

    let indexed = fx
        .search
        .documents
        .lock()
        .unwrap()
        .get(&document.id)
        .cloned()
        .unwrap();
    assert_eq!(indexed.category.as_deref(), Some("Furniture"));

    let events = fx.publisher.events.lock().unwrap().clone();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, TOPIC_PRODUCT_EVENTS);
    assert_eq!(events[1].0, TOPIC_PRODUCT_NOTIFICATIONS);
    assert_eq!(events[0].1.kind, ProductEventKind::Created);
    // Both topics receive the identical payload.
    assert_eq!(events[0].1, events[1].1);
}

/// Scenario: an update by a different actor fails closed with no store
/// mutation, no index sync, no publish.
#[tokio::test]
async fn foreign_actor_update_leaves_every_system_untouched() {
    let fx = fixture();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();

    let created = fx
        .orchestrator
        .create(chair_input(fx.furniture), owner)
        .await
        .unwrap();
    fx.publisher.events.lock().unwrap().clear();

    let err = fx
        .orchestrator
        .update(
            created.id,
            catalog_service::orchestrator::UpdateProductInput {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
            intruder,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProductServiceError::NotOwner));
    assert_eq!(
        fx.products
            .records
            .lock()
            .unwrap()
            .get(&created.id)
            .unwrap()
            .title,
        "Chair"
    );
    assert_eq!(
        fx.search
            .documents
            .lock()
            .unwrap()
            .get(&created.id)
            .unwrap()
            .title,
        "Chair"
    );
    assert!(fx.publisher.events.lock().unwrap().is_empty());
}

/// Scenario: deleting a product with a blob image and a seller profile blob
/// removes both blobs, the record, and the index document, and publishes the
/// pre-deletion snapshot.
#[tokio::test]
async fn delete_cleans_up_blobs_and_publishes_final_snapshot() {
    let fx = fixture();
    let seller = Uuid::new_v4();

    let mut input = chair_input(fx.furniture);
    input.image = Some(png_upload("chair.png"));
    input.profile_image = Some(png_upload("me.png"));
    let created = fx.orchestrator.create(input, seller).await.unwrap();
    fx.publisher.events.lock().unwrap().clear();

    fx.orchestrator.delete(created.id, seller).await.unwrap();

    assert_eq!(fx.blobs.deleted.lock().unwrap().len(), 2);
    assert!(fx.products.records.lock().unwrap().is_empty());
    assert!(fx.search.documents.lock().unwrap().is_empty());

    let events = fx.publisher.events.lock().unwrap().clone();
    assert_eq!(events.len(), 2);
    for (_, event) in &events {
        assert_eq!(event.kind, ProductEventKind::Deleted);
        assert_eq!(event.data.title, "Chair");
        assert_eq!(event.data.category.as_deref(), Some("Furniture"));
    }
}

/// Scenario: the falsy-skip update contract: switching the category while
/// sending an empty title changes only the category.
#[tokio::test]
async fn update_with_empty_title_only_switches_category() {
    let fx = fixture();
    let seller = Uuid::new_v4();
    let toys = Uuid::new_v4();

    // Rebuild the fixture with a second category available.
    let categories = Arc::new(StaticCategories {
        names: HashMap::from([
            (fx.furniture, "Furniture".to_string()),
            (toys, "Toys".to_string()),
        ]),
    });
    let orchestrator = ProductOrchestrator::new(
        fx.products.clone(),
        categories,
        fx.blobs.clone(),
        fx.search.clone(),
        fx.publisher.clone(),
    );

    let created = orchestrator
        .create(chair_input(fx.furniture), seller)
        .await
        .unwrap();

    let updated = orchestrator
        .update(
            created.id,
            catalog_service::orchestrator::UpdateProductInput {
                category_id: Some(toys),
                title: Some(String::new()),
                ..Default::default()
            },
            seller,
        )
        .await
        .unwrap();

    assert_eq!(updated.category.as_deref(), Some("Toys"));
    assert_eq!(updated.title, "Chair");

    // The index document was fully replaced with the new projection.
    let indexed = fx
        .search
        .documents
        .lock()
        .unwrap()
        .get(&created.id)
        .cloned()
        .unwrap();
    assert_eq!(indexed.category.as_deref(), Some("Toys"));
    assert_eq!(indexed.title, "Chair");
}
