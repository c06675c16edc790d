//! Kafka plumbing for the product catalog.
//!
//! This crate provides the shared producer configuration and the
//! [`ProductEventPublisher`] seam the mutation orchestrator writes through.
//!
//! ## Usage
//!
//! ```ignore
//! use catalog_kafka::{create_producer, KafkaProductEventPublisher};
//!
//! let producer = create_producer("localhost:9092", "catalog-service")?;
//! let publisher = KafkaProductEventPublisher::new(producer);
//! ```

mod config;
mod publisher;

pub use config::{create_producer, create_producer_with_config, ProducerConfig};
pub use publisher::{
    KafkaProductEventPublisher, ProductEventPublisher, PublishError, TOPIC_PRODUCT_EVENTS,
    TOPIC_PRODUCT_NOTIFICATIONS,
};

// Re-export commonly used rdkafka types for convenience
pub use rdkafka::producer::{BaseProducer, BaseRecord, Producer};
