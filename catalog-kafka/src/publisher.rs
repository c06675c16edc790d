//! Fire-and-forget publishing of product change events.

use std::time::Duration;

use catalog_shared::ProductEvent;
use rdkafka::producer::{BaseProducer, BaseRecord};
use thiserror::Error;
use tracing::debug;

/// General product change-feed topic.
pub const TOPIC_PRODUCT_EVENTS: &str = "product_events";

/// Topic feeding the notifications service. Always receives the same payload
/// as the general topic for each mutation.
pub const TOPIC_PRODUCT_NOTIFICATIONS: &str = "product_events_for_notifications";

/// Errors raised while handing an event to the producer.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Kafka error: {0}")]
    Kafka(String),
}

/// Fire-and-forget publisher for product change events.
///
/// `publish` enqueues the event and returns; delivery is never confirmed to
/// the caller and an error here only means the event could not be handed to
/// the producer at all. Callers log failures and move on; downstream
/// divergence is reconciled out-of-band, not by failing the client request.
pub trait ProductEventPublisher: Send + Sync {
    fn publish(&self, topic: &str, event: &ProductEvent) -> Result<(), PublishError>;
}

/// Kafka-backed publisher over a shared [`BaseProducer`].
pub struct KafkaProductEventPublisher {
    producer: BaseProducer,
}

impl KafkaProductEventPublisher {
    pub fn new(producer: BaseProducer) -> Self {
        Self { producer }
    }
}

impl ProductEventPublisher for KafkaProductEventPublisher {
    fn publish(&self, topic: &str, event: &ProductEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(event)?;
        let key = event.data.id.to_string();

        let record = BaseRecord::to(topic).key(&key).payload(&payload);
        self.producer
            .send(record)
            .map_err(|(e, _)| PublishError::Kafka(e.to_string()))?;

        // Serve pending delivery callbacks without blocking the request path.
        self.producer.poll(Duration::ZERO);

        debug!(topic, key = %key, "Product event enqueued");
        Ok(())
    }
}
