//! Dependency initialization and wiring for the catalog service.
//!
//! Every connection is established here, once, at startup; repositories,
//! search provider, and event producer are then injected into the
//! orchestrator. A half-provisioned deployment fails here with a clear
//! error instead of hanging or erroring on the first request.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::time::sleep;
use tracing::{info, warn};

use catalog_kafka::{create_producer, KafkaProductEventPublisher};
use catalog_repository::{
    PostgresBlobStore, PostgresCategoryRepository, PostgresProductRepository, ProductRepository,
};
use catalog_search_repository::{
    IndexConfig, OpenSearchProvider, SearchIndexProvider, DEFAULT_INDEX_NAME,
};

use crate::api::auth::JwtDecoder;
use crate::orchestrator::ProductOrchestrator;
use crate::StartupError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default Kafka broker address.
const DEFAULT_KAFKA_BROKER: &str = "localhost:9092";

/// Default HTTP bind address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Client id reported to the Kafka brokers.
const KAFKA_CLIENT_ID: &str = "catalog-service";

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive)
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("OPENSEARCH_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator, ready to serve requests.
    pub orchestrator: Arc<ProductOrchestrator>,
    /// Verifier for bearer tokens.
    pub jwt: Arc<JwtDecoder>,
    /// Address the HTTP server binds to.
    pub bind_addr: String,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `JWT_SECRET`: HS256 secret for bearer tokens (required)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `PRODUCTS_INDEX`: search index name (default: "products")
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: retry interval in seconds (default: 15)
    /// - `KAFKA_BROKER`: Kafka broker address (default: localhost:9092)
    /// - `BIND_ADDR`: HTTP bind address (default: 0.0.0.0:5000)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StartupError)` - If any backing system cannot be wired up
    pub async fn new() -> Result<Self, StartupError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| StartupError::config("DATABASE_URL must be set"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| StartupError::config("JWT_SECRET must be set"))?;
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let index_name =
            env::var("PRODUCTS_INDEX").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        let kafka_broker =
            env::var("KAFKA_BROKER").unwrap_or_else(|_| DEFAULT_KAFKA_BROKER.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("OPENSEARCH_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

        info!(
            opensearch_url = %opensearch_url,
            kafka_broker = %kafka_broker,
            index = %index_name,
            connection_mode = ?connection_mode,
            "Initializing dependencies"
        );

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(&database_url)
            .await
            .map_err(|e| StartupError::config(format!("Failed to connect to PostgreSQL: {}", e)))?;

        let products = Arc::new(PostgresProductRepository::new(pool.clone()));

        // Readiness probe: a deployment missing its schema fails here with a
        // clear message, not on the first request.
        let schema_ready = products.check_tables_created().await.map_err(|e| {
            StartupError::config(format!("Failed to probe database schema: {}", e))
        })?;
        if !schema_ready {
            return Err(StartupError::config(
                "database schema missing; run the catalog-repository migrations first",
            ));
        }
        info!("PostgreSQL connection established");

        let categories = Arc::new(PostgresCategoryRepository::new(pool.clone()));
        let blobs = Arc::new(PostgresBlobStore::new(pool));

        let search_provider = Self::connect_to_opensearch(
            &opensearch_url,
            IndexConfig::new(index_name),
            connection_mode,
            Duration::from_secs(retry_interval),
        )
        .await?;

        info!("OpenSearch connection established");

        // Ensure the index exists with the fixed product schema. Safe to
        // call on every startup.
        search_provider
            .ensure_index_exists()
            .await
            .map_err(|e| StartupError::config(format!("Failed to ensure index exists: {}", e)))?;

        let producer = create_producer(&kafka_broker, KAFKA_CLIENT_ID)
            .map_err(|e| StartupError::config(format!("Failed to create Kafka producer: {}", e)))?;
        let publisher = Arc::new(KafkaProductEventPublisher::new(producer));

        info!("Kafka producer created");

        let orchestrator = Arc::new(ProductOrchestrator::new(
            products,
            categories,
            blobs,
            Arc::new(search_provider),
            publisher,
        ));

        Ok(Self {
            orchestrator,
            jwt: Arc::new(JwtDecoder::new(&jwt_secret)),
            bind_addr,
        })
    }

    /// Connect to OpenSearch with retry logic based on connection mode.
    async fn connect_to_opensearch(
        url: &str,
        index_config: IndexConfig,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, StartupError> {
        loop {
            match OpenSearchProvider::new(url, index_config.clone()).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(StartupError::config(format!(
                            "Failed to connect to OpenSearch: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
