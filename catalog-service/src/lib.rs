//! # Catalog Service
//!
//! Product catalog microservice. Product records live in PostgreSQL (the
//! source of truth); every committed mutation is fanned out, in order, to
//! the OpenSearch index and to two Kafka topics for downstream consumers.
//!
//! ## Architecture
//!
//! 1. **API**: the authenticated REST surface over `/products`
//! 2. **Orchestrator**: coordinates each mutation across the primary store,
//!    the search index, and the event bus
//! 3. **Collaborators**: injected repository/provider/publisher seams from
//!    the sibling crates
//!
//! ## Modules
//!
//! - [`api`]: HTTP routing, authentication, and error mapping
//! - [`config`]: Configuration and dependency initialization
//! - [`errors`]: Error types for the mutation pipeline
//! - [`orchestrator`]: The product mutation pipeline

pub mod api;
pub mod config;
pub mod errors;
pub mod orchestrator;

pub use config::Dependencies;
pub use errors::ProductServiceError;

use thiserror::Error;

/// Errors that can occur during service startup.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error while binding or serving.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
