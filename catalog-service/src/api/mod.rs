//! HTTP surface for the catalog service.
//!
//! Routing, authentication, and error mapping live here; everything behind
//! the routes is delegated to the mutation orchestrator. Role membership is
//! enforced at this layer, before the orchestrator is invoked; the
//! orchestrator itself only checks per-product ownership.

pub mod auth;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::orchestrator::ProductOrchestrator;
use auth::JwtDecoder;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ProductOrchestrator>,
    pub jwt: Arc<JwtDecoder>,
}

/// Build the service router.
///
/// Every `/products` route requires an authenticated actor.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            post(routes::create_product).get(routes::list_products),
        )
        .route(
            "/products/:id",
            get(routes::get_product)
                .put(routes::update_product)
                .delete(routes::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .with_state(state)
}
