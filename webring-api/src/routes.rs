//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::panic_response;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Service descriptor and health
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))

        // Ring navigation
        .route("/next", get(handlers::next_url))
        .route("/previous", get(handlers::previous_url))
        .route("/random", get(handlers::random_url))
        .route("/list", get(handlers::list_urls))

        // Pictures
        .route("/pictures/list", get(handlers::list_pictures))
        .route("/pictures/:filename", get(handlers::get_picture))

        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
