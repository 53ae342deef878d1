//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_user_handler, health_handler, invalidate_handler, stats_handler, update_user_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /users/:id` - Read a user through the cache
/// - `PUT /users/:id` - Update a user, then invalidate its cached copy
/// - `DELETE /cache/:key` - Drop a cache key
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/users/:id", get(get_user_handler).put(update_user_handler))
        .route("/cache/:key", delete(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
