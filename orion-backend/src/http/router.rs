//! Router configuration for the HTTP API.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let api = Router::new()
        .route("/apod", get(handlers::get_apod))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/neo/summary", get(handlers::get_summary))
        .route("/neo/daily", get(handlers::get_daily))
        .route("/neo/objects", get(handlers::list_objects));

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::stats))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http());

    let router = if enable_cors {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.with_state(state)
}
