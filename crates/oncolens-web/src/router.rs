//! Axum router. Maps all URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::handlers::{
    input::{apply, csv_clear, csv_upload},
    page::index,
    predict::predict,
    system::health,
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let body_limit = state.config.server.max_upload_bytes;
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Page
        .route("/",           get(index))
        .route("/apply",      post(apply))
        .route("/predict",    post(predict))
        .route("/csv/upload", post(csv_upload))
        .route("/csv/clear",  post(csv_clear))

        // API
        .route("/health",     get(health))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
