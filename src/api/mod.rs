//! HTTP API surface.
use crate::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Data quality endpoints under `/api/v1`.
///
/// Layers (body limit, rate limiting, tracing, CORS) are applied by the server binary.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/categories", get(handlers::list_categories))
        .route(
            "/api/v1/categories/:category/companies",
            get(handlers::list_category_companies),
        )
        .route("/api/v1/report", get(handlers::get_report))
        .route("/api/v1/stats", get(handlers::get_stats))
        .route("/api/v1/comparisons", get(handlers::list_comparisons))
        .route(
            "/api/v1/comparisons/:company_id",
            get(handlers::get_comparison),
        )
        .route("/api/v1/compare", post(handlers::compare_payload))
        .route("/api/v1/refresh", post(handlers::refresh_snapshots))
}
