use crate::categories::{CategoryInfo, ErrorCategory};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{ComparePayload, ComparisonResult, QualityReport, QualityStats};
use crate::report::{build_report, ComparisonQuery};
use crate::services::QualityService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (histogram width for inline comparisons).
    pub config: Config,
    /// Snapshot loading and report building (holds the snapshot cache).
    pub quality: QualityService,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-dq-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /api/v1/categories
///
/// Lists every error category with its description and color.
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(ErrorCategory::ALL.iter().map(|c| c.info()).collect())
}

/// GET /api/v1/report
///
/// Compares the current staging and production snapshots.
///
/// # Returns
///
/// * `Result<Json<QualityReport>, AppError>` - Statistics plus every comparison, or an error.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QualityReport>, AppError> {
    tracing::info!("GET /report");
    let report = state.quality.report().await?;
    Ok(Json(report))
}

/// GET /api/v1/stats
///
/// Aggregated statistics only (average, distribution, histogram).
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QualityStats>, AppError> {
    tracing::info!("GET /stats");
    let report = state.quality.report().await?;
    Ok(Json(report.stats))
}

/// GET /api/v1/comparisons
///
/// Lists comparison results with optional search, sort, category filter and limit.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `query` - `search`, `sort` (`errors`, `accuracy`, `name`), `category`, `limit`.
pub async fn list_comparisons(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ComparisonQuery>,
) -> Result<Json<Vec<ComparisonResult>>, AppError> {
    tracing::info!("GET /comparisons - query: {:?}", query);
    let report = state.quality.report().await?;
    Ok(Json(query.apply(&report.comparisons)))
}

/// GET /api/v1/comparisons/:company_id
///
/// Returns the comparison for a single company.
pub async fn get_comparison(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<String>,
) -> Result<Json<ComparisonResult>, AppError> {
    tracing::info!("GET /comparisons/{}", company_id);
    let report = state.quality.report().await?;

    report
        .comparisons
        .into_iter()
        .find(|c| c.company_id == company_id)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Company {} is not present in both environments",
                company_id
            ))
        })
}

/// GET /api/v1/categories/:category/companies
///
/// Companies exhibiting one error category, most errors first.
pub async fn list_category_companies(
    State(state): State<Arc<AppState>>,
    Path(category): Path<ErrorCategory>,
) -> Result<Json<Vec<ComparisonResult>>, AppError> {
    tracing::info!("GET /categories/{}/companies", category);
    let report = state.quality.report().await?;
    Ok(Json(
        ComparisonQuery::for_category(category).apply(&report.comparisons),
    ))
}

/// POST /api/v1/compare
///
/// Compares two snapshots supplied in the request body instead of the configured sources.
pub async fn compare_payload(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ComparePayload>,
) -> Result<Json<QualityReport>, AppError> {
    tracing::info!(
        "POST /compare - {} staging, {} production companies",
        payload.stage.len(),
        payload.prod.len()
    );

    let report = build_report(
        &payload.stage,
        &payload.prod,
        state.config.histogram_bucket_width,
    )?;
    Ok(Json(report))
}

/// POST /api/v1/refresh
///
/// Drops cached snapshots so the next request reloads both environments.
pub async fn refresh_snapshots(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<serde_json::Value>) {
    state.quality.refresh().await;
    (
        StatusCode::ACCEPTED,
        Json(json!({ "status": "snapshot cache cleared" })),
    )
}
