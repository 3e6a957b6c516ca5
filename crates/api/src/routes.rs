use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use prometheus::Encoder;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::instrument;

use analysis::ViralityAnalyzer;
use classifier::{AdClassifier, HateClassifier};
use common::text::normalize_message;

use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::error::{ApiError, ApiResult};
use crate::metrics;

#[derive(Clone)]
pub struct ApiState {
    pub analyzer: Arc<ViralityAnalyzer>,
    pub hate_classifier: Arc<dyn HateClassifier>,
    pub ad_classifier: Arc<dyn AdClassifier>,
    pub metrics_path: &'static str,
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let metrics_path: &'static str = state.metrics_path;
    Router::new()
        .route("/healthz", get(healthz))
        .route("/analyze", post(analyze))
        .route(metrics_path, get(metrics_endpoint))
        // the moderation dashboard is a browser client on another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(state, request))]
async fn analyze(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let _timer = metrics::ANALYZE_DURATION.start_timer();
    let result = run_analyze(&state, request).await;
    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::ANALYZE_REQUESTS_TOTAL
        .with_label_values(&[outcome])
        .inc();
    result
}

async fn run_analyze(
    state: &ApiState,
    request: AnalyzeRequest,
) -> ApiResult<Json<AnalyzeResponse>> {
    let now = Utc::now();
    let text = normalize_message(&request.text);

    let hate = state
        .hate_classifier
        .classify(&text)
        .await
        .map_err(ApiError::from)?;
    let ad_prob = state
        .ad_classifier
        .classify(&text)
        .await
        .map_err(ApiError::from)?;

    let assessment = state.analyzer.record_and_assess(&text, now)?;
    metrics::POOL_MESSAGES.set(state.analyzer.pool_len() as i64);
    metrics::record_verdicts(&assessment);

    Ok(Json(AnalyzeResponse::assemble(&hate, ad_prob, &assessment)))
}

async fn metrics_endpoint() -> ApiResult<impl IntoResponse> {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let content_type = encoder.format_type().to_string();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, content_type)],
        buffer,
    ))
}
