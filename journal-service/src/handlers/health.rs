use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::services::metrics as service_metrics;
use crate::startup::AppState;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "journal-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the service is ready when both providers are configured.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    let sentiment_ok = state.sentiment_provider.health_check().await.is_ok();
    let text_ok = state.text_provider.health_check().await.is_ok();

    if sentiment_ok && text_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Prometheus text exposition.
pub async fn metrics() -> impl IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        service_metrics::get_metrics(),
    )
}
