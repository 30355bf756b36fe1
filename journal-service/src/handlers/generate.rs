use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use crate::services::metrics;
use crate::startup::AppState;
use journal_core::error::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "The call must carry a non-empty 'prompt'"))]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Callable generation endpoint.
///
/// A missing or empty prompt is rejected with `invalid-argument` before any
/// model call; provider or parse failures surface as `internal` with the
/// cause attached. No partial output is ever returned.
#[tracing::instrument(skip(state, request))]
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if let Err(e) = request.validate() {
        metrics::record_generate_request("invalid_argument");
        return Err(e.into());
    }

    let started = Instant::now();
    let response = state
        .text_provider
        .generate(&request.prompt, &state.generation_params)
        .await;
    metrics::observe_provider_latency("text", started.elapsed().as_secs_f64());

    let response = response.map_err(|e| {
        metrics::record_generate_request("error");
        tracing::error!(error = %e, "Text generation failed");
        AppError::InternalError(
            anyhow::Error::new(e).context("Failed to generate a response from the model"),
        )
    })?;

    let text = response.text.ok_or_else(|| {
        metrics::record_generate_request("error");
        tracing::error!("Model response carried no candidate text");
        AppError::InternalError(anyhow::anyhow!("Model response carried no candidate text"))
    })?;

    metrics::record_generate_request("ok");
    Ok(Json(GenerateResponse { text }))
}
