use axum::{extract::State, http::StatusCode, Json};
use journal_core::retry::retry_with_backoff;
use std::time::Instant;

use crate::models::{EntryCreatedEvent, SentimentUpdate};
use crate::services::metrics;
use crate::startup::AppState;

/// Entry-created event handler.
///
/// No caller waits on the outcome, so every branch answers `204 No Content`:
/// a failure here must not make the event source redeliver forever. An entry
/// left without `analysisComplete` reads as "not yet analyzed" downstream.
#[tracing::instrument(skip(state, event), fields(entry_path = %event.entry_path))]
pub async fn entry_created(
    State(state): State<AppState>,
    Json(event): Json<EntryCreatedEvent>,
) -> StatusCode {
    let text = match event.data.text.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => {
            tracing::info!("Entry has no text, skipping analysis");
            metrics::record_sentiment_event("skipped_empty");
            return StatusCode::NO_CONTENT;
        }
    };

    let started = Instant::now();
    let sentiment = match state.sentiment_provider.analyze(text).await {
        Ok(sentiment) => {
            metrics::observe_provider_latency("sentiment", started.elapsed().as_secs_f64());
            sentiment
        }
        Err(e) => {
            metrics::observe_provider_latency("sentiment", started.elapsed().as_secs_f64());
            metrics::record_sentiment_event("provider_error");
            tracing::error!(error = %e, "Sentiment analysis failed");
            return StatusCode::NO_CONTENT;
        }
    };

    tracing::info!(
        score = sentiment.score,
        magnitude = sentiment.magnitude,
        "Sentiment detected"
    );

    let update = SentimentUpdate {
        score: sentiment.score,
        magnitude: sentiment.magnitude,
    };

    // The update is idempotent by overwrite, so transient store failures are
    // retried with backoff before the outcome is given up on.
    let write = retry_with_backoff(&state.write_retry, "apply_sentiment", || {
        state.entry_store.apply_sentiment(&event.entry_path, &update)
    })
    .await;

    match write {
        Ok(()) => {
            metrics::record_store_write(true);
            metrics::record_sentiment_event("analyzed");
            tracing::info!("Entry updated with sentiment analysis");
        }
        Err(e) => {
            metrics::record_store_write(false);
            metrics::record_sentiment_event("write_error");
            tracing::error!(error = %e, "Failed to write sentiment back to entry");
        }
    }

    StatusCode::NO_CONTENT
}
