//! Prometheus metrics for journal-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// Handler metrics
pub static SENTIMENT_EVENTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static GENERATE_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

// Outbound call metrics
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static STORE_WRITES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Must be called once at startup; later calls are
/// no-ops (the `OnceLock` globals keep their first value).
pub fn init_metrics() {
    let registry = Registry::new();

    let sentiment_events = IntCounterVec::new(
        Opts::new(
            "sentiment_events_total",
            "Entry-created events by handling outcome",
        ),
        &["outcome"], // analyzed, skipped_empty, provider_error, write_error
    )
    .expect("Failed to create sentiment_events_total metric");

    let generate_requests = IntCounterVec::new(
        Opts::new(
            "generate_requests_total",
            "Callable generation requests by outcome",
        ),
        &["outcome"], // ok, invalid_argument, error
    )
    .expect("Failed to create generate_requests_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "provider_latency_seconds",
            "External AI provider latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider"], // sentiment, text
    )
    .expect("Failed to create provider_latency_seconds metric");

    let store_writes = IntCounterVec::new(
        Opts::new("store_writes_total", "Document-store writes by status"),
        &["status"], // ok, error
    )
    .expect("Failed to create store_writes_total metric");

    registry
        .register(Box::new(sentiment_events.clone()))
        .expect("Failed to register sentiment_events_total");
    registry
        .register(Box::new(generate_requests.clone()))
        .expect("Failed to register generate_requests_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register provider_latency_seconds");
    registry
        .register(Box::new(store_writes.clone()))
        .expect("Failed to register store_writes_total");

    let _ = REGISTRY.set(registry);
    let _ = SENTIMENT_EVENTS_TOTAL.set(sentiment_events);
    let _ = GENERATE_REQUESTS_TOTAL.set(generate_requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = STORE_WRITES_TOTAL.set(store_writes);

    tracing::info!("Prometheus metrics initialized");
}

/// Count an entry-created event by outcome.
pub fn record_sentiment_event(outcome: &str) {
    if let Some(counter) = SENTIMENT_EVENTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Count a generation request by outcome.
pub fn record_generate_request(outcome: &str) {
    if let Some(counter) = GENERATE_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Observe the latency of one provider call.
pub fn observe_provider_latency(provider: &str, seconds: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[provider]).observe(seconds);
    }
}

/// Count a store write attempt outcome.
pub fn record_store_write(ok: bool) {
    if let Some(counter) = STORE_WRITES_TOTAL.get() {
        counter
            .with_label_values(&[if ok { "ok" } else { "error" }])
            .inc();
    }
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return "# Failed to encode metrics\n".to_string();
    }

    String::from_utf8(buffer).unwrap_or_else(|_| "# Invalid UTF-8 in metrics\n".to_string())
}
