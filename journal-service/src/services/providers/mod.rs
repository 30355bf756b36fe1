//! External AI provider abstractions and implementations.
//!
//! This module provides trait-based abstractions over the two managed APIs
//! the backend calls: sentiment analysis and text generation. Mocks allow
//! tests and keyless dev environments to swap the real backends out.

pub mod gemini;
pub mod language;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Sentiment of a document as returned by the analysis API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// Signed score in −1.0..1.0.
    pub score: f64,
    /// Non-negative magnitude.
    pub magnitude: f64,
}

/// Result of a text-generation call.
pub struct ProviderResponse {
    /// First candidate's text, if the model produced one.
    pub text: Option<String>,

    /// Why generation stopped.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Error,
}

/// Fixed generation parameters, set once at startup and shared read-only
/// across invocations.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub max_output_tokens: i32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_output_tokens: 256,
            temperature: 0.5,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Trait for sentiment-analysis providers (e.g. Natural Language API).
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Analyze the sentiment of a plain-text document.
    async fn analyze(&self, text: &str) -> Result<Sentiment, ProviderError>;

    /// Cheap configuration check, used by readiness probes.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Trait for text-generation providers (e.g. Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a single completed response for a one-turn user prompt.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Cheap configuration check, used by readiness probes.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
