//! Mock provider implementations for tests and keyless dev environments.

use super::{
    FinishReason, GenerationParams, ProviderError, ProviderResponse, Sentiment, SentimentProvider,
    TextProvider,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock sentiment provider returning a canned sentiment, or failing.
pub struct MockSentimentProvider {
    sentiment: Option<Sentiment>,
    calls: AtomicUsize,
}

impl MockSentimentProvider {
    /// Always respond with the given score and magnitude.
    pub fn with_sentiment(score: f64, magnitude: f64) -> Self {
        Self {
            sentiment: Some(Sentiment { score, magnitude }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every analysis call with an API error.
    pub fn failing() -> Self {
        Self {
            sentiment: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of analysis calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentProvider for MockSentimentProvider {
    async fn analyze(&self, _text: &str) -> Result<Sentiment, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sentiment
            .ok_or_else(|| ProviderError::ApiError("mock sentiment failure".to_string()))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Mock text provider returning a canned reply, or failing.
pub struct MockTextProvider {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// Always respond with the given text.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every generation call with an API error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generation calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(reply) => Ok(ProviderResponse {
                text: Some(reply.clone()),
                finish_reason: FinishReason::Complete,
            }),
            None => Err(ProviderError::ApiError("mock generation failure".to_string())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
