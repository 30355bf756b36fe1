//! Natural Language sentiment-analysis provider.
//!
//! Sends a PLAIN_TEXT document to Google's Natural Language API and extracts
//! the document-level sentiment. One request per call; failures are not
//! retried here (the event handler swallows them).

use super::{ProviderError, Sentiment, SentimentProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Natural Language API base URL.
const LANGUAGE_API_BASE: &str = "https://language.googleapis.com/v1";

/// Natural Language provider configuration.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    pub api_key: String,
}

/// Sentiment provider backed by the Natural Language API.
pub struct NaturalLanguageProvider {
    config: LanguageConfig,
    client: Client,
}

impl NaturalLanguageProvider {
    pub fn new(config: LanguageConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/documents:analyzeSentiment?key={}",
            LANGUAGE_API_BASE, self.config.api_key
        )
    }
}

#[async_trait]
impl SentimentProvider for NaturalLanguageProvider {
    async fn analyze(&self, text: &str) -> Result<Sentiment, ProviderError> {
        let request = AnalyzeSentimentRequest {
            document: Document {
                doc_type: "PLAIN_TEXT",
                content: text.to_string(),
            },
            encoding_type: "UTF8",
        };

        tracing::debug!(text_len = text.len(), "Sending request to Language API");

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Language API error {}: {}",
                status, error_text
            )));
        }

        let api_response: AnalyzeSentimentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let sentiment = api_response.document_sentiment.ok_or_else(|| {
            ProviderError::ApiError("Response carried no documentSentiment".to_string())
        })?;

        Ok(Sentiment {
            score: sentiment.score,
            magnitude: sentiment.magnitude,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Language API key not configured".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Language API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentRequest {
    document: Document,
    encoding_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Document {
    #[serde(rename = "type")]
    doc_type: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentResponse {
    #[serde(default)]
    document_sentiment: Option<DocumentSentiment>,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    magnitude: f64,
}
