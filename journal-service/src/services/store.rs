//! Document-store client for writing sentiment results back onto entries.
//!
//! The store is external; the backend only ever performs one partial update
//! per entry, limited by an update mask to the three sentiment fields. The
//! update is idempotent by overwrite, so the caller retries it with backoff.

use crate::models::SentimentUpdate;
use async_trait::async_trait;
use journal_core::retry::RetryClass;
use reqwest::Client;
use serde_json::json;
use std::sync::Mutex;
use thiserror::Error;

/// Firestore REST API base URL.
const FIRESTORE_API_BASE: &str = "https://firestore.googleapis.com/v1";

/// Error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    #[error("Store API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl RetryClass for StoreError {
    fn is_retryable(&self) -> bool {
        match self {
            StoreError::NetworkError(_) => true,
            StoreError::ApiError { status, .. } => *status == 429 || *status >= 500,
            StoreError::NotConfigured(_) => false,
        }
    }
}

/// Trait for the entry write-back target.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Write `{sentimentScore, sentimentMagnitude, analysisComplete: true}`
    /// onto the document at `entry_path`, touching no other fields.
    async fn apply_sentiment(
        &self,
        entry_path: &str,
        update: &SentimentUpdate,
    ) -> Result<(), StoreError>;
}

/// Firestore store configuration.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    /// Platform-injected bearer credential.
    pub access_token: String,
}

/// Entry store backed by the Firestore REST API.
pub struct FirestoreEntryStore {
    config: FirestoreConfig,
    client: Client,
}

impl FirestoreEntryStore {
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Document URL with an update mask limited to the sentiment fields, so
    /// the patch cannot clobber anything else on the entry.
    fn document_url(&self, entry_path: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}\
             ?updateMask.fieldPaths=sentimentScore\
             &updateMask.fieldPaths=sentimentMagnitude\
             &updateMask.fieldPaths=analysisComplete",
            FIRESTORE_API_BASE, self.config.project_id, self.config.database, entry_path
        )
    }
}

#[async_trait]
impl EntryStore for FirestoreEntryStore {
    async fn apply_sentiment(
        &self,
        entry_path: &str,
        update: &SentimentUpdate,
    ) -> Result<(), StoreError> {
        let body = json!({
            "fields": {
                "sentimentScore": { "doubleValue": update.score },
                "sentimentMagnitude": { "doubleValue": update.magnitude },
                "analysisComplete": { "booleanValue": true }
            }
        });

        let response = self
            .client
            .patch(self.document_url(entry_path))
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError { status, message });
        }

        tracing::debug!(entry_path, "Entry patched with sentiment fields");
        Ok(())
    }
}

/// In-memory store that records updates, for tests and keyless dev runs.
///
/// Can be configured to fail the first N calls with a transient error, to
/// exercise the write-retry path.
#[derive(Default)]
pub struct MockEntryStore {
    updates: Mutex<Vec<(String, SentimentUpdate)>>,
    fail_remaining: Mutex<u32>,
    fail_always: bool,
}

impl MockEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every write with a transient error.
    pub fn failing() -> Self {
        Self {
            fail_always: true,
            ..Self::default()
        }
    }

    /// Fail the first `n` writes with a transient error, then succeed.
    pub fn failing_times(n: u32) -> Self {
        Self {
            fail_remaining: Mutex::new(n),
            ..Self::default()
        }
    }

    /// Updates recorded so far, in application order.
    pub fn updates(&self) -> Vec<(String, SentimentUpdate)> {
        self.updates.lock().expect("mock store lock").clone()
    }
}

#[async_trait]
impl EntryStore for MockEntryStore {
    async fn apply_sentiment(
        &self,
        entry_path: &str,
        update: &SentimentUpdate,
    ) -> Result<(), StoreError> {
        if self.fail_always {
            return Err(StoreError::NetworkError("mock store failure".to_string()));
        }

        {
            let mut remaining = self.fail_remaining.lock().expect("mock store lock");
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StoreError::NetworkError(
                    "mock transient store failure".to_string(),
                ));
            }
        }

        self.updates
            .lock()
            .expect("mock store lock")
            .push((entry_path.to_string(), update.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_classification() {
        assert!(StoreError::NetworkError("reset".into()).is_retryable());
        assert!(StoreError::ApiError {
            status: 503,
            message: "unavailable".into()
        }
        .is_retryable());
        assert!(StoreError::ApiError {
            status: 429,
            message: "quota".into()
        }
        .is_retryable());
        assert!(!StoreError::ApiError {
            status: 404,
            message: "no such document".into()
        }
        .is_retryable());
        assert!(!StoreError::NotConfigured("no token".into()).is_retryable());
    }

    #[test]
    fn document_url_carries_update_mask() {
        let store = FirestoreEntryStore::new(FirestoreConfig {
            project_id: "demo-project".into(),
            database: "(default)".into(),
            access_token: "token".into(),
        })
        .expect("store builds");

        let url = store.document_url("journal_entries/abc");
        assert!(url.contains("projects/demo-project/databases/(default)/documents/journal_entries/abc"));
        assert!(url.contains("updateMask.fieldPaths=sentimentScore"));
        assert!(url.contains("updateMask.fieldPaths=sentimentMagnitude"));
        assert!(url.contains("updateMask.fieldPaths=analysisComplete"));
    }

    #[tokio::test]
    async fn mock_store_records_updates() {
        let store = MockEntryStore::new();
        store
            .apply_sentiment(
                "journal_entries/a",
                &SentimentUpdate {
                    score: 0.5,
                    magnitude: 1.2,
                },
            )
            .await
            .expect("write succeeds");

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "journal_entries/a");
        assert_eq!(updates[0].1.score, 0.5);
    }

    #[tokio::test]
    async fn mock_store_transient_failures_then_success() {
        let store = MockEntryStore::failing_times(2);
        let update = SentimentUpdate {
            score: 0.1,
            magnitude: 0.2,
        };

        assert!(store.apply_sentiment("p", &update).await.is_err());
        assert!(store.apply_sentiment("p", &update).await.is_err());
        assert!(store.apply_sentiment("p", &update).await.is_ok());
        assert_eq!(store.updates().len(), 1);
    }
}
