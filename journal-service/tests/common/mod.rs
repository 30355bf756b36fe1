use journal_core::config::Config as CoreConfig;
use journal_service::config::{
    FirestoreConfig, GenerationConfig, GoogleConfig, JournalConfig, ModelConfig,
};
use journal_service::services::providers::mock::{MockSentimentProvider, MockTextProvider};
use journal_service::services::providers::{SentimentProvider, TextProvider};
use journal_service::services::{EntryStore, MockEntryStore};
use journal_service::startup::{Application, Providers};
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub sentiment: Arc<MockSentimentProvider>,
    pub text: Arc<MockTextProvider>,
    pub store: Arc<MockEntryStore>,
}

/// Config for tests: random port, providers mocked out.
fn test_config() -> JournalConfig {
    JournalConfig {
        common: CoreConfig { port: 0 },
        google: GoogleConfig {
            api_key: "test-key".to_string(),
            enabled: false, // Use mocks
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash".to_string(),
        },
        generation: GenerationConfig {
            max_output_tokens: 256,
            temperature: 0.5,
            top_p: 0.8,
            top_k: 40,
        },
        firestore: FirestoreConfig {
            project_id: "test-project".to_string(),
            database: "(default)".to_string(),
            access_token: "test-token".to_string(),
            enabled: false, // Use mock store
        },
    }
}

impl TestApp {
    /// Spawn with the default mocks: a fixed sentiment and a fixed reply.
    #[allow(dead_code)]
    pub async fn spawn() -> Self {
        Self::spawn_with(
            MockSentimentProvider::with_sentiment(0.8, 1.9),
            MockTextProvider::with_reply("Hi there"),
            MockEntryStore::new(),
        )
        .await
    }

    /// Spawn with explicit mocks, keeping handles for assertions.
    pub async fn spawn_with(
        sentiment: MockSentimentProvider,
        text: MockTextProvider,
        store: MockEntryStore,
    ) -> Self {
        let sentiment = Arc::new(sentiment);
        let text = Arc::new(text);
        let store = Arc::new(store);

        let sentiment_dyn: Arc<dyn SentimentProvider> = sentiment.clone();
        let text_dyn: Arc<dyn TextProvider> = text.clone();
        let store_dyn: Arc<dyn EntryStore> = store.clone();
        let providers = Providers {
            sentiment: sentiment_dyn,
            text: text_dyn,
            store: store_dyn,
        };

        let app = Application::build_with_providers(test_config(), providers)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            sentiment,
            text,
            store,
        }
    }
}
