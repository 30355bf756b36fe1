//! Application startup and lifecycle management.
//!
//! Builds the provider clients once at startup, binds the listener (port 0
//! yields a random port for tests) and serves the router until shutdown.

use crate::config::JournalConfig;
use crate::handlers;
use crate::services::metrics::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::language::{LanguageConfig, NaturalLanguageProvider};
use crate::services::providers::mock::{MockSentimentProvider, MockTextProvider};
use crate::services::providers::{GenerationParams, SentimentProvider, TextProvider};
use crate::services::{EntryStore, FirestoreEntryStore, MockEntryStore};
use axum::{
    routing::{get, post},
    Router,
};
use journal_core::error::AppError;
use journal_core::retry::RetryConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Constructed once; the provider handles are
/// process-wide singletons, never mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: JournalConfig,
    pub sentiment_provider: Arc<dyn SentimentProvider>,
    pub text_provider: Arc<dyn TextProvider>,
    pub entry_store: Arc<dyn EntryStore>,
    pub generation_params: GenerationParams,
    pub write_retry: RetryConfig,
}

/// The provider bundle backing an application instance. Tests inject mocks
/// through [`Application::build_with_providers`].
pub struct Providers {
    pub sentiment: Arc<dyn SentimentProvider>,
    pub text: Arc<dyn TextProvider>,
    pub store: Arc<dyn EntryStore>,
}

impl Providers {
    /// Construct the real (or, when disabled in config, mock) providers.
    pub fn from_config(config: &JournalConfig) -> Result<Self, AppError> {
        let sentiment: Arc<dyn SentimentProvider> = if config.google.enabled {
            Arc::new(
                NaturalLanguageProvider::new(LanguageConfig {
                    api_key: config.google.api_key.clone(),
                })
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
            )
        } else {
            Arc::new(MockSentimentProvider::with_sentiment(0.0, 0.0))
        };

        let text: Arc<dyn TextProvider> = if config.google.enabled {
            Arc::new(
                GeminiTextProvider::new(GeminiConfig {
                    api_key: config.google.api_key.clone(),
                    model: config.models.text_model.clone(),
                })
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
            )
        } else {
            Arc::new(MockTextProvider::with_reply("Mock response"))
        };

        let store: Arc<dyn EntryStore> = if config.firestore.enabled {
            Arc::new(
                FirestoreEntryStore::new(crate::services::FirestoreConfig {
                    project_id: config.firestore.project_id.clone(),
                    database: config.firestore.database.clone(),
                    access_token: config.firestore.access_token.clone(),
                })
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
            )
        } else {
            Arc::new(MockEntryStore::new())
        };

        Ok(Self {
            sentiment,
            text,
            store,
        })
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with providers derived from configuration.
    pub async fn build(config: JournalConfig) -> Result<Self, AppError> {
        let providers = Providers::from_config(&config)?;
        Self::build_with_providers(config, providers).await
    }

    /// Build the application with an explicit provider bundle.
    pub async fn build_with_providers(
        config: JournalConfig,
        providers: Providers,
    ) -> Result<Self, AppError> {
        init_metrics();

        let generation_params = GenerationParams {
            max_output_tokens: config.generation.max_output_tokens,
            temperature: config.generation.temperature,
            top_p: config.generation.top_p,
            top_k: config.generation.top_k,
        };

        tracing::info!(
            model = %config.models.text_model,
            max_output_tokens = generation_params.max_output_tokens,
            "Initialized text provider"
        );

        let state = AppState {
            config: config.clone(),
            sentiment_provider: providers.sentiment,
            text_provider: providers.text,
            entry_store: providers.store,
            generation_params,
            write_retry: RetryConfig::default(),
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("journal-service bound to port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = app_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Build the service router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/v1/events/entry-created", post(handlers::entry_created))
        .route("/v1/generate", post(handlers::generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
