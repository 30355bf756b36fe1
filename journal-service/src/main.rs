use journal_core::observability::init_tracing;
use journal_service::config::JournalConfig;
use journal_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("journal-service", "info", otlp_endpoint.as_deref());

    let config = JournalConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("journal-service listening on port {}", app.port());

    app.run_until_stopped().await
}
