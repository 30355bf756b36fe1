mod common;

use common::TestApp;
use journal_service::services::providers::mock::{MockSentimentProvider, MockTextProvider};
use journal_service::services::MockEntryStore;
use reqwest::Client;
use serde_json::json;

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn generate_returns_first_candidate_text() {
    let app = TestApp::spawn().await; // mock replies "Hi there"
    let client = Client::new();

    let response = client
        .post(format!("{}/v1/generate", app.address))
        .json(&json!({"prompt": "Hello"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"text": "Hi there"}));
    assert_eq!(app.text.calls(), 1);
}

// =============================================================================
// Invalid argument
// =============================================================================

#[tokio::test]
async fn missing_prompt_is_invalid_argument() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/v1/generate", app.address))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "invalid-argument");
    assert_eq!(app.text.calls(), 0, "model is never called");
}

#[tokio::test]
async fn empty_prompt_is_invalid_argument() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/v1/generate", app.address))
        .json(&json!({"prompt": ""}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "invalid-argument");
    assert_eq!(app.text.calls(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/v1/generate", app.address))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_client_error());
    assert_eq!(app.text.calls(), 0);
}

// =============================================================================
// Internal error
// =============================================================================

#[tokio::test]
async fn provider_failure_is_internal_error() {
    let app = TestApp::spawn_with(
        MockSentimentProvider::with_sentiment(0.0, 0.0),
        MockTextProvider::failing(),
        MockEntryStore::new(),
    )
    .await;
    let client = Client::new();

    let response = client
        .post(format!("{}/v1/generate", app.address))
        .json(&json!({"prompt": "Hello"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "internal");
    assert!(
        body["details"].as_str().is_some(),
        "internal errors carry the underlying cause"
    );
    assert!(body.get("text").is_none(), "no partial output on failure");
}
