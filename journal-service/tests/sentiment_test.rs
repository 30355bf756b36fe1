mod common;

use common::TestApp;
use journal_service::services::providers::mock::{MockSentimentProvider, MockTextProvider};
use journal_service::services::MockEntryStore;
use reqwest::Client;
use serde_json::json;

async fn post_event(app: &TestApp, body: serde_json::Value) -> reqwest::StatusCode {
    Client::new()
        .post(format!("{}/v1/events/entry-created", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
        .status()
}

// =============================================================================
// Input validation branch
// =============================================================================

#[tokio::test]
async fn entry_without_text_is_skipped() {
    let app = TestApp::spawn().await;

    let status = post_event(
        &app,
        json!({"entry_path": "journal_entries/a1", "data": {}}),
    )
    .await;

    assert_eq!(status.as_u16(), 204);
    assert_eq!(app.sentiment.calls(), 0, "no API call for missing text");
    assert!(app.store.updates().is_empty(), "no write for missing text");
}

#[tokio::test]
async fn entry_with_empty_text_is_skipped() {
    let app = TestApp::spawn().await;

    let status = post_event(
        &app,
        json!({"entry_path": "journal_entries/a2", "data": {"text": ""}}),
    )
    .await;

    assert_eq!(status.as_u16(), 204);
    assert_eq!(app.sentiment.calls(), 0);
    assert!(app.store.updates().is_empty());
}

// =============================================================================
// Analysis and write-back
// =============================================================================

#[tokio::test]
async fn entry_with_text_is_analyzed_and_written_back() {
    let app = TestApp::spawn_with(
        MockSentimentProvider::with_sentiment(0.8, 1.9),
        MockTextProvider::with_reply("unused"),
        MockEntryStore::new(),
    )
    .await;

    let status = post_event(
        &app,
        json!({"entry_path": "journal_entries/a3", "data": {"text": "what a lovely day"}}),
    )
    .await;

    assert_eq!(status.as_u16(), 204);
    assert_eq!(app.sentiment.calls(), 1);

    let updates = app.store.updates();
    assert_eq!(updates.len(), 1, "exactly one update");
    assert_eq!(updates[0].0, "journal_entries/a3");
    assert_eq!(updates[0].1.score, 0.8);
    assert_eq!(updates[0].1.magnitude, 1.9);
}

#[tokio::test]
async fn provider_failure_is_swallowed_without_write() {
    let app = TestApp::spawn_with(
        MockSentimentProvider::failing(),
        MockTextProvider::with_reply("unused"),
        MockEntryStore::new(),
    )
    .await;

    let status = post_event(
        &app,
        json!({"entry_path": "journal_entries/a4", "data": {"text": "some text"}}),
    )
    .await;

    // Failure never surfaces to the event source.
    assert_eq!(status.as_u16(), 204);
    assert_eq!(app.sentiment.calls(), 1);
    assert!(app.store.updates().is_empty());
}

#[tokio::test]
async fn transient_write_failure_is_retried() {
    let app = TestApp::spawn_with(
        MockSentimentProvider::with_sentiment(-0.3, 0.7),
        MockTextProvider::with_reply("unused"),
        MockEntryStore::failing_times(1),
    )
    .await;

    let status = post_event(
        &app,
        json!({"entry_path": "journal_entries/a5", "data": {"text": "rough morning"}}),
    )
    .await;

    assert_eq!(status.as_u16(), 204);

    let updates = app.store.updates();
    assert_eq!(updates.len(), 1, "write lands after one retry");
    assert_eq!(updates[0].1.score, -0.3);
    assert_eq!(updates[0].1.magnitude, 0.7);
}

#[tokio::test]
async fn exhausted_write_retries_are_swallowed() {
    let app = TestApp::spawn_with(
        MockSentimentProvider::with_sentiment(0.2, 0.4),
        MockTextProvider::with_reply("unused"),
        MockEntryStore::failing(),
    )
    .await;

    let status = post_event(
        &app,
        json!({"entry_path": "journal_entries/a6", "data": {"text": "some text"}}),
    )
    .await;

    assert_eq!(status.as_u16(), 204);
    assert!(app.store.updates().is_empty());
}

// =============================================================================
// Idempotency
// =============================================================================

#[tokio::test]
async fn duplicate_delivery_reapplies_the_same_update() {
    let app = TestApp::spawn_with(
        MockSentimentProvider::with_sentiment(0.6, 1.1),
        MockTextProvider::with_reply("unused"),
        MockEntryStore::new(),
    )
    .await;

    let event = json!({"entry_path": "journal_entries/a7", "data": {"text": "again"}});
    assert_eq!(post_event(&app, event.clone()).await.as_u16(), 204);
    assert_eq!(post_event(&app, event).await.as_u16(), 204);

    let updates = app.store.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].1, updates[1].1, "redelivery overwrites with identical values");
}
