//! Journal entry model and the creation-event payload.

use serde::{Deserialize, Serialize};

/// A journal entry as it lives in the document store.
///
/// The mobile client creates entries with `text` only. The sentiment fields
/// and `analysisComplete` are written exactly once by the entry-created
/// handler; `analysisComplete` is true iff both score and magnitude have
/// been written. Field names follow the store's camelCase convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Entry text. Absent or empty text is a valid state; such entries are
    /// never analyzed.
    #[serde(default)]
    pub text: Option<String>,

    /// Sentiment score in −1.0..1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,

    /// Sentiment magnitude, ≥ 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_magnitude: Option<f64>,

    /// Set true by the backend once score and magnitude are written.
    #[serde(default)]
    pub analysis_complete: bool,
}

/// Document-creation event pushed by the platform when a new entry appears
/// in the journal-entries collection.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryCreatedEvent {
    /// Store path of the created document, e.g. `journal_entries/<id>`.
    /// Sufficient to update the same record in place.
    pub entry_path: String,

    /// The record's initial field values.
    pub data: JournalEntry,
}

/// The exact field set the sentiment handler writes back onto an entry.
///
/// `analysisComplete: true` accompanies every update; re-applying the same
/// update is safe (idempotent by overwrite).
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentUpdate {
    pub score: f64,
    pub magnitude: f64,
}
