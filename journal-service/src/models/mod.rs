//! Domain models for the journal backend.

pub mod entry;

pub use entry::{EntryCreatedEvent, JournalEntry, SentimentUpdate};
