pub mod metrics;
pub mod providers;
pub mod store;

pub use store::{EntryStore, FirestoreConfig, FirestoreEntryStore, MockEntryStore, StoreError};
