//! HTTP handlers for the journal backend.
//!
//! `sentiment` serves the entry-created event push, `generate` the callable
//! entry point, `health` the infrastructure probes.

pub mod generate;
pub mod health;
pub mod sentiment;

pub use generate::generate;
pub use health::{health_check, metrics, readiness_check};
pub use sentiment::entry_created;
