//! Backend for the journaling app.
//!
//! Two stateless operations: sentiment analysis triggered by an
//! entry-created event push, and a callable text-generation endpoint.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
