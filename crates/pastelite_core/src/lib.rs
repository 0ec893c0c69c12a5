//! Core domain library for pastelite (records, storage, availability rules).

/// Injectable time sources.
pub mod clock;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// redb-backed record store.
pub mod db;
/// Bounded execution of blocking store calls.
pub mod deadline;
/// Process environment helpers.
pub mod env;
/// Application error types (storage/validation).
pub mod error;
/// Paste records and request/response shapes.
pub mod models;
/// Paste lifecycle: create and consume.
pub mod service;
/// Storage contract and in-memory backend.
pub mod store;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use constants::DEFAULT_PORT;
pub use db::Database;
pub use error::AppError;
pub use service::{is_available, PasteService};
pub use store::PasteStore;
