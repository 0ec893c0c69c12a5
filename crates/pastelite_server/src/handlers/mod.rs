//! HTTP request handlers.

/// Store liveness endpoint.
pub mod health;
/// Paste create and read endpoints.
pub mod paste;
