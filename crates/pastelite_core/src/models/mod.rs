//! Data models for requests, responses, and persistence.

/// Paste records and availability checks.
pub mod paste;

#[cfg(test)]
mod tests;
