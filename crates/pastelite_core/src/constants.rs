//! Shared constants used across pastelite crates.

/// Default API port for pastelite.
pub const DEFAULT_PORT: u16 = 38421;

/// Default maximum request body accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Default upper bound for a single store call, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Path prefix under which share links are rendered.
pub const SHARE_PATH_PREFIX: &str = "/p/";
