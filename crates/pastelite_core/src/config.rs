//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, DEFAULT_STORE_TIMEOUT_MS};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for pastelite.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_paste_size: usize,
    pub store_timeout_ms: u64,
    /// Public origin used when building share links, e.g. `https://paste.example`.
    pub base_url: Option<String>,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring unparsable {}='{}'; using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

fn normalize_base_url(value: String) -> Option<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH").map(expand_tilde).unwrap_or_else(|_| {
                let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                let cache_dir = home.join(".cache").join("pastelite");
                cache_dir.join("db").to_string_lossy().to_string()
            }),
            port: env_parse_or("PORT", DEFAULT_PORT),
            max_paste_size: env_parse_or("MAX_PASTE_SIZE", DEFAULT_MAX_PASTE_SIZE),
            store_timeout_ms: env_parse_or("STORE_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS).max(1),
            base_url: env::var("BASE_URL").ok().and_then(normalize_base_url),
        }
    }

    /// Deadline applied to every store call made on behalf of a request.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_env_flag, Config};
    use crate::constants::{DEFAULT_PORT, DEFAULT_STORE_TIMEOUT_MS};
    use crate::env::EnvOverrides;
    use std::time::Duration;

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn from_env_applies_overrides_and_trims_base_url() {
        let mut env = EnvOverrides::lock();
        env.set("DB_PATH", "/tmp/pastelite-config-test")
            .set("PORT", "4555")
            .set("STORE_TIMEOUT_MS", "250")
            .set("BASE_URL", " https://paste.example/ ");

        let config = Config::from_env();
        assert_eq!(config.db_path, "/tmp/pastelite-config-test");
        assert_eq!(config.port, 4555);
        assert_eq!(config.store_timeout(), Duration::from_millis(250));
        assert_eq!(config.base_url.as_deref(), Some("https://paste.example"));
    }

    #[test]
    fn from_env_falls_back_to_defaults_on_garbage() {
        let mut env = EnvOverrides::lock();
        env.set("PORT", "not-a-port")
            .remove("STORE_TIMEOUT_MS")
            .set("BASE_URL", "   ");

        let config = Config::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.store_timeout_ms, DEFAULT_STORE_TIMEOUT_MS);
        assert!(config.base_url.is_none());
    }
}
