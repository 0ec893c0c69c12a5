//! Serialized, self-restoring process environment overrides.
//!
//! Config and bind-address tests read real env vars. [`EnvOverrides`] holds a
//! process-wide lock for its whole lifetime and puts every touched variable
//! back when dropped.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

fn env_mutex() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: every writer holds the `env_mutex` guard through `EnvOverrides`.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Exclusive handle on the process environment.
pub struct EnvOverrides {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvOverrides {
    /// Block until no other override set is alive.
    pub fn lock() -> Self {
        Self {
            saved: Vec::new(),
            _lock: env_mutex().lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    fn remember(&mut self, key: &str) {
        if !self.saved.iter().any(|(saved, _)| saved == key) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
        }
    }

    /// Set `key=value` until drop.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.remember(key);
        write_var(key, Some(value));
        self
    }

    /// Unset `key` until drop.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.remember(key);
        write_var(key, None);
        self
    }
}

impl Drop for EnvOverrides {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            write_var(&key, previous.as_deref());
        }
    }
}
