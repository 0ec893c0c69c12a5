//! Run blocking store calls on the tokio blocking pool under a deadline.
//!
//! A timed-out caller and the blocking task race through a [`CommitGate`]:
//! whichever side claims it first decides the outcome. If the caller gives up
//! first, the store aborts its transaction instead of committing. If the store
//! reaches its commit point first, the caller waits for that commit and
//! returns its result.

use crate::error::AppError;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PENDING: u8 = 0;
const COMMITTING: u8 = 1;
const ABANDONED: u8 = 2;

/// One-shot handshake between a waiting caller and a store write.
///
/// Stores call [`CommitGate::enter_commit`] right before making a write
/// durable. A fresh gate that nobody abandons always lets the write through.
#[derive(Debug, Clone, Default)]
pub struct CommitGate {
    state: Arc<AtomicU8>,
}

impl CommitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the right to commit.
    ///
    /// # Errors
    /// Returns [`AppError::StorageMessage`] when the caller already gave up;
    /// the store must then discard its write.
    pub fn enter_commit(&self) -> Result<(), AppError> {
        match self
            .state
            .compare_exchange(PENDING, COMMITTING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) | Err(COMMITTING) => Ok(()),
            Err(_) => Err(AppError::StorageMessage(
                "Caller gave up before commit; write discarded".to_string(),
            )),
        }
    }

    /// Give up on the call. `false` means a commit is already under way.
    pub fn abandon(&self) -> bool {
        match self
            .state
            .compare_exchange(PENDING, ABANDONED, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) | Err(ABANDONED) => true,
            Err(_) => false,
        }
    }
}

fn joined<T>(result: Result<Result<T, AppError>, tokio::task::JoinError>) -> Result<T, AppError> {
    result.unwrap_or_else(|join_err| {
        Err(AppError::StorageMessage(format!(
            "Store task failed: {}",
            join_err
        )))
    })
}

/// Execute `op` on the blocking pool and wait at most `timeout` for it.
///
/// `op` receives the gate its store writes must pass. On timeout the gate is
/// abandoned and the caller gets [`AppError::StorageTimeout`]; the abandoned
/// task can no longer commit. A task already committing is awaited instead.
/// No retry is made.
///
/// # Errors
/// Returns the operation's own error, `StorageTimeout` on expiry, or
/// `StorageMessage` if the blocking task panicked.
pub async fn run_with_deadline<T, F>(timeout: Duration, op: F) -> Result<T, AppError>
where
    F: FnOnce(&CommitGate) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let gate = CommitGate::new();
    let worker_gate = gate.clone();
    let mut task = tokio::task::spawn_blocking(move || op(&worker_gate));

    match tokio::time::timeout(timeout, &mut task).await {
        Ok(result) => joined(result),
        Err(_) if gate.abandon() => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Store call exceeded deadline");
            Err(AppError::StorageTimeout(timeout))
        }
        Err(_) => {
            tracing::debug!("Deadline passed mid-commit; waiting for the store");
            joined(task.await)
        }
    }
}
