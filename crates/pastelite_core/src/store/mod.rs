//! Storage contract for paste records.

/// Map-backed store for tests and embedding.
pub mod memory;

use crate::deadline::CommitGate;
use crate::error::AppError;
use crate::models::paste::{NewPaste, Paste};
use chrono::{DateTime, Utc};

pub use memory::MemoryStore;

/// Persistence backend for paste records.
///
/// Implementations must be safe to call from many threads at once, and
/// [`PasteStore::try_consume`] must be indivisible against every other
/// `try_consume` on the same id, including callers in other processes when the
/// backend is shared between processes.
pub trait PasteStore: Send + Sync {
    /// Persist a draft under a freshly generated id with `view_count = 0`.
    ///
    /// The write only lands if `gate` admits it.
    fn insert(&self, draft: NewPaste, gate: &CommitGate) -> Result<Paste, AppError>;

    /// Point lookup without side effects. Not used on the read-serving path.
    fn get(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Atomically check availability at `now` and count one view.
    ///
    /// Returns the row with its incremented `view_count`, or `None` when the id
    /// is unknown or the row is expired or exhausted. Unavailable rows are
    /// never written. `gate` is claimed inside the atomic boundary right before
    /// the increment becomes visible; a refused gate leaves the row untouched.
    fn try_consume(
        &self,
        id: &str,
        now: DateTime<Utc>,
        gate: &CommitGate,
    ) -> Result<Option<Paste>, AppError>;

    /// Cheap liveness check.
    fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Apply one counted read to a freshly loaded row, or report it unavailable.
///
/// Backends call this inside their atomic boundary.
pub(crate) fn consume_row(mut paste: Paste, now: DateTime<Utc>) -> Result<Option<Paste>, AppError> {
    if !paste.is_available_at(now) {
        return Ok(None);
    }
    paste.view_count = paste.view_count.checked_add(1).ok_or_else(|| {
        AppError::StorageMessage(format!("View counter overflow for paste '{}'", paste.id))
    })?;
    Ok(Some(paste))
}
