//! In-process paste store guarded by a single map lock.

use super::{consume_row, PasteStore};
use crate::deadline::CommitGate;
use crate::error::AppError;
use crate::models::paste::{NewPaste, Paste};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Non-durable [`PasteStore`].
///
/// The map lock is the store's atomic primitive; it only serializes callers
/// within one process, so this backend is not meant to be shared across
/// processes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<String, Paste>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, HashMap<String, Paste>>, AppError> {
        self.rows
            .lock()
            .map_err(|_| AppError::StorageMessage("Memory store lock poisoned".to_string()))
    }

    /// Number of stored rows, live or not.
    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.rows()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.rows()?.is_empty())
    }
}

impl PasteStore for MemoryStore {
    fn insert(&self, draft: NewPaste, gate: &CommitGate) -> Result<Paste, AppError> {
        let mut rows = self.rows()?;
        let id = Uuid::new_v4().to_string();
        if rows.contains_key(&id) {
            return Err(AppError::StorageMessage(format!(
                "Paste id '{}' already exists",
                id
            )));
        }
        let paste = Paste::from_new(id.clone(), draft);
        gate.enter_commit()?;
        rows.insert(id, paste.clone());
        Ok(paste)
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        Ok(self.rows()?.get(id).cloned())
    }

    fn try_consume(
        &self,
        id: &str,
        now: DateTime<Utc>,
        gate: &CommitGate,
    ) -> Result<Option<Paste>, AppError> {
        let mut rows = self.rows()?;
        let Some(current) = rows.get(id).cloned() else {
            return Ok(None);
        };
        let Some(consumed) = consume_row(current, now)? else {
            return Ok(None);
        };
        gate.enter_commit()?;
        rows.insert(id.to_string(), consumed.clone());
        Ok(Some(consumed))
    }
}
