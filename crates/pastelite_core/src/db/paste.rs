//! Paste storage operations backed by redb.

use crate::{
    db::tables::PASTES,
    deadline::CommitGate,
    error::AppError,
    models::paste::{NewPaste, Paste},
    store::{consume_row, PasteStore},
};
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use std::sync::Arc;
use uuid::Uuid;

/// Accessor for the paste table.
#[derive(Clone)]
pub struct PasteDb {
    db: Arc<redb::Database>,
}

fn decode_paste(bytes: &[u8]) -> Result<Paste, bincode::Error> {
    bincode::deserialize(bytes)
}

impl PasteDb {
    /// Initialize the paste table if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a new paste row under a fresh UUID v4.
    ///
    /// # Errors
    /// Returns an error when serialization fails, the id already exists,
    /// `gate` refuses the commit, or storage operations fail.
    pub fn insert(&self, draft: NewPaste, gate: &CommitGate) -> Result<Paste, AppError> {
        self.insert_with_id(Uuid::new_v4().to_string(), draft, gate)
    }

    pub(crate) fn insert_with_id(
        &self,
        id: String,
        draft: NewPaste,
        gate: &CommitGate,
    ) -> Result<Paste, AppError> {
        let paste = Paste::from_new(id, draft);
        let encoded = bincode::serialize(&paste)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            if pastes.get(paste.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "Paste id '{}' already exists",
                    paste.id
                )));
            }
            pastes.insert(paste.id.as_str(), encoded.as_slice())?;
        }
        if let Err(err) = gate.enter_commit() {
            write_txn.abort()?;
            return Err(err);
        }
        write_txn.commit()?;
        Ok(paste)
    }

    /// Fetch a paste by id without touching its view count.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    pub fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(decode_paste(value.value())?)),
            None => Ok(None),
        }
    }

    /// Check availability at `now` and count one view in a single write
    /// transaction.
    ///
    /// redb admits one write transaction at a time and holds an exclusive lock
    /// on the database file, so the read, the availability check, and the
    /// counter write cannot interleave with another consume. Unavailable rows
    /// abort the transaction without writing, as does a refused `gate`.
    ///
    /// # Returns
    /// The updated row, or `None` when missing, expired, or exhausted.
    pub fn try_consume(
        &self,
        id: &str,
        now: DateTime<Utc>,
        gate: &CommitGate,
    ) -> Result<Option<Paste>, AppError> {
        let write_txn = self.db.begin_write()?;
        let consumed = {
            let mut pastes = write_txn.open_table(PASTES)?;

            let Some(current_guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let current = decode_paste(current_guard.value())?;
            drop(current_guard);

            let Some(consumed) = consume_row(current, now)? else {
                return Ok(None);
            };
            let encoded = bincode::serialize(&consumed)?;
            pastes.insert(id, encoded.as_slice())?;
            consumed
        };

        if let Err(err) = gate.enter_commit() {
            write_txn.abort()?;
            return Err(err);
        }
        write_txn.commit()?;
        Ok(Some(consumed))
    }

    /// Total stored rows, live or not.
    pub fn count(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        Ok(pastes.len()?)
    }

    /// Open a read transaction on the paste table.
    pub fn ping(&self) -> Result<(), AppError> {
        let read_txn = self.db.begin_read()?;
        read_txn.open_table(PASTES)?;
        Ok(())
    }
}

impl PasteStore for PasteDb {
    fn insert(&self, draft: NewPaste, gate: &CommitGate) -> Result<Paste, AppError> {
        PasteDb::insert(self, draft, gate)
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        PasteDb::get(self, id)
    }

    fn try_consume(
        &self,
        id: &str,
        now: DateTime<Utc>,
        gate: &CommitGate,
    ) -> Result<Option<Paste>, AppError> {
        PasteDb::try_consume(self, id, now, gate)
    }

    fn ping(&self) -> Result<(), AppError> {
        PasteDb::ping(self)
    }
}
