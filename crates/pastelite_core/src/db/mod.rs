//! Database layer for pastelite.

/// Paste storage helpers.
pub mod paste;
/// redb table definitions.
pub mod tables;

use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;

pub use paste::PasteDb;

/// Database handle with access to the underlying redb tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub pastes: PasteDb,
}

#[cfg(test)]
mod tests;

impl Database {
    /// Build a handle over an already open redb instance.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be created.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: PasteDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another subsystem in the same process.
    ///
    /// redb refuses a second open of the same file, so components share one
    /// instance instead.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database inside the `path` directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, another process
    /// already holds the database, or table setup fails.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;

        let file = dir.join(tables::REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database at '{}' is already open in another pastelite process.\n\
                    Stop the other instance, or set DB_PATH to a different location.",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::debug!("Opened paste database at {}", file.display());
        Self::from_shared(db)
    }
}
