//! Application error types for core storage and domain logic.
use std::time::Duration;
use thiserror::Error;

/// Top-level application error type.
///
/// Unavailable pastes are not errors: `consume` reports them as `Ok(None)`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Storage call timed out after {0:?}")]
    StorageTimeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl AppError {
    /// Whether this error belongs to the storage class (unreachable, timed out,
    /// or returned an unexpected state).
    pub fn is_storage(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use std::time::Duration;

    #[test]
    fn only_validation_errors_fall_outside_storage_class() {
        assert!(!AppError::Validation("empty".to_string()).is_storage());
        assert!(AppError::StorageMessage("down".to_string()).is_storage());
        assert!(AppError::StorageTimeout(Duration::from_millis(5)).is_storage());
    }
}
