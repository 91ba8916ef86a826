//! Error handling for the clipboard history
//!
//! Adapters (storage, clipboard backends, settings) return `HistoryResult`.
//! The store itself never surfaces these to callers; it logs them and keeps
//! working from memory. All variants are serializable so the UI bridge can
//! forward them over IPC.

use serde::Serialize;
use thiserror::Error;

/// Clipboard history errors
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum HistoryError {
    /// Durable storage failed (open, read, write, commit)
    #[error("Storage error: {0}")]
    Storage(String),

    /// OS clipboard could not be read or written
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Persisted data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Settings could not be located or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization(err.to_string())
    }
}

impl From<redb::DatabaseError> for HistoryError {
    fn from(err: redb::DatabaseError) -> Self {
        HistoryError::Storage(format!("Failed to open database: {}", err))
    }
}

impl From<redb::TransactionError> for HistoryError {
    fn from(err: redb::TransactionError) -> Self {
        HistoryError::Storage(format!("Failed to begin transaction: {}", err))
    }
}

impl From<redb::TableError> for HistoryError {
    fn from(err: redb::TableError) -> Self {
        HistoryError::Storage(format!("Failed to open table: {}", err))
    }
}

impl From<redb::StorageError> for HistoryError {
    fn from(err: redb::StorageError) -> Self {
        HistoryError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for HistoryError {
    fn from(err: redb::CommitError) -> Self {
        HistoryError::Storage(format!("Failed to commit: {}", err))
    }
}

pub type HistoryResult<T> = Result<T, HistoryError>;
