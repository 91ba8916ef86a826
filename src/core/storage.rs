//! Durable key-value storage for the history
//!
//! The whole ordered list is written as one JSON document under a fixed key
//! on every mutation and read back once at startup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use redb::{Database, ReadableTable, TableDefinition};

use crate::shared::errors::HistoryResult;
use crate::shared::lock_or_recover;
use crate::shared::types::ClipboardEntry;

/// Key the history list is stored under
pub const HISTORY_KEY: &str = "clipboardHistory";

/// Key: storage key, Value: JSON document
const STORE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("notch_clipboard");

/// Storage trait for clipboard history persistence
pub trait HistoryStorage: Send + Sync {
    /// `Ok(None)` when nothing was ever saved under `key`
    fn load(&self, key: &str) -> HistoryResult<Option<Vec<ClipboardEntry>>>;

    fn save(&self, key: &str, entries: &[ClipboardEntry]) -> HistoryResult<()>;
}

/// Redb-based storage implementation
pub struct RedbStorage {
    db: Database,
}

impl RedbStorage {
    /// Open (or create) the database at `path`, creating parent directories
    pub fn open(path: &Path) -> HistoryResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Make sure the table exists so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _table = write_txn.open_table(STORE_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(path = %path.display(), "opened clipboard history database");
        Ok(Self { db })
    }
}

impl HistoryStorage for RedbStorage {
    fn load(&self, key: &str) -> HistoryResult<Option<Vec<ClipboardEntry>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STORE_TABLE)?;

        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_str(value.value())?)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, entries: &[ClipboardEntry]) -> HistoryResult<()> {
        let serialized = serde_json::to_string(entries)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STORE_TABLE)?;
            table.insert(key, serialized.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-memory storage, used as a fallback when the database cannot be opened
#[derive(Default)]
pub struct InMemoryStorage {
    documents: Mutex<HashMap<String, Vec<ClipboardEntry>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStorage for InMemoryStorage {
    fn load(&self, key: &str) -> HistoryResult<Option<Vec<ClipboardEntry>>> {
        Ok(lock_or_recover(&self.documents).get(key).cloned())
    }

    fn save(&self, key: &str, entries: &[ClipboardEntry]) -> HistoryResult<()> {
        lock_or_recover(&self.documents).insert(key.to_string(), entries.to_vec());
        Ok(())
    }
}
