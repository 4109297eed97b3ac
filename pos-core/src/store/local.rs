//! redb-backed device cache
//!
//! Small key-value store for state that must survive an app relaunch
//! without the network: the logged-in staff record (`staffInfo`) and the
//! order-number fallback (`orderNumber`). Values are JSON.

use redb::{Database, ReadableDatabase, TableDefinition};
use serde_json::Value;
use shared::AppError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::cache(err.to_string())
    }
}

/// Local key-value cache backed by redb
///
/// Commits are durable as soon as they return; the database file stays
/// consistent across power loss.
#[derive(Clone)]
pub struct LocalCache {
    db: Arc<Database>,
}

impl LocalCache {
    /// Open or create the cache database at the given path
    pub fn open(path: impl AsRef<Path>) -> CacheResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    pub fn get(&self, key: &str) -> CacheResult<Option<Value>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    pub fn set(&self, key: &str, value: &Value) -> CacheResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> CacheResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
