//! Remote tree store contract
//!
//! The remote database is a tree of JSON documents addressed by
//! `/`-separated paths (`orders/17`, `stocks/Ingredients/Choco Cake`).
//! Reads are one-shot; `watch` is replace-on-notify: every mutation under
//! the watched path re-delivers the complete current subtree, never a delta.

use async_trait::async_trait;
use serde_json::Value;
use shared::AppError;
use thiserror::Error;
use tokio::sync::broadcast;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::store(err.to_string())
    }
}

/// Key-path based remote document store
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read the value at `path`, `None` if absent
    async fn get(&self, path: &str) -> StoreResult<Option<Value>>;

    /// Write `value` at `path`, creating intermediate nodes
    async fn set(&self, path: &str, value: Value) -> StoreResult<()>;

    /// Delete the subtree at `path`; deleting an absent path is a no-op
    async fn remove(&self, path: &str) -> StoreResult<()>;

    /// Write `value` under a generated child key of `path`, returning the key
    async fn push(&self, path: &str, value: Value) -> StoreResult<String>;

    /// Atomic conditional write: succeeds only if the current value at
    /// `path` equals `expected` (`None` = absent). Returns whether the
    /// write was applied.
    async fn compare_and_swap(
        &self,
        path: &str,
        expected: Option<Value>,
        new: Value,
    ) -> StoreResult<bool>;

    /// Subscribe to the subtree at `path`. Every mutation touching the
    /// subtree delivers the full current snapshot (`Value::Null` if the
    /// subtree was removed).
    fn watch(&self, path: &str) -> broadcast::Receiver<Value>;
}
