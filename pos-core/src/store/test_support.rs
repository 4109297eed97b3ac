//! Test doubles for the store layer

use super::memory::MemoryStore;
use super::remote::{RemoteStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Store wrapper that rejects writes under one path prefix
pub struct FailingStore {
    pub inner: Arc<MemoryStore>,
    pub fail_prefix: String,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>, fail_prefix: impl Into<String>) -> Self {
        Self {
            inner,
            fail_prefix: fail_prefix.into(),
        }
    }
}

#[async_trait]
impl RemoteStore for FailingStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Value>> {
        self.inner.get(path).await
    }

    async fn set(&self, path: &str, value: Value) -> StoreResult<()> {
        if path.starts_with(&self.fail_prefix) {
            return Err(StoreError::Unavailable(format!("injected failure: {path}")));
        }
        self.inner.set(path, value).await
    }

    async fn remove(&self, path: &str) -> StoreResult<()> {
        self.inner.remove(path).await
    }

    async fn push(&self, path: &str, value: Value) -> StoreResult<String> {
        if path.starts_with(&self.fail_prefix) {
            return Err(StoreError::Unavailable(format!("injected failure: {path}")));
        }
        self.inner.push(path, value).await
    }

    async fn compare_and_swap(
        &self,
        path: &str,
        expected: Option<Value>,
        new: Value,
    ) -> StoreResult<bool> {
        self.inner.compare_and_swap(path, expected, new).await
    }

    fn watch(&self, path: &str) -> broadcast::Receiver<Value> {
        self.inner.watch(path)
    }
}
