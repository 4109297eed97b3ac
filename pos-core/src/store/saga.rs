//! Undo journal for multi-step remote writes
//!
//! The remote store has no multi-key transactions, so a multi-step
//! operation (checkout: pending order + stock decrements + counter) records
//! the previous value of every path it touches. If a later step fails the
//! journal is unwound in reverse, restoring each path.
//!
//! Compensation is best effort: an undo write that itself fails is logged
//! and skipped so the remaining steps still get a chance to run.

use super::remote::{RemoteStore, StoreResult};
use serde_json::Value;
use std::sync::Arc;

enum UndoOp {
    /// Restore a path to its previous value (`None` = it was absent)
    Restore {
        path: String,
        previous: Option<Value>,
    },
}

/// Journalled write session over a remote store
pub struct Saga {
    store: Arc<dyn RemoteStore>,
    undo: Vec<UndoOp>,
}

impl Saga {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            undo: Vec::new(),
        }
    }

    /// Write `value` at `path`, journalling the previous value
    pub async fn set(&mut self, path: &str, value: Value) -> StoreResult<()> {
        let previous = self.store.get(path).await?;
        self.store.set(path, value).await?;
        self.undo.push(UndoOp::Restore {
            path: path.to_string(),
            previous,
        });
        Ok(())
    }

    /// Push `value` under `path`, journalling the generated child for removal
    pub async fn push(&mut self, path: &str, value: Value) -> StoreResult<String> {
        let key = self.store.push(path, value).await?;
        self.undo.push(UndoOp::Restore {
            path: format!("{path}/{key}"),
            previous: None,
        });
        Ok(key)
    }

    /// Unwind the journal in reverse order
    pub async fn compensate(self) {
        for op in self.undo.into_iter().rev() {
            let UndoOp::Restore { path, previous } = op;
            let result = match previous {
                Some(value) => self.store.set(&path, value).await,
                None => self.store.remove(&path).await,
            };
            if let Err(e) = result {
                tracing::error!(path = %path, error = %e, "compensation write failed");
            }
        }
    }

    /// Drop the journal; all writes stand
    pub fn commit(self) {}
}
