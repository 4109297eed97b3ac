//! In-process remote store
//!
//! Holds the whole document tree as one JSON value behind an `RwLock`.
//! Watchers are registered per path; any mutation touching a watched
//! subtree re-broadcasts that subtree's full snapshot.

use super::remote::{RemoteStore, StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use uuid::Uuid;

const WATCH_CHANNEL_CAPACITY: usize = 32;

/// In-memory tree store with replace-on-notify subscriptions
pub struct MemoryStore {
    tree: RwLock<Value>,
    watchers: DashMap<String, broadcast::Sender<Value>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(Value::Object(Map::new())),
            watchers: DashMap::new(),
        }
    }

    fn segments(path: &str) -> StoreResult<Vec<&str>> {
        if path.is_empty() {
            return Err(StoreError::InvalidPath("empty path".into()));
        }
        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(segments)
    }

    fn node<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
        let mut current = root;
        for segment in segments {
            current = current.as_object()?.get(*segment)?;
        }
        Some(current)
    }

    /// Descend to the parent of the last segment, creating objects on the way
    fn parent_mut<'a>(root: &'a mut Value, segments: &[&str]) -> &'a mut Map<String, Value> {
        let mut current = root;
        for segment in &segments[..segments.len() - 1] {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            current = current
                .as_object_mut()
                .unwrap()
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current.as_object_mut().unwrap()
    }

    /// Two paths touch the same subtree if either is a prefix of the other
    fn related(a: &str, b: &str) -> bool {
        a == b
            || a.strip_prefix(b).is_some_and(|rest| rest.starts_with('/'))
            || b.strip_prefix(a).is_some_and(|rest| rest.starts_with('/'))
    }

    fn snapshot(&self, path: &str) -> Value {
        let Ok(segments) = Self::segments(path) else {
            return Value::Null;
        };
        let tree = self.tree.read();
        Self::node(&tree, &segments).cloned().unwrap_or(Value::Null)
    }

    fn notify(&self, mutated: &str) {
        for entry in self.watchers.iter() {
            if Self::related(entry.key(), mutated) {
                // Lagging receivers just miss intermediate snapshots
                let _ = entry.value().send(self.snapshot(entry.key()));
            }
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get(&self, path: &str) -> StoreResult<Option<Value>> {
        let segments = Self::segments(path)?;
        let tree = self.tree.read();
        Ok(Self::node(&tree, &segments).cloned())
    }

    async fn set(&self, path: &str, value: Value) -> StoreResult<()> {
        let segments = Self::segments(path)?;
        {
            let mut tree = self.tree.write();
            let parent = Self::parent_mut(&mut tree, &segments);
            parent.insert(segments[segments.len() - 1].to_string(), value);
        }
        self.notify(path);
        Ok(())
    }

    async fn remove(&self, path: &str) -> StoreResult<()> {
        let segments = Self::segments(path)?;
        let removed = {
            let mut tree = self.tree.write();
            let parent = Self::parent_mut(&mut tree, &segments);
            parent.remove(segments[segments.len() - 1]).is_some()
        };
        if removed {
            self.notify(path);
        }
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> StoreResult<String> {
        let key = Uuid::new_v4().simple().to_string();
        self.set(&format!("{path}/{key}"), value).await?;
        Ok(key)
    }

    async fn compare_and_swap(
        &self,
        path: &str,
        expected: Option<Value>,
        new: Value,
    ) -> StoreResult<bool> {
        let segments = Self::segments(path)?;
        let swapped = {
            let mut tree = self.tree.write();
            let current = Self::node(&tree, &segments).cloned();
            if current != expected {
                false
            } else {
                let parent = Self::parent_mut(&mut tree, &segments);
                parent.insert(segments[segments.len() - 1].to_string(), new);
                true
            }
        };
        if swapped {
            self.notify(path);
        }
        Ok(swapped)
    }

    fn watch(&self, path: &str) -> broadcast::Receiver<Value> {
        self.watchers
            .entry(path.to_string())
            .or_insert_with(|| broadcast::channel(WATCH_CHANNEL_CAPACITY).0)
            .subscribe()
    }
}
