//! Catalog cache
//!
//! In-memory product and category lists fed by the remote data feed.
//! Subscriptions are replace-on-notify: every notification carries the
//! complete current set and the caches are wholesale-replaced, never
//! merged. Read-only to the cart logic.

use crate::store::{RemoteStore, paths};
use parking_lot::RwLock;
use serde_json::Value;
use shared::{Category, Product};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Cached catalog fed by `products` and `categories` subscriptions
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn RemoteStore>,
    products: Arc<RwLock<Vec<Product>>>,
    categories: Arc<RwLock<Vec<Category>>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            products: Arc::new(RwLock::new(Vec::new())),
            categories: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Load the current catalog once, before the subscriptions start
    pub async fn warmup(&self) -> Result<(), crate::store::StoreError> {
        let products = self.store.get(paths::PRODUCTS).await?;
        *self.products.write() = parse_records(products.as_ref(), "product");

        let categories = self.store.get(paths::CATEGORIES).await?;
        *self.categories.write() = parse_records(categories.as_ref(), "category");

        tracing::info!(
            products = self.products.read().len(),
            categories = self.categories.read().len(),
            "catalog warmed up"
        );
        Ok(())
    }

    /// Spawn the feed subscriptions; each snapshot replaces the whole cache
    pub fn start(&self) {
        spawn_feed(
            self.store.watch(paths::PRODUCTS),
            self.products.clone(),
            "product",
        );
        spawn_feed(
            self.store.watch(paths::CATEGORIES),
            self.categories.clone(),
            "category",
        );
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.read().clone()
    }

    /// Products filtered by optional category name and case-insensitive
    /// name substring
    pub fn products(&self, category: Option<&str>, search: &str) -> Vec<Product> {
        let needle = search.to_lowercase();
        self.products
            .read()
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn find(&self, product_id: &str) -> Option<Product> {
        self.products
            .read()
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
    }
}

/// Parse a feed snapshot (an object keyed by record id) into records,
/// skipping entries that fail to deserialize
fn parse_records<T: serde::de::DeserializeOwned>(snapshot: Option<&Value>, kind: &str) -> Vec<T> {
    let Some(Value::Object(map)) = snapshot else {
        return Vec::new();
    };
    // BTreeMap gives a stable order independent of feed delivery
    let ordered: BTreeMap<&String, &Value> = map.iter().collect();
    ordered
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(kind, id = %id, error = %e, "skipping malformed feed record");
                None
            }
        })
        .collect()
}

fn spawn_feed<T>(
    mut rx: broadcast::Receiver<Value>,
    cache: Arc<RwLock<Vec<T>>>,
    kind: &'static str,
) where
    T: serde::de::DeserializeOwned + Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(snapshot) => {
                    let records = parse_records(Some(&snapshot), kind);
                    tracing::debug!(kind, count = records.len(), "feed snapshot applied");
                    *cache.write() = records;
                }
                // Snapshots are complete, so missing an intermediate
                // delivery loses nothing
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
