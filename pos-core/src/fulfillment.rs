//! Order fulfillment board
//!
//! Flat list of pending orders rebuilt from every `orders` snapshot, with
//! client-side filtering by preference and free text. Marking an order done
//! moves it into the history store: the pending record is deleted only
//! after the history write succeeded, so a write failure can never lose
//! the only copy. A delete that fails after the write leaves a duplicate
//! in history, which is logged and surfaced to the caller.

use crate::store::{RemoteStore, paths};
use parking_lot::RwLock;
use serde_json::{Value, json};
use shared::{AppError, AppResult, HistoryEntry, Preference, Receipt};
use std::sync::Arc;
use tokio::sync::broadcast;

/// One pending order keyed by its human-readable number
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOrder {
    pub order_no: String,
    pub receipt: Receipt,
}

/// Preference filter buttons on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferenceFilter {
    #[default]
    All,
    DineIn,
    TakeOut,
}

impl PreferenceFilter {
    fn matches(&self, preference: Preference) -> bool {
        match self {
            PreferenceFilter::All => true,
            PreferenceFilter::DineIn => preference == Preference::DineIn,
            PreferenceFilter::TakeOut => preference == Preference::TakeOut,
        }
    }
}

#[derive(Clone)]
pub struct FulfillmentBoard {
    store: Arc<dyn RemoteStore>,
    orders: Arc<RwLock<Vec<PendingOrder>>>,
}

impl FulfillmentBoard {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Load the current pending set once, before the subscription starts
    pub async fn warmup(&self) -> Result<(), crate::store::StoreError> {
        let snapshot = self.store.get(paths::ORDERS).await?;
        *self.orders.write() = parse_orders(snapshot.as_ref());
        Ok(())
    }

    /// Spawn the pending-orders subscription; every snapshot replaces the list
    pub fn start(&self) {
        let mut rx = self.store.watch(paths::ORDERS);
        let orders = self.orders.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(snapshot) => {
                        *orders.write() = parse_orders(Some(&snapshot));
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Pending orders under the current filters
    ///
    /// Preference and free text compose: the text must match the customer
    /// name (case-insensitive) or appear in the timestamp string.
    pub fn filtered(&self, filter: PreferenceFilter, search: &str) -> Vec<PendingOrder> {
        let needle = search.to_lowercase();
        self.orders
            .read()
            .iter()
            .filter(|pending| filter.matches(pending.receipt.preference))
            .filter(|pending| {
                needle.is_empty()
                    || pending
                        .receipt
                        .customer_name
                        .to_lowercase()
                        .contains(&needle)
                    || pending.receipt.order_date_time.contains(search)
            })
            .cloned()
            .collect()
    }

    /// Move a completed order into the history store
    ///
    /// Returns the generated history key. The pending record is removed
    /// only after the history write succeeded.
    pub async fn mark_done(&self, order_no: &str) -> AppResult<String> {
        let path = format!("{}/{}", paths::ORDERS, order_no);
        let Some(value) = self.store.get(&path).await? else {
            return Err(AppError::not_found(format!("order {order_no}")));
        };
        let receipt = Receipt::from_value(&value)
            .map_err(|e| AppError::internal(format!("malformed pending order: {e}")))?;

        let entry = HistoryEntry::from_receipt(order_no, &receipt);
        let history_key = self.store.push(paths::HISTORY, json!(entry)).await?;

        if let Err(e) = self.store.remove(&path).await {
            // History already holds a copy; the pending record is now a
            // duplicate until the delete is retried by hand
            tracing::error!(order_no, error = %e, "pending order delete failed after history write");
            return Err(AppError::store(format!(
                "order {order_no} archived but not removed from pending"
            )));
        }

        tracing::info!(order_no, history_key = %history_key, "order marked done");
        Ok(history_key)
    }
}

fn parse_orders(snapshot: Option<&Value>) -> Vec<PendingOrder> {
    let Some(Value::Object(map)) = snapshot else {
        return Vec::new();
    };
    let mut orders: Vec<PendingOrder> = map
        .iter()
        .filter_map(|(order_no, value)| match Receipt::from_value(value) {
            Ok(receipt) => Some(PendingOrder {
                order_no: order_no.clone(),
                receipt,
            }),
            Err(e) => {
                tracing::warn!(order_no = %order_no, error = %e, "skipping malformed pending order");
                None
            }
        })
        .collect();
    // Numeric order, oldest first
    orders.sort_by_key(|pending| pending.order_no.parse::<u64>().unwrap_or(u64::MAX));
    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::store::test_support::FailingStore;
    use shared::{ErrorCode, ReceiptLine, Variation};

    fn receipt(customer: &str, preference: Preference, when: &str) -> Receipt {
        Receipt {
            customer_name: customer.into(),
            discount: "0.00".into(),
            order_date_time: when.into(),
            preference,
            staff_name: "Leo".into(),
            subtotal: "100.00".into(),
            total: "100.00".into(),
            items: vec![ReceiptLine {
                product_name: "Latte".into(),
                variation: Variation::Hot,
                size: "12oz".into(),
                price: "100.00".into(),
                quantity: 1,
            }],
        }
    }

    async fn seeded_board() -> (Arc<MemoryStore>, FulfillmentBoard) {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                &paths::order(7),
                receipt("Ana", Preference::DineIn, "Thu Mar 07 2024 10:00:00").to_value(),
            )
            .await
            .unwrap();
        store
            .set(
                &paths::order(8),
                receipt("Ben", Preference::TakeOut, "Fri Mar 08 2024 11:00:00").to_value(),
            )
            .await
            .unwrap();
        let board = FulfillmentBoard::new(store.clone());
        board.warmup().await.unwrap();
        (store, board)
    }

    #[tokio::test]
    async fn board_lists_pending_in_numeric_order() {
        let (_store, board) = seeded_board().await;
        let all = board.filtered(PreferenceFilter::All, "");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].order_no, "7");
        assert_eq!(all[1].order_no, "8");
    }

    #[tokio::test]
    async fn preference_and_text_filters_compose() {
        let (_store, board) = seeded_board().await;

        assert_eq!(board.filtered(PreferenceFilter::TakeOut, "").len(), 1);
        assert_eq!(board.filtered(PreferenceFilter::All, "ana").len(), 1);
        assert_eq!(board.filtered(PreferenceFilter::All, "Mar 08").len(), 1);
        // Composition: take-out AND named Ana matches nothing
        assert!(board.filtered(PreferenceFilter::TakeOut, "ana").is_empty());
    }

    #[tokio::test]
    async fn mark_done_moves_the_order_into_history() {
        let (store, board) = seeded_board().await;

        let history_key = board.mark_done("7").await.unwrap();

        assert!(store.get(&paths::order(7)).await.unwrap().is_none());
        let entry = store
            .get(&format!("{}/{}", paths::HISTORY, history_key))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry["customerName"], "Ana");
        assert_eq!(entry["orderNumber"], "7");
        assert_eq!(entry["orderItems"]["order_1"]["productName"], "Latte");
    }

    #[tokio::test]
    async fn mark_done_on_missing_order_is_not_found() {
        let (_store, board) = seeded_board().await;
        let err = board.mark_done("99").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn failed_history_write_keeps_the_pending_order() {
        let inner = Arc::new(MemoryStore::new());
        inner
            .set(
                &paths::order(7),
                receipt("Ana", Preference::DineIn, "Thu Mar 07 2024 10:00:00").to_value(),
            )
            .await
            .unwrap();
        let store: Arc<dyn RemoteStore> =
            Arc::new(FailingStore::new(inner.clone(), paths::HISTORY));
        let board = FulfillmentBoard::new(store);
        board.warmup().await.unwrap();

        board.mark_done("7").await.unwrap_err();

        // The only copy survives; nothing reached history
        assert!(inner.get(&paths::order(7)).await.unwrap().is_some());
        assert!(inner.get(paths::HISTORY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_replaces_the_board() {
        let (store, board) = seeded_board().await;
        board.start();

        store.remove(&paths::order(7)).await.unwrap();

        let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(1);
        loop {
            if board.filtered(PreferenceFilter::All, "").len() == 1 {
                break;
            }
            assert!(tokio::time::Instant::now() < deadline, "board never refreshed");
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}
