//! Order number counter
//!
//! One monotonically increasing human-readable number, persisted remotely
//! under `orderNumber` and mirrored into the device cache as a fallback for
//! startup without the network. Claiming a number is a conditional write on
//! the remote value, so two tills racing a checkout can never be assigned
//! the same number.

use crate::store::{LocalCache, RemoteStore, paths};
use serde_json::{Value, json};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;

/// Counter starts here on a fresh system
const FIRST_ORDER_NUMBER: u64 = 1;

/// Rounds of conditional-write retry before giving up
const MAX_CLAIM_ROUNDS: usize = 5;

#[derive(Clone)]
pub struct OrderCounter {
    store: Arc<dyn RemoteStore>,
    cache: LocalCache,
}

impl OrderCounter {
    pub fn new(store: Arc<dyn RemoteStore>, cache: LocalCache) -> Self {
        Self { store, cache }
    }

    /// The next order number to be assigned
    ///
    /// Remote value first; if the remote read fails, the locally mirrored
    /// value stands in. A fresh system starts at 1.
    pub async fn current(&self) -> AppResult<u64> {
        match self.store.get(paths::ORDER_NUMBER).await {
            Ok(Some(value)) => as_number(&value)
                .ok_or_else(|| AppError::internal("malformed remote order number")),
            Ok(None) => Ok(self.local_fallback().unwrap_or(FIRST_ORDER_NUMBER)),
            Err(e) => {
                tracing::warn!(error = %e, "remote order number unreadable, using local mirror");
                self.local_fallback().ok_or_else(|| {
                    AppError::store("order number unavailable remotely and not cached")
                })
            }
        }
    }

    /// Atomically claim the current number and advance the counter
    ///
    /// Returns the claimed number. Loses gracefully: when another till
    /// claims first, the conditional write misses and this round retries
    /// against the fresh value.
    pub async fn claim(&self) -> AppResult<u64> {
        for _ in 0..MAX_CLAIM_ROUNDS {
            let remote = self.store.get(paths::ORDER_NUMBER).await?;
            let number = match &remote {
                Some(value) => as_number(value)
                    .ok_or_else(|| AppError::internal("malformed remote order number"))?,
                None => self.local_fallback().unwrap_or(FIRST_ORDER_NUMBER),
            };

            let applied = self
                .store
                .compare_and_swap(paths::ORDER_NUMBER, remote, json!(number + 1))
                .await?;
            if applied {
                self.mirror(number + 1);
                return Ok(number);
            }
            tracing::debug!(number, "order number claim lost, retrying");
        }
        Err(AppError::new(ErrorCode::ConflictRetryExhausted))
    }

    /// Give a claimed number back (checkout compensation)
    ///
    /// Only possible while nobody else advanced past it; otherwise the
    /// number stays burned and the sequence simply has a gap.
    pub async fn release(&self, claimed: u64) {
        match self
            .store
            .compare_and_swap(
                paths::ORDER_NUMBER,
                Some(json!(claimed + 1)),
                json!(claimed),
            )
            .await
        {
            Ok(true) => self.mirror(claimed),
            Ok(false) => {
                tracing::warn!(claimed, "counter advanced concurrently, leaving a gap")
            }
            Err(e) => tracing::error!(claimed, error = %e, "counter release failed"),
        }
    }

    fn local_fallback(&self) -> Option<u64> {
        match self.cache.get(paths::CACHE_ORDER_NUMBER) {
            Ok(Some(value)) => as_number(&value),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "local order number unreadable");
                None
            }
        }
    }

    fn mirror(&self, number: u64) {
        if let Err(e) = self.cache.set(paths::CACHE_ORDER_NUMBER, &json!(number)) {
            tracing::warn!(error = %e, "failed to mirror order number locally");
        }
    }
}

fn as_number(value: &Value) -> Option<u64> {
    value.as_u64()
}
