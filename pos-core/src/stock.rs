//! Stock ledger
//!
//! Checkout consumes two kinds of counters:
//!
//! - **Ingredients** (`stocks/Ingredients/{product name}`), decremented for
//!   every `Standard`-variation line. Cake records sell in slices and
//!   borrow from whole units when the slice count runs short, at a fixed
//!   8 slices per whole.
//! - **Utensils** (`stocks/Utensils/{name}`), decremented per line when the
//!   order is Take Out, keyed by the line's variation.
//!
//! Every individual decrement appends one audit entry to `stocksHistory`.
//! A counter that does not exist is logged and skipped; checkout proceeds.

use crate::store::{RemoteStore, Saga, StoreResult, paths};
use chrono::Local;
use serde_json::json;
use shared::{IngredientStock, Preference, ReceiptLine, StockMovement, UtensilStock, Variation, util};
use std::sync::Arc;

/// Slice-to-whole conversion ratio for cake records
pub const SLICES_PER_WHOLE: i64 = 8;

/// Utensils consumed by one take-out line of the given variation
pub fn utensils_for(variation: Variation) -> &'static [&'static str] {
    match variation {
        Variation::Hot => &["Hot Cup"],
        Variation::Iced => &["Cold Cup", "Straw"],
        Variation::Standard => &["Spork", "Tupperware"],
    }
}

/// Stock counter maintenance during checkout
#[derive(Clone)]
pub struct StockService {
    store: Arc<dyn RemoteStore>,
}

impl StockService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Apply all decrements for a confirmed order through the saga journal
    pub async fn apply_order(
        &self,
        saga: &mut Saga,
        items: &[ReceiptLine],
        preference: Preference,
    ) -> StoreResult<()> {
        let date = util::display_date(Local::now().date_naive());

        for line in items {
            let quantity = i64::from(line.quantity);
            if line.variation == Variation::Standard {
                self.decrement_ingredient(saga, &line.product_name, quantity, &date)
                    .await?;
            }
            if preference.is_take_out() {
                for utensil in utensils_for(line.variation) {
                    self.decrement_utensil(saga, utensil, quantity, &date).await?;
                }
            }
        }
        Ok(())
    }

    async fn decrement_ingredient(
        &self,
        saga: &mut Saga,
        name: &str,
        quantity: i64,
        date: &str,
    ) -> StoreResult<()> {
        let path = paths::ingredient(name);
        let Some(value) = self.store.get(&path).await? else {
            tracing::warn!(item = name, "ingredient counter missing, skipping decrement");
            return Ok(());
        };
        let record: IngredientStock = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(item = name, error = %e, "malformed ingredient record, skipping");
                return Ok(());
            }
        };

        let updated = decrement_slices(record, quantity);
        if updated.quantity < 0 || updated.whole_units.is_some_and(|w| w < 0) {
            tracing::warn!(
                item = name,
                slices = updated.quantity,
                whole_units = ?updated.whole_units,
                "ingredient counter went negative"
            );
        }

        saga.set(&path, json!(updated)).await?;
        self.append_movement(saga, name, -quantity, date).await
    }

    async fn decrement_utensil(
        &self,
        saga: &mut Saga,
        name: &str,
        quantity: i64,
        date: &str,
    ) -> StoreResult<()> {
        let path = paths::utensil(name);
        let Some(value) = self.store.get(&path).await? else {
            tracing::warn!(item = name, "utensil counter missing, skipping decrement");
            return Ok(());
        };
        let mut record: UtensilStock = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(item = name, error = %e, "malformed utensil record, skipping");
                return Ok(());
            }
        };

        record.quantity -= quantity;
        if record.quantity < 0 {
            tracing::warn!(
                item = name,
                quantity = record.quantity,
                "utensil counter went negative"
            );
        }
        saga.set(&path, json!(record)).await?;
        self.append_movement(saga, name, -quantity, date).await
    }

    async fn append_movement(
        &self,
        saga: &mut Saga,
        item: &str,
        delta: i64,
        date: &str,
    ) -> StoreResult<()> {
        let movement = StockMovement {
            item: item.to_string(),
            delta,
            date: date.to_string(),
        };
        saga.push(paths::STOCKS_HISTORY, json!(movement)).await?;
        Ok(())
    }
}

/// Sell `quantity` slices off an ingredient record
///
/// Non-cake records simply decrement. Cake records borrow whole units at
/// `ceil(shortfall / 8)` when the slice count would go negative, which
/// lands the slice count back in `[0, 8)`.
fn decrement_slices(mut record: IngredientStock, quantity: i64) -> IngredientStock {
    record.quantity -= quantity;
    if record.quantity < 0
        && let Some(whole) = record.whole_units
    {
        let shortfall = -record.quantity;
        // Signed div_ceil is unstable; shortfall is positive so this is equivalent.
        let borrowed = (shortfall + SLICES_PER_WHOLE - 1) / SLICES_PER_WHOLE;
        record.whole_units = Some(whole - borrowed);
        record.quantity += borrowed * SLICES_PER_WHOLE;
    }
    record
}
