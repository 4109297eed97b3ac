//! Transaction history viewer
//!
//! Reads the `history` tree on demand and keeps a visible row list the
//! filters operate on. Filters do not compose: applying one always starts
//! from the full set and replaces whatever was visible before, matching
//! how the register screen behaves. Closing a day renders a printable
//! summary and hands it to the printer; nothing is persisted or deleted,
//! so a close can be re-run for any date.

use crate::printing::{PrintService, render_daily_summary};
use crate::store::{RemoteStore, paths};
use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde_json::Value;
use shared::{AppResult, HistoryEntry, util};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One row of the history table
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub order_no: String,
    pub cashier: String,
    pub date: String,
    pub quantity: u32,
    pub total: Decimal,
}

impl TransactionRow {
    fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            order_no: entry.order_number.clone(),
            cashier: entry.staff_name.clone(),
            date: entry.order_date_time.clone(),
            quantity: entry.quantity_total(),
            total: util::parse_money(&entry.total).unwrap_or(Decimal::ZERO),
        }
    }

    /// Calendar day the transaction belongs to, if the timestamp parses
    pub fn day(&self) -> Option<NaiveDate> {
        util::order_date(&self.date)
    }
}

#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn RemoteStore>,
    all: Arc<RwLock<Vec<TransactionRow>>>,
    visible: Arc<RwLock<Vec<TransactionRow>>>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            all: Arc::new(RwLock::new(Vec::new())),
            visible: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Re-read the history tree and reset the visible list to everything
    pub async fn refresh(&self) -> AppResult<()> {
        let snapshot = self.store.get(paths::HISTORY).await?;
        let rows = parse_rows(snapshot.as_ref());
        *self.all.write() = rows.clone();
        *self.visible.write() = rows;
        Ok(())
    }

    pub fn visible(&self) -> Vec<TransactionRow> {
        self.visible.read().clone()
    }

    /// Show only transactions from one calendar day
    ///
    /// Starts from the full set, not from the current view.
    pub fn filter_by_date(&self, date: NaiveDate) {
        let rows = self
            .all
            .read()
            .iter()
            .filter(|row| row.day() == Some(date))
            .cloned()
            .collect();
        *self.visible.write() = rows;
    }

    /// Show only transactions matching the text
    ///
    /// Case-insensitive substring match on order number, cashier name or
    /// the timestamp string. Starts from the full set, not from the
    /// current view.
    pub fn filter_by_text(&self, text: &str) {
        let needle = text.to_lowercase();
        let rows = self
            .all
            .read()
            .iter()
            .filter(|row| {
                row.order_no.contains(&needle)
                    || row.cashier.to_lowercase().contains(&needle)
                    || row.date.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        *self.visible.write() = rows;
    }

    pub fn show_all(&self) {
        *self.visible.write() = self.all.read().clone();
    }

    /// Print the daily close summary for one calendar day
    ///
    /// Returns `Ok(false)` when the day has no transactions; nothing is
    /// printed and nothing changes. The close is presentation only and
    /// can be re-run for any date.
    pub fn close_transaction(&self, date: NaiveDate, printer: &dyn PrintService) -> AppResult<bool> {
        let rows: Vec<TransactionRow> = self
            .all
            .read()
            .iter()
            .filter(|row| row.day() == Some(date))
            .cloned()
            .collect();
        if rows.is_empty() {
            tracing::info!(date = %date, "no transactions to close");
            return Ok(false);
        }

        let label = date.format(util::DISPLAY_DATE_FORMAT).to_string();
        let document = render_daily_summary(&label, &rows);
        printer.print(&document)?;
        tracing::info!(date = %date, transactions = rows.len(), "daily close printed");
        Ok(true)
    }
}

fn parse_rows(snapshot: Option<&Value>) -> Vec<TransactionRow> {
    let Some(Value::Object(map)) = snapshot else {
        return Vec::new();
    };
    // BTreeMap for a stable order under the store's generated keys
    let ordered: BTreeMap<_, _> = map.iter().collect();
    ordered
        .values()
        .filter_map(|value| match serde_json::from_value::<HistoryEntry>((*value).clone()) {
            Ok(entry) => Some(TransactionRow::from_entry(&entry)),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed history entry");
                None
            }
        })
        .collect()
}
