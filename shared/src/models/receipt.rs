//! Receipt and history models
//!
//! A pending order is persisted under `orders/{orderNumber}` as a flat
//! `PascalCase` record whose line items sit beside the header fields as
//! `Order_1..Order_N`. Marking an order done reshapes it into the
//! lowercase-keyed [`HistoryEntry`] stored under `history/{generatedKey}`.

use super::order::{Preference, Variation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// One frozen order line: a snapshot of a cart line at confirmation time,
/// independent of later product or cart mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceiptLine {
    pub product_name: String,
    pub variation: Variation,
    pub size: String,
    /// Unit price as a 2-decimal fixed string
    pub price: String,
    pub quantity: u32,
}

/// Frozen copy of the cart at confirmation time
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub customer_name: String,
    /// Discount amount (not rate) as a 2-decimal fixed string
    pub discount: String,
    pub order_date_time: String,
    pub preference: Preference,
    pub staff_name: String,
    pub subtotal: String,
    pub total: String,
    pub items: Vec<ReceiptLine>,
}

impl Receipt {
    /// Total item count across all lines
    pub fn quantity_total(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Serialize into the flat store record with `Order_N` line keys
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("CustomerName".into(), json!(self.customer_name));
        map.insert("Discount".into(), json!(self.discount));
        map.insert("OrderDateTime".into(), json!(self.order_date_time));
        map.insert("Preference".into(), json!(self.preference));
        map.insert("StaffName".into(), json!(self.staff_name));
        map.insert("Subtotal".into(), json!(self.subtotal));
        map.insert("Total".into(), json!(self.total));
        for (i, line) in self.items.iter().enumerate() {
            map.insert(format!("Order_{}", i + 1), json!(line));
        }
        Value::Object(map)
    }

    /// Parse a flat store record back into a receipt
    ///
    /// Line keys are ordered by their numeric suffix, not lexically, so an
    /// order with more than nine lines keeps its line order.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Header {
            customer_name: String,
            discount: String,
            order_date_time: String,
            preference: Preference,
            staff_name: String,
            subtotal: String,
            total: String,
        }

        let header: Header = serde_json::from_value(value.clone())?;

        let mut numbered: Vec<(u32, ReceiptLine)> = Vec::new();
        if let Some(map) = value.as_object() {
            for (key, line) in map {
                if let Some(n) = key
                    .strip_prefix("Order_")
                    .and_then(|suffix| suffix.parse::<u32>().ok())
                {
                    numbered.push((n, serde_json::from_value(line.clone())?));
                }
            }
        }
        numbered.sort_by_key(|(n, _)| *n);

        Ok(Self {
            customer_name: header.customer_name,
            discount: header.discount,
            order_date_time: header.order_date_time,
            preference: header.preference,
            staff_name: header.staff_name,
            subtotal: header.subtotal,
            total: header.total,
            items: numbered.into_iter().map(|(_, line)| line).collect(),
        })
    }
}

/// Lowercase reshape of one order line as stored in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryLine {
    pub price: String,
    pub product_name: String,
    pub quantity: u32,
    pub size: String,
    pub variation: Variation,
}

/// A fulfilled order as stored under `history/{generatedKey}`
///
/// Keyed by a generated identifier; the human-readable order number is kept
/// as a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub customer_name: String,
    pub discount: String,
    pub order_date_time: String,
    pub order_items: BTreeMap<String, HistoryLine>,
    pub order_number: String,
    pub preference: Preference,
    pub staff_name: String,
    pub subtotal: String,
    pub total: String,
}

impl HistoryEntry {
    /// Reshape a pending order into its history form
    pub fn from_receipt(order_number: impl Into<String>, receipt: &Receipt) -> Self {
        let order_items = receipt
            .items
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let reshaped = HistoryLine {
                    price: line.price.clone(),
                    product_name: line.product_name.clone(),
                    quantity: line.quantity,
                    size: line.size.clone(),
                    variation: line.variation,
                };
                (format!("order_{}", i + 1), reshaped)
            })
            .collect();

        Self {
            customer_name: receipt.customer_name.clone(),
            discount: receipt.discount.clone(),
            order_date_time: receipt.order_date_time.clone(),
            order_items,
            order_number: order_number.into(),
            preference: receipt.preference,
            staff_name: receipt.staff_name.clone(),
            subtotal: receipt.subtotal.clone(),
            total: receipt.total.clone(),
        }
    }

    /// Total item count across all lines
    pub fn quantity_total(&self) -> u32 {
        self.order_items.values().map(|line| line.quantity).sum()
    }
}
