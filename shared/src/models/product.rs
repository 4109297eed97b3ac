//! Product model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock status as displayed on the menu grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

/// One size label with its price, e.g. `12oz -> 120.00`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizePrice {
    pub size: String,
    pub price: Decimal,
}

/// Price variations: either a hot/iced temperature axis with per-size
/// prices, or a single standard price (cakes, pastries)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variations {
    Temperature {
        hot: Vec<SizePrice>,
        iced: Vec<SizePrice>,
    },
    Standard {
        price: Decimal,
    },
}

/// Product entity
///
/// Immutable once fetched; the catalog cache replaces the full product set
/// on every feed notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub stock_status: StockStatus,
    pub variations: Variations,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_status == StockStatus::OutOfStock
    }
}
