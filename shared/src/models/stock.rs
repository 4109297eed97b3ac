//! Stock ledger models

use serde::{Deserialize, Serialize};

/// Utensil counter under `stocks/Utensils/{name}`
///
/// Consumed by take-out orders only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtensilStock {
    pub name: String,
    pub quantity: i64,
}

/// Ingredient counter under `stocks/Ingredients/{name}`
///
/// Keyed by product name. Cake items carry `whole_units`; `quantity` is then
/// the remaining slice count and sells down in slices, borrowing from whole
/// units when it runs short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientStock {
    pub name: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whole_units: Option<i64>,
}

/// One audit entry appended to `stocksHistory` for every decrement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub item: String,
    /// Signed quantity delta (negative for consumption)
    pub delta: i64,
    /// Calendar day in display form, e.g. `Mar 7 2024`
    pub date: String,
}
