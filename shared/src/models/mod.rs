//! Persisted domain models
//!
//! Field names and serialized shapes follow the remote tree store layout:
//! pending orders use `PascalCase` keys with `Order_N` line entries, history
//! entries use the lowercase `camelCase` reshape.

mod category;
mod order;
mod product;
mod receipt;
mod staff;
mod stock;

pub use category::Category;
pub use order::{DiscountCode, Preference, Variation};
pub use product::{Product, SizePrice, StockStatus, Variations};
pub use receipt::{HistoryEntry, HistoryLine, Receipt, ReceiptLine};
pub use staff::{Birthday, Staff, StaffUpdate};
pub use stock::{IngredientStock, StockMovement, UtensilStock};
