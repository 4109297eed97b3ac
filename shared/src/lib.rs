//! Shared domain types for the café POS core
//!
//! This crate holds everything both the service layer and its callers need
//! to agree on:
//!
//! - **Models** (`models`): catalog, staff, receipt and stock records as they
//!   are persisted in the remote tree store
//! - **Errors** (`error`): structured error codes and the `AppError` type
//! - **Utilities** (`util`): money formatting and the order timestamp format

pub mod error;
pub mod models;
pub mod util;

// Re-export the common surface
pub use error::{AppError, AppResult, ErrorCode};
pub use models::{
    Birthday, Category, DiscountCode, HistoryEntry, HistoryLine, IngredientStock, Preference,
    Product, Receipt, ReceiptLine, SizePrice, Staff, StaffUpdate, StockMovement, StockStatus,
    UtensilStock, Variation, Variations,
};
