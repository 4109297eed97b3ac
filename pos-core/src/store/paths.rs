//! Well-known remote tree paths

pub const CATEGORIES: &str = "categories";
pub const PRODUCTS: &str = "products";
pub const STAFFS: &str = "staffs";
pub const ORDERS: &str = "orders";
pub const ORDER_NUMBER: &str = "orderNumber";
pub const HISTORY: &str = "history";
pub const UTENSILS: &str = "stocks/Utensils";
pub const INGREDIENTS: &str = "stocks/Ingredients";
pub const STOCKS_HISTORY: &str = "stocksHistory";

/// Local cache keys
pub const CACHE_STAFF_INFO: &str = "staffInfo";
pub const CACHE_ORDER_NUMBER: &str = "orderNumber";

pub fn order(order_no: u64) -> String {
    format!("{ORDERS}/{order_no}")
}

pub fn staff(staff_id: &str) -> String {
    format!("{STAFFS}/{staff_id}")
}

pub fn utensil(name: &str) -> String {
    format!("{UTENSILS}/{name}")
}

pub fn ingredient(name: &str) -> String {
    format!("{INGREDIENTS}/{name}")
}
