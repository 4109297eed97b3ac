//! Order draft (cart)
//!
//! Holds the lines of the order being built and exposes mutation with
//! merge-by-key semantics: two lines for the same product, variation and
//! size never coexist. Unit prices are captured at add time and never
//! re-read from the product, so a price change upstream does not affect an
//! open cart.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::{AppError, AppResult, DiscountCode, Preference, Product, Variation};

/// Identity key for merging cart lines
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub variation: Variation,
    pub size: String,
}

/// One draft order line; quantity is always >= 1
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub product_name: String,
    pub variation: Variation,
    pub size: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            variation: self.variation,
            size: self.size.clone(),
        }
    }
}

/// Computed totals; discount is derived solely from the code in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// The current draft order
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    customer_name: String,
    discount: DiscountCode,
    preference: Preference,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            customer_name: String::new(),
            discount: DiscountCode::None,
            preference: Preference::DineIn,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn discount(&self) -> DiscountCode {
        self.discount
    }

    pub fn set_discount(&mut self, discount: DiscountCode) {
        self.discount = discount;
    }

    pub fn preference(&self) -> Preference {
        self.preference
    }

    pub fn set_preference(&mut self, preference: Preference) {
        self.preference = preference;
    }

    /// Add one unit of a priced product tap
    ///
    /// Out-of-stock products are rejected without touching the cart. An
    /// existing line with the same (product, variation, size) key gains one
    /// unit; otherwise a new line is appended at the given unit price.
    pub fn add_line(
        &mut self,
        product: &Product,
        variation: Variation,
        size: impl Into<String>,
        unit_price: Decimal,
    ) -> AppResult<()> {
        if product.is_out_of_stock() {
            return Err(AppError::out_of_stock(product.name.clone()));
        }

        let size = size.into();
        let key = LineKey {
            product_id: product.id.clone(),
            variation,
            size: size.clone(),
        };
        if let Some(line) = self.line_mut(&key) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                variation,
                size,
                unit_price,
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Increment an existing line by one; absent keys are a no-op
    pub fn increment(&mut self, key: &LineKey) {
        if let Some(line) = self.line_mut(key) {
            line.quantity += 1;
        }
    }

    /// Decrement a line by one; a line reaching zero is removed outright
    pub fn decrement(&mut self, key: &LineKey) {
        if let Some(index) = self.lines.iter().position(|line| &line.key() == key) {
            if self.lines[index].quantity > 1 {
                self.lines[index].quantity -= 1;
            } else {
                self.lines.remove(index);
            }
        }
    }

    /// Remove a line regardless of quantity
    pub fn remove_line(&mut self, key: &LineKey) {
        self.lines.retain(|line| &line.key() != key);
    }

    /// Empty the lines and customer name
    ///
    /// Discount code and dine-in/take-out selection follow the screen's own
    /// lifecycle and are deliberately not reset here.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer_name.clear();
    }

    /// Pure totals computation: subtotal, discount amount, total
    pub fn totals(&self) -> Totals {
        let subtotal: Decimal = self
            .lines
            .iter()
            .map(|line| line.unit_price * Decimal::from(line.quantity))
            .sum();
        let discount = (subtotal * self.discount.rate())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Totals {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }

    fn line_mut(&mut self, key: &LineKey) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| &line.key() == key)
    }
}
