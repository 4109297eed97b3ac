//! Order-level enums: variation axis, fulfillment preference, discount policy

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product's temperature/style axis controlling which price applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variation {
    Hot,
    Iced,
    Standard,
}

impl Variation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variation::Hot => "Hot",
            Variation::Iced => "Iced",
            Variation::Standard => "Standard",
        }
    }
}

impl std::fmt::Display for Variation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dine In / Take Out preference; take-out orders consume utensil stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Take Out")]
    TakeOut,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::DineIn => "Dine In",
            Preference::TakeOut => "Take Out",
        }
    }

    pub fn is_take_out(&self) -> bool {
        matches!(self, Preference::TakeOut)
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discount selection applied to the cart subtotal
///
/// The rate table is fixed policy: senior and PWD get 20%, students 8%,
/// everything else (including no selection) 0%. Rates never compound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountCode {
    Senior,
    Pwd,
    Student,
    #[default]
    None,
}

impl DiscountCode {
    /// Map a raw discount code to a variant; unrecognized codes mean no discount
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "senior" => DiscountCode::Senior,
            "pwd" => DiscountCode::Pwd,
            "student" => DiscountCode::Student,
            _ => DiscountCode::None,
        }
    }

    /// Fraction of the subtotal taken off
    pub fn rate(&self) -> Decimal {
        match self {
            DiscountCode::Senior | DiscountCode::Pwd => Decimal::new(20, 2),
            DiscountCode::Student => Decimal::new(8, 2),
            DiscountCode::None => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_rate_table() {
        assert_eq!(DiscountCode::Senior.rate(), Decimal::new(20, 2));
        assert_eq!(DiscountCode::Pwd.rate(), Decimal::new(20, 2));
        assert_eq!(DiscountCode::Student.rate(), Decimal::new(8, 2));
        assert_eq!(DiscountCode::None.rate(), Decimal::ZERO);
    }

    #[test]
    fn unrecognized_codes_mean_no_discount() {
        assert_eq!(DiscountCode::from_code("senior"), DiscountCode::Senior);
        assert_eq!(DiscountCode::from_code("PWD"), DiscountCode::Pwd);
        assert_eq!(DiscountCode::from_code("none"), DiscountCode::None);
        assert_eq!(DiscountCode::from_code(""), DiscountCode::None);
        assert_eq!(DiscountCode::from_code("vip"), DiscountCode::None);
    }

    #[test]
    fn preference_labels_match_store_layout() {
        assert_eq!(Preference::DineIn.as_str(), "Dine In");
        assert_eq!(Preference::TakeOut.as_str(), "Take Out");
        let v = serde_json::to_value(Preference::TakeOut).unwrap();
        assert_eq!(v, serde_json::json!("Take Out"));
    }
}
