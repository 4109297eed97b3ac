//! Money formatting and order timestamp helpers

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Timestamp format persisted on every order, e.g. `Thu Mar 07 2024 14:03:05`
pub const ORDER_DATETIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S";

/// Calendar-day display format used by the history screen, e.g. `Mar 7 2024`
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d %Y";

/// Render a monetary amount as a 2-decimal fixed string
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Parse a 2-decimal money string back into a `Decimal`
pub fn parse_money(s: &str) -> Option<Decimal> {
    s.trim().parse().ok()
}

/// Current local time in the persisted order format
pub fn now_order_datetime() -> String {
    format_order_datetime(Local::now())
}

pub fn format_order_datetime(dt: DateTime<Local>) -> String {
    dt.format(ORDER_DATETIME_FORMAT).to_string()
}

pub fn parse_order_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), ORDER_DATETIME_FORMAT).ok()
}

/// Calendar day of a persisted order timestamp
pub fn order_date(order_date_time: &str) -> Option<NaiveDate> {
    parse_order_datetime(order_date_time).map(|dt| dt.date())
}

/// Short display form of a calendar day
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn money_is_always_two_decimals() {
        assert_eq!(format_money(Decimal::new(250, 0)), "250.00");
        assert_eq!(format_money(Decimal::new(2050, 2)), "20.50");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }

    #[test]
    fn money_round_trips() {
        let amount = Decimal::new(12345, 2); // 123.45
        assert_eq!(parse_money(&format_money(amount)), Some(amount));
        assert_eq!(parse_money("garbage"), None);
    }

    #[test]
    fn order_datetime_round_trips() {
        let s = "Thu Mar 07 2024 14:03:05";
        let parsed = parse_order_datetime(s).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        assert_eq!(
            order_date(s),
            Some(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
        );
    }

    #[test]
    fn display_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(display_date(date), "Mar 7 2024");
    }
}
