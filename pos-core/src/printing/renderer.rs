//! Printable document rendering
//!
//! Documents are self-contained HTML sized for a 58mm thermal roll. The
//! renderer only formats what it is given; totals and timestamps arrive
//! already frozen on the receipt or aggregated by the history viewer.

use crate::history::TransactionRow;
use rust_decimal::Decimal;
use shared::{Receipt, util};

/// Render the customer receipt for a confirmed order
pub fn render_receipt(
    cafe_name: &str,
    cafe_address: &str,
    order_no: u64,
    receipt: &Receipt,
) -> String {
    let mut lines = String::new();
    for item in &receipt.items {
        let label = if item.size.is_empty() {
            item.product_name.clone()
        } else {
            format!("{} ({})", item.product_name, item.size)
        };
        lines.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&label),
            item.quantity,
            escape(&item.price),
        ));
    }

    format!(
        "<html><body>\n\
         <h3>{name}</h3>\n\
         <p>{address}</p>\n\
         <p>Order No. {order_no}<br>{date}<br>{preference}</p>\n\
         <p>Customer: {customer}<br>Cashier: {cashier}</p>\n\
         <table>\n\
         <tr><th>Item</th><th>Qty</th><th>Price</th></tr>\n\
         {lines}\
         </table>\n\
         <p>Subtotal: {subtotal}<br>Discount: {discount}<br>Total: {total}</p>\n\
         <p>Thank you!</p>\n\
         </body></html>",
        name = escape(cafe_name),
        address = escape(cafe_address),
        date = escape(&receipt.order_date_time),
        preference = receipt.preference,
        customer = escape(&receipt.customer_name),
        cashier = escape(&receipt.staff_name),
        subtotal = receipt.subtotal,
        discount = receipt.discount,
        total = receipt.total,
    )
}

/// Render the daily close summary for one calendar day
pub fn render_daily_summary(date_label: &str, rows: &[TransactionRow]) -> String {
    let mut table = String::new();
    let mut quantity_total: u32 = 0;
    let mut grand_total = Decimal::ZERO;
    for row in rows {
        quantity_total += row.quantity;
        grand_total += row.total;
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&row.order_no),
            escape(&row.cashier),
            escape(&row.date),
            row.quantity,
            util::format_money(row.total),
        ));
    }

    let cashier = rows.first().map(|row| row.cashier.as_str()).unwrap_or("");

    format!(
        "<html><body>\n\
         <h3>Daily Transactions</h3>\n\
         <p>{label}<br>Cashier: {cashier}</p>\n\
         <table>\n\
         <tr><th>Order No.</th><th>Cashier</th><th>Date</th><th>Quantity</th><th>Total</th></tr>\n\
         {table}\
         </table>\n\
         <p>Quantity Total: {quantity_total}&nbsp;&nbsp;&nbsp;&nbsp;Grand Total: {grand}</p>\n\
         </body></html>",
        label = escape(date_label),
        cashier = escape(cashier),
        grand = util::format_money(grand_total),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Preference, ReceiptLine, Variation};

    fn receipt() -> Receipt {
        Receipt {
            customer_name: "Ana".into(),
            discount: "20.00".into(),
            order_date_time: "Thu Mar 07 2024 14:03:05".into(),
            preference: Preference::TakeOut,
            staff_name: "Leo".into(),
            subtotal: "250.00".into(),
            total: "230.00".into(),
            items: vec![
                ReceiptLine {
                    product_name: "Latte".into(),
                    variation: Variation::Hot,
                    size: "12oz".into(),
                    price: "100.00".into(),
                    quantity: 2,
                },
                ReceiptLine {
                    product_name: "Muffin".into(),
                    variation: Variation::Standard,
                    size: String::new(),
                    price: "50.00".into(),
                    quantity: 1,
                },
            ],
        }
    }

    #[test]
    fn receipt_document_carries_the_frozen_totals() {
        let html = render_receipt("Cafe POS", "123 Main St", 7, &receipt());
        assert!(html.contains("Order No. 7"));
        assert!(html.contains("Latte (12oz)"));
        assert!(html.contains("Subtotal: 250.00"));
        assert!(html.contains("Discount: 20.00"));
        assert!(html.contains("Total: 230.00"));
        assert!(html.contains("Take Out"));
    }

    #[test]
    fn sizeless_lines_print_the_bare_name() {
        let html = render_receipt("Cafe POS", "", 7, &receipt());
        assert!(html.contains("<td>Muffin</td>"));
    }

    #[test]
    fn summary_aggregates_quantity_and_grand_total() {
        let rows = vec![
            TransactionRow {
                order_no: "7".into(),
                cashier: "Leo".into(),
                date: "Thu Mar 07 2024 10:15:00".into(),
                quantity: 3,
                total: Decimal::new(23000, 2),
            },
            TransactionRow {
                order_no: "8".into(),
                cashier: "Mia".into(),
                date: "Thu Mar 07 2024 16:40:00".into(),
                quantity: 1,
                total: Decimal::new(12000, 2),
            },
        ];
        let html = render_daily_summary("Mar 7 2024", &rows);
        assert!(html.contains("Quantity Total: 4"));
        assert!(html.contains("Grand Total: 350.00"));
        assert!(html.contains("<td>Leo</td>"));
        // Header carries the cashier of the first entry of the day
        assert!(html.contains("Cashier: Leo"));
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let mut r = receipt();
        r.customer_name = "<b>Ana</b>".into();
        let html = render_receipt("Cafe POS", "", 7, &r);
        assert!(html.contains("&lt;b&gt;Ana&lt;/b&gt;"));
    }
}
