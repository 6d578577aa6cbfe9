//! # Receipt Rendering
//!
//! Plain-text invoice and share message for a finalized bill.
//!
//! Both are pure string builders; writing files and sending messages happens
//! in the server.
//!
//! ```text
//!            CAPITAL
//!       12 Market Road, Pune
//! ----------------------------------------
//! Bill No: INV-000001
//! Date:    12/10/2025 14:05
//! ...
//! ```

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Bill;

const WIDTH: usize = 48;

/// Store identity printed at the top of every invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreHeader {
    pub name: String,
    pub address: Vec<String>,
    pub currency_symbol: String,
}

impl Default for StoreHeader {
    fn default() -> Self {
        StoreHeader {
            name: "Capital".to_string(),
            address: Vec::new(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl StoreHeader {
    /// Formats an amount rounded to paise with this store's symbol.
    pub fn amount(&self, money: Money) -> String {
        let rounded = money.round_to_paise().amount();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", self.currency_symbol, rounded.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, rounded.abs())
        }
    }
}

fn centered(out: &mut String, text: &str) {
    let _ = writeln!(out, "{:^width$}", text, width = WIDTH);
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "-".repeat(WIDTH));
}

fn total_row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<28}{:>20}", label, value);
}

/// Renders the printable invoice.
///
/// Lists every item, then subtotal, discount (when non-zero), CGST, SGST,
/// round-off (when non-zero) and the grand total.
pub fn render_invoice_text(bill: &Bill, store: &StoreHeader) -> String {
    let mut out = String::new();

    centered(&mut out, &store.name.to_uppercase());
    for line in &store.address {
        centered(&mut out, line);
    }
    centered(&mut out, "TAX INVOICE");
    rule(&mut out);

    let _ = writeln!(out, "Bill No: {}", bill.bill_number);
    let _ = writeln!(out, "Date:    {}", bill.date.format("%d/%m/%Y %H:%M"));
    if let Some(customer) = &bill.customer {
        let _ = writeln!(out, "Customer: {}", customer.name);
        if let Some(phone) = &customer.phone {
            let _ = writeln!(out, "Phone:    {}", phone);
        }
    }
    let _ = writeln!(out, "Payment: {}", bill.payment_method.to_string().to_uppercase());
    rule(&mut out);

    let _ = writeln!(out, "{:<22}{:>5}{:>10}{:>11}", "Item", "Qty", "Rate", "Amount");
    for item in &bill.items {
        let name: String = item.product_name.chars().take(21).collect();
        let _ = writeln!(
            out,
            "{:<22}{:>5}{:>10.2}{:>11.2}",
            name,
            item.quantity,
            item.rate.round_to_paise().amount(),
            item.amount.round_to_paise().amount()
        );
    }
    rule(&mut out);

    total_row(&mut out, "Subtotal", &store.amount(bill.subtotal));
    if !bill.discount.is_zero() {
        total_row(
            &mut out,
            &format!("Discount ({})", bill.discount),
            &format!("-{}", store.amount(bill.discount_amount)),
        );
    }
    total_row(&mut out, "CGST (9%)", &store.amount(bill.cgst()));
    total_row(&mut out, "SGST (9%)", &store.amount(bill.sgst()));
    if !bill.round_off.is_zero() {
        total_row(&mut out, "Round Off", &store.amount(bill.round_off));
    }
    rule(&mut out);
    total_row(&mut out, "GRAND TOTAL", &store.amount(bill.payable()));
    rule(&mut out);
    centered(&mut out, "Thank you for shopping with us!");

    out
}

/// Composes the message sent to a customer when a bill is shared.
///
/// The download section is omitted when no document link is available.
pub fn compose_share_message(bill: &Bill, store: &StoreHeader, document_url: Option<&str>) -> String {
    let customer = bill
        .customer
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("Walk-in Customer");

    let mut msg = format!(
        "*{} - Invoice*\n\n*Bill No:* {}\n*Date:* {}\n*Customer:* {}\n*Total:* {}\n\n",
        store.name.to_uppercase(),
        bill.bill_number,
        bill.date.format("%d/%m/%Y"),
        customer,
        store.amount(bill.payable()),
    );
    if let Some(url) = document_url {
        let _ = write!(msg, "📄 Download your bill:\n{}\n\n", url);
    }
    msg.push_str("Thank you for your business!");
    msg
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::calculate;
    use crate::types::{BillItem, Customer, DiscountPercent, PaymentMethod};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sample_bill() -> Bill {
        let items = vec![BillItem {
            id: "i1".to_string(),
            product_id: "p4".to_string(),
            product_name: "Pakistani Suit (Georgette)".to_string(),
            batch_id: "b4".to_string(),
            quantity: 2,
            rate: Money::from_major(1499),
            amount: Money::from_major(2998),
        }];
        let discount = DiscountPercent::new(dec!(5)).unwrap();
        let totals = calculate(&items, discount);
        Bill {
            id: "bill-1".to_string(),
            bill_number: "INV-000001".to_string(),
            items,
            subtotal: totals.subtotal,
            discount,
            discount_amount: totals.discount_amount,
            tax: totals.tax,
            round_off: Money::zero(),
            grand_total: totals.grand_total,
            payment_method: PaymentMethod::Upi,
            customer: Some(Customer {
                id: "c1".to_string(),
                name: "Priya Sharma".to_string(),
                phone: Some("+91 98765 43210".to_string()),
            }),
            date: Utc.with_ymd_and_hms(2025, 10, 12, 14, 5, 0).unwrap(),
        }
    }

    #[test]
    fn test_invoice_contains_breakdown() {
        let text = render_invoice_text(&sample_bill(), &StoreHeader::default());

        assert!(text.contains("CAPITAL"));
        assert!(text.contains("INV-000001"));
        assert!(text.contains("Pakistani Suit (Geor"));
        assert!(text.contains("Subtotal"));
        assert!(text.contains("₹2998.00"));
        assert!(text.contains("Discount (5%)"));
        assert!(text.contains("-₹149.90"));
        assert!(text.contains("CGST (9%)"));
        assert!(text.contains("₹256.33"));
        assert!(text.contains("₹3360.76"));
        assert!(!text.contains("Round Off"));
    }

    #[test]
    fn test_share_message_with_link() {
        let msg = compose_share_message(
            &sample_bill(),
            &StoreHeader::default(),
            Some("file:///bills/INV-000001.txt"),
        );
        assert!(msg.starts_with("*CAPITAL - Invoice*\n\n*Bill No:* INV-000001\n"));
        assert!(msg.contains("*Date:* 12/10/2025\n"));
        assert!(msg.contains("*Customer:* Priya Sharma\n"));
        assert!(msg.contains("*Total:* ₹3360.76\n"));
        assert!(msg.contains("file:///bills/INV-000001.txt"));
        assert!(msg.ends_with("Thank you for your business!"));
    }

    #[test]
    fn test_share_message_without_link_or_customer() {
        let mut bill = sample_bill();
        bill.customer = None;
        let msg = compose_share_message(&bill, &StoreHeader::default(), None);
        assert!(msg.contains("Walk-in Customer"));
        assert!(!msg.contains("Download"));
    }

    #[test]
    fn test_custom_currency_symbol() {
        let store = StoreHeader {
            currency_symbol: "Rs.".to_string(),
            ..StoreHeader::default()
        };
        assert_eq!(store.amount(Money::new(dec!(512.658))), "Rs.512.66");
        assert_eq!(store.amount(Money::new(dec!(-0.46))), "-Rs.0.46");
    }
}
