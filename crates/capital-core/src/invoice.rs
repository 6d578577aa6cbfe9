//! # Invoice Calculator
//!
//! Turns a list of line items and a discount into invoice totals.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► subtotal = Σ amount                                          │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           discount_amount = subtotal × discount / 100                   │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           discounted = subtotal − discount_amount                       │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           tax = discounted × 18%     (CGST 9% + SGST 9%)                │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           grand_total = discounted + tax                                │
//! │                │                                                        │
//! │                ▼  (optional)                                            │
//! │           round_off = round(grand_total) − grand_total                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No step rounds. `2848.1 × 0.18` is exactly `512.658`; rounding to paise is a
//! display concern.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BillItem, DiscountPercent};

/// Combined GST rate (18%).
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Result of [`calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    /// Combined GST.
    pub tax: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub grand_total: Money,
    pub round_off: Money,
}

impl InvoiceTotals {
    /// Subtotal after discount, before tax.
    #[inline]
    pub fn taxable_amount(&self) -> Money {
        self.subtotal - self.discount_amount
    }

    /// Amount collected from the customer.
    #[inline]
    pub fn payable(&self) -> Money {
        self.grand_total + self.round_off
    }

    /// Fills in `round_off` so that `payable()` is a whole rupee amount.
    ///
    /// `grand_total` is left untouched.
    pub fn with_round_off(mut self) -> Self {
        self.round_off = self.grand_total.round_to_major() - self.grand_total;
        self
    }
}

/// Computes invoice totals.
///
/// Pure: no item or discount is modified, and the same input always yields the
/// same output.
///
/// ```rust
/// use capital_core::invoice::calculate;
/// use capital_core::{BillItem, DiscountPercent, Money};
/// use rust_decimal::Decimal;
///
/// let item = BillItem {
///     id: "i1".into(),
///     product_id: "p4".into(),
///     product_name: "Pakistani Suit (Georgette)".into(),
///     batch_id: "b4".into(),
///     quantity: 2,
///     rate: Money::from_major(1499),
///     amount: Money::from_major(2998),
/// };
/// let discount = DiscountPercent::new(Decimal::from(5)).unwrap();
/// let totals = calculate(&[item], discount);
///
/// assert_eq!(totals.grand_total.amount(), Decimal::new(3360758, 3));
/// ```
pub fn calculate(items: &[BillItem], discount: DiscountPercent) -> InvoiceTotals {
    let subtotal: Money = items.iter().map(|item| item.amount).sum();
    let discount_amount = subtotal.percent(discount.value());
    let discounted = subtotal - discount_amount;
    let tax = discounted.scale(GST_RATE);

    InvoiceTotals {
        subtotal,
        discount_amount,
        tax,
        cgst: tax.half(),
        sgst: tax.half(),
        grand_total: discounted + tax,
        round_off: Money::zero(),
    }
}

/// [`calculate`], then optionally rounds the payable amount to the rupee.
pub fn calculate_with_rounding(
    items: &[BillItem],
    discount: DiscountPercent,
    round_to_rupee: bool,
) -> InvoiceTotals {
    let totals = calculate(items, discount);
    if round_to_rupee {
        totals.with_round_off()
    } else {
        totals
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(quantity: i64, rate: Money) -> BillItem {
        BillItem {
            id: format!("i-{}-{}", quantity, rate),
            product_id: "p".to_string(),
            product_name: "Item".to_string(),
            batch_id: "b".to_string(),
            quantity,
            rate,
            amount: rate * quantity,
        }
    }

    fn pct(value: Decimal) -> DiscountPercent {
        DiscountPercent::new(value).unwrap()
    }

    #[test]
    fn test_empty_items_are_all_zero() {
        let totals = calculate(&[], pct(dec!(10)));
        assert!(totals.subtotal.is_zero());
        assert!(totals.discount_amount.is_zero());
        assert!(totals.tax.is_zero());
        assert!(totals.grand_total.is_zero());
    }

    #[test]
    fn test_two_products_no_discount() {
        // 1499 + 898 = 2397 → tax 431.46 → 2828.46
        let items = [
            item(1, Money::from_major(1499)),
            item(1, Money::from_major(898)),
        ];
        let totals = calculate(&items, DiscountPercent::zero());

        assert_eq!(totals.subtotal.amount(), dec!(2397));
        assert_eq!(totals.tax.amount(), dec!(431.46));
        assert_eq!(totals.grand_total.amount(), dec!(2828.46));
    }

    #[test]
    fn test_three_units_of_one_item() {
        let items = [item(3, Money::from_major(799))];
        let totals = calculate(&items, DiscountPercent::zero());

        assert_eq!(totals.subtotal.amount(), dec!(2397));
        assert!(totals.discount_amount.is_zero());
        assert_eq!(totals.tax.amount(), dec!(431.46));
        assert_eq!(totals.cgst.amount(), dec!(215.73));
        assert_eq!(totals.sgst.amount(), dec!(215.73));
        assert_eq!(totals.grand_total.amount(), dec!(2828.46));
    }

    #[test]
    fn test_five_percent_discount_is_exact() {
        let items = [item(2, Money::from_major(1499))];
        let totals = calculate(&items, pct(dec!(5)));

        assert_eq!(totals.subtotal.amount(), dec!(2998));
        assert_eq!(totals.discount_amount.amount(), dec!(149.9));
        assert_eq!(totals.taxable_amount().amount(), dec!(2848.1));
        assert_eq!(totals.tax.amount(), dec!(512.658));
        assert_eq!(totals.grand_total.amount(), dec!(3360.758));
        assert_eq!(totals.grand_total.to_string(), "₹3360.76");
    }

    #[test]
    fn test_cgst_sgst_split() {
        let items = [item(2, Money::from_major(1499))];
        let totals = calculate(&items, pct(dec!(5)));

        assert_eq!(totals.cgst, totals.sgst);
        assert_eq!(totals.cgst.amount(), dec!(256.329));
        assert_eq!(totals.cgst + totals.sgst, totals.tax);
    }

    #[test]
    fn test_identities_hold_for_any_discount() {
        let items = [
            item(3, Money::new(dec!(333.33))),
            item(1, Money::new(dec!(0.01))),
            item(7, Money::from_major(899)),
        ];
        for d in [dec!(0), dec!(2.5), dec!(33.333), dec!(50), dec!(100)] {
            let totals = calculate(&items, pct(d));
            let discounted = totals.subtotal - totals.discount_amount;
            assert_eq!(totals.tax, discounted.scale(GST_RATE));
            assert_eq!(totals.grand_total, discounted + totals.tax);
            assert_eq!(totals.cgst + totals.sgst, totals.tax);
        }
    }

    #[test]
    fn test_full_discount_zeroes_total() {
        let items = [item(1, Money::from_major(1499))];
        let totals = calculate(&items, pct(dec!(100)));
        assert!(totals.grand_total.is_zero());
        assert!(totals.tax.is_zero());
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let items = vec![item(2, Money::from_major(1499)), item(1, Money::from_major(650))];
        let before = items.clone();
        let a = calculate(&items, pct(dec!(7.5)));
        let b = calculate(&items, pct(dec!(7.5)));
        assert_eq!(a, b);
        assert_eq!(items, before);
    }

    #[test]
    fn test_round_off_leaves_grand_total() {
        let items = [
            item(1, Money::from_major(1499)),
            item(1, Money::from_major(898)),
        ];
        let totals = calculate_with_rounding(&items, DiscountPercent::zero(), true);

        assert_eq!(totals.grand_total.amount(), dec!(2828.46));
        assert_eq!(totals.round_off.amount(), dec!(-0.46));
        assert_eq!(totals.payable().amount(), dec!(2828));

        let unrounded = calculate_with_rounding(&items, DiscountPercent::zero(), false);
        assert!(unrounded.round_off.is_zero());
        assert_eq!(unrounded.payable(), unrounded.grand_total);
    }

    #[test]
    fn test_gst_rate_constant() {
        assert_eq!(GST_RATE, dec!(0.18));
    }
}
