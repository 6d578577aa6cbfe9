//! # Cart Builder
//!
//! Accumulates line items for an in-progress sale.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Counter Action           Operation              Cart Change            │
//! │  ──────────────           ─────────              ───────────            │
//! │                                                                         │
//! │  Pick batch + qty ──────► add_line() ──────────► lines.push(item)       │
//! │                                                                         │
//! │  Edit qty / rate ───────► update_line() ───────► lines[i] recomputed    │
//! │                                                                         │
//! │  Click Remove ──────────► remove_line() ───────► lines.remove(i)        │
//! │                                                                         │
//! │  Enter discount % ──────► set_discount() ──────► discount = d           │
//! │                                                                         │
//! │  Click Clear / Save ────► clear() ─────────────► empty cart             │
//! │                                                                         │
//! │  NOTE: the cart never touches Batch.remaining. Stock only moves when    │
//! │        the sale is finalized.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Rule
//! The same batch may appear on several lines. The sum of their quantities
//! must never exceed `batch.remaining`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::invoice::{self, InvoiceTotals};
use crate::money::Money;
use crate::types::{Batch, BillItem, DiscountPercent, Product};
use crate::validation::{validate_price, validate_quantity};
use crate::MAX_CART_LINES;

/// The cart for the sale being rung up.
///
/// ## Invariants
/// - Every line has `quantity > 0` and `amount = quantity × rate`
/// - Per batch, the summed line quantity is at most the batch remaining
///   (as of the last check)
/// - At most [`MAX_CART_LINES`] lines
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<BillItem>,

    #[ts(type = "number")]
    pub discount: DiscountPercent,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            discount: DiscountPercent::zero(),
            created_at: Utc::now(),
        }
    }

    /// Appends a line for `quantity` units of `batch` at `rate`.
    ///
    /// ## Checks (in order)
    /// 1. quantity in `1..=999`, rate not negative
    /// 2. batch belongs to product
    /// 3. product is active
    /// 4. cart has room for another line
    /// 5. this batch's total quantity in the cart stays within `remaining`
    ///
    /// Nothing is changed when a check fails.
    pub fn add_line(
        &mut self,
        product: &Product,
        batch: &Batch,
        quantity: i64,
        rate: Money,
    ) -> CoreResult<&BillItem> {
        validate_quantity(quantity)?;
        validate_price("rate", rate)?;

        if batch.product_id != product.id {
            return Err(CoreError::BatchProductMismatch {
                batch_id: batch.id.clone(),
                product_id: product.id.clone(),
            });
        }

        if !product.is_active() {
            return Err(CoreError::ProductInactive(product.id.clone()));
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        let in_cart = self.quantity_for_batch(&batch.id);
        check_stock(batch, in_cart, quantity)?;

        self.lines.push(BillItem {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            batch_id: batch.id.clone(),
            quantity,
            rate,
            amount: rate * quantity,
        });

        // Just pushed, so the cart is non-empty
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Changes quantity and rate of a line and recomputes its amount.
    ///
    /// `batch_remaining` is the current remaining stock of the line's batch;
    /// the new quantity plus other lines on the same batch must fit in it.
    pub fn update_line(
        &mut self,
        item_id: &str,
        quantity: i64,
        rate: Money,
        batch_remaining: i64,
    ) -> CoreResult<&BillItem> {
        validate_quantity(quantity)?;
        validate_price("rate", rate)?;

        let index = self
            .lines
            .iter()
            .position(|line| line.id == item_id)
            .ok_or_else(|| CoreError::LineNotFound(item_id.to_string()))?;

        let batch_id = self.lines[index].batch_id.clone();
        let others: i64 = self
            .lines
            .iter()
            .filter(|line| line.batch_id == batch_id && line.id != item_id)
            .map(|line| line.quantity)
            .sum();

        if others + quantity > batch_remaining {
            return Err(CoreError::InsufficientStock {
                batch_id,
                available: (batch_remaining - others).max(0),
                requested: quantity,
            });
        }

        let line = &mut self.lines[index];
        line.quantity = quantity;
        line.rate = rate;
        line.amount = rate * quantity;
        Ok(&*line)
    }

    /// Removes a line. Absent ids are a no-op.
    pub fn remove_line(&mut self, item_id: &str) -> Option<BillItem> {
        let index = self.lines.iter().position(|line| line.id == item_id)?;
        Some(self.lines.remove(index))
    }

    pub fn line(&self, item_id: &str) -> Option<&BillItem> {
        self.lines.iter().find(|line| line.id == item_id)
    }

    pub fn set_discount(&mut self, discount: DiscountPercent) {
        self.discount = discount;
    }

    /// Empties the cart and resets the discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = DiscountPercent::zero();
        self.created_at = Utc::now();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Units of `batch_id` across all lines.
    pub fn quantity_for_batch(&self, batch_id: &str) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.batch_id == batch_id)
            .map(|line| line.quantity)
            .sum()
    }

    /// Requested units per batch, in batch id order.
    pub fn requested_by_batch(&self) -> BTreeMap<&str, i64> {
        let mut requested = BTreeMap::new();
        for line in &self.lines {
            *requested.entry(line.batch_id.as_str()).or_insert(0) += line.quantity;
        }
        requested
    }

    /// Live totals for display at the counter.
    pub fn totals(&self, round_to_rupee: bool) -> InvoiceTotals {
        invoice::calculate_with_rounding(&self.lines, self.discount, round_to_rupee)
    }
}

/// Checks that `requested` more units fit in `batch` given `in_cart` already
/// taken by the cart.
pub fn check_stock(batch: &Batch, in_cart: i64, requested: i64) -> CoreResult<()> {
    if in_cart + requested > batch.remaining {
        return Err(CoreError::InsufficientStock {
            batch_id: batch.id.clone(),
            available: (batch.remaining - in_cart).max(0),
            requested,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductStatus;
    use crate::error::ValidationError;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Pakistani Suit (Georgette)".to_string(),
            category_id: "c2".to_string(),
            sku: "LW-004".to_string(),
            status: ProductStatus::Active,
            variants: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn batch(id: &str, product_id: &str, remaining: i64) -> Batch {
        Batch {
            id: id.to_string(),
            product_id: product_id.to_string(),
            product_name: "Pakistani Suit (Georgette)".to_string(),
            purchase_price: Money::from_major(750),
            sale_price: Money::from_major(1499),
            quantity: 60,
            remaining,
            supplier: "Mumbai Georgette Fabrics".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(),
            profit: Money::from_major(749),
        }
    }

    #[test]
    fn test_add_line_computes_amount() {
        let p = product("p4");
        let b = batch("b4", "p4", 35);
        let mut cart = Cart::new();

        let line = cart.add_line(&p, &b, 2, b.sale_price).unwrap();
        assert_eq!(line.amount, Money::from_major(2998));
        assert_eq!(line.batch_id, "b4");
        assert_eq!(cart.lines.len(), 1);
        // The batch itself is untouched
        assert_eq!(b.remaining, 35);
    }

    #[test]
    fn test_add_line_rejects_over_remaining() {
        let p = product("p4");
        let b = batch("b4", "p4", 3);
        let mut cart = Cart::new();

        let err = cart.add_line(&p, &b, 5, b.sale_price).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_line_counts_existing_lines_for_batch() {
        let p = product("p4");
        let b = batch("b4", "p4", 3);
        let mut cart = Cart::new();

        cart.add_line(&p, &b, 2, b.sale_price).unwrap();
        let err = cart.add_line(&p, &b, 2, b.sale_price).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 1, .. }
        ));
        cart.add_line(&p, &b, 1, Money::from_major(1400)).unwrap();
        assert_eq!(cart.quantity_for_batch("b4"), 3);
    }

    #[test]
    fn test_add_line_rejects_price_beyond_limit() {
        let p = product("p4");
        let b = batch("b4", "p4", 35);
        let mut cart = Cart::new();

        let huge = Money::new("50000000000000000000000000000".parse().unwrap());
        let err = cart.add_line(&p, &b, 2, huge).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_line_validates_inputs() {
        let p = product("p4");
        let b = batch("b4", "p4", 35);
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add_line(&p, &b, 0, b.sale_price),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            cart.add_line(&p, &b, 1, Money::from_major(-1)),
            Err(CoreError::Validation(_))
        ));
        let other = batch("b9", "p9", 35);
        assert!(matches!(
            cart.add_line(&p, &other, 1, other.sale_price),
            Err(CoreError::BatchProductMismatch { .. })
        ));

        let mut inactive = product("p4");
        inactive.status = ProductStatus::Inactive;
        assert!(matches!(
            cart.add_line(&inactive, &b, 1, b.sale_price),
            Err(CoreError::ProductInactive(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_line_limit() {
        let p = product("p1");
        let b = batch("b1", "p1", 1000);
        let mut cart = Cart::new();
        for _ in 0..MAX_CART_LINES {
            cart.add_line(&p, &b, 1, b.sale_price).unwrap();
        }
        assert!(matches!(
            cart.add_line(&p, &b, 1, b.sale_price),
            Err(CoreError::CartTooLarge { max: 100 })
        ));
    }

    #[test]
    fn test_update_line_revalidates_stock() {
        let p = product("p4");
        let b = batch("b4", "p4", 5);
        let mut cart = Cart::new();
        let first = cart.add_line(&p, &b, 2, b.sale_price).unwrap().id.clone();
        cart.add_line(&p, &b, 2, b.sale_price).unwrap();

        let err = cart
            .update_line(&first, 4, b.sale_price, b.remaining)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            }
        ));

        let line = cart
            .update_line(&first, 3, Money::from_major(1400), b.remaining)
            .unwrap();
        assert_eq!(line.amount, Money::from_major(4200));
    }

    #[test]
    fn test_update_unknown_line() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.update_line("missing", 1, Money::from_major(1), 10),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_remove_line() {
        let p = product("p4");
        let b = batch("b4", "p4", 35);
        let mut cart = Cart::new();
        let id = cart.add_line(&p, &b, 1, b.sale_price).unwrap().id.clone();

        assert!(cart.remove_line("missing").is_none());
        assert_eq!(cart.remove_line(&id).map(|l| l.quantity), Some(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_and_clear() {
        let p = product("p4");
        let b = batch("b4", "p4", 35);
        let mut cart = Cart::new();
        cart.add_line(&p, &b, 2, b.sale_price).unwrap();
        cart.set_discount(DiscountPercent::new(dec!(5)).unwrap());

        assert_eq!(cart.totals(false).grand_total.amount(), dec!(3360.758));

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.discount.is_zero());
    }

    #[test]
    fn test_requested_by_batch_aggregates() {
        let p = product("p4");
        let b1 = batch("b1", "p4", 35);
        let b2 = batch("b2", "p4", 35);
        let mut cart = Cart::new();
        cart.add_line(&p, &b1, 2, b1.sale_price).unwrap();
        cart.add_line(&p, &b2, 1, b2.sale_price).unwrap();
        cart.add_line(&p, &b1, 3, b1.sale_price).unwrap();

        let requested = cart.requested_by_batch();
        assert_eq!(requested.get("b1"), Some(&5));
        assert_eq!(requested.get("b2"), Some(&1));
    }
}
