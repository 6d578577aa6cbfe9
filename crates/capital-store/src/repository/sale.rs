//! # Sale Repository
//!
//! Live stock checks for the cart and the sale finalizer.
//!
//! ## Finalize Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  finalize(cart, checkout)           ── one catalog write lock ──        │
//! │                                                                         │
//! │  1. cart empty?                  → EmptyCart            (no change)     │
//! │  2. per batch: Σ requested                                              │
//! │       batch missing?             → BatchNotFound        (no change)     │
//! │       requested > remaining?     → InsufficientStock    (no change)     │
//! │  3. totals = invoice::calculate(lines, discount)                        │
//! │  4. remaining -= requested  (every batch)                               │
//! │     bill = { next INV-number, now, totals, lines }                      │
//! │     bills.push(bill)                                                    │
//! │  5. cart.clear()                                                        │
//! │  6. snapshot (if configured)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-2 only read. Nothing is mutated until every check has passed, so
//! a failed finalize leaves catalog and cart exactly as they were.
//!
//! ## Lock Order
//! Callers hold the cart mutex first, then this repository takes the catalog
//! lock. Never the other way round.

use std::sync::Arc;

use capital_core::validation::{validate_name, validate_phone};
use capital_core::{
    invoice, Bill, BillItem, Cart, CoreError, Customer, Money, PaymentMethod, ValidationError,
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::Shared;

/// How a sale is being paid and for whom.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    pub payment_method: PaymentMethod,
    pub customer: Option<Customer>,
    /// Fill `round_off` so the payable amount is a whole rupee.
    pub round_to_rupee: bool,
}

impl Checkout {
    fn validate(&self) -> Result<(), ValidationError> {
        let Some(customer) = &self.customer else {
            return Ok(());
        };
        let mut errors = Vec::new();
        if let Err(e) = validate_name("customer.name", &customer.name) {
            errors.push(e);
        }
        if let Some(phone) = &customer.phone {
            if let Err(e) = validate_phone(phone) {
                errors.push(e);
            }
        }
        ValidationError::collect(errors)
    }
}

#[derive(Debug, Clone)]
pub struct SaleRepository {
    shared: Arc<Shared>,
}

impl SaleRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        SaleRepository { shared }
    }

    // =========================================================================
    // Cart Builder (against live stock)
    // =========================================================================

    /// Adds a line for `batch_id` to `cart`, checked against the batch's
    /// current remaining stock. `rate` defaults to the batch sale price.
    pub async fn add_to_cart(
        &self,
        cart: &mut Cart,
        product_id: &str,
        batch_id: &str,
        quantity: i64,
        rate: Option<Money>,
    ) -> StoreResult<BillItem> {
        let catalog = self.shared.catalog.read().await;
        let product = catalog
            .product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;
        let batch = catalog
            .batch(batch_id)
            .ok_or_else(|| CoreError::BatchNotFound(batch_id.to_string()))?;

        let line = cart
            .add_line(product, batch, quantity, rate.unwrap_or(batch.sale_price))?
            .clone();

        debug!(
            batch_id = %batch_id,
            quantity = quantity,
            rate = %line.rate,
            "Cart line added"
        );
        Ok(line)
    }

    /// Changes quantity (and optionally rate) of a cart line, re-checking the
    /// batch's current remaining stock.
    pub async fn update_cart_line(
        &self,
        cart: &mut Cart,
        item_id: &str,
        quantity: i64,
        rate: Option<Money>,
    ) -> StoreResult<BillItem> {
        let (batch_id, current_rate) = cart
            .line(item_id)
            .map(|l| (l.batch_id.clone(), l.rate))
            .ok_or_else(|| CoreError::LineNotFound(item_id.to_string()))?;

        let catalog = self.shared.catalog.read().await;
        let batch = catalog
            .batch(&batch_id)
            .ok_or_else(|| CoreError::BatchNotFound(batch_id.clone()))?;

        let line = cart
            .update_line(
                item_id,
                quantity,
                rate.unwrap_or(current_rate),
                batch.remaining,
            )?
            .clone();

        debug!(item_id = %item_id, quantity = quantity, "Cart line updated");
        Ok(line)
    }

    // =========================================================================
    // Sale Finalizer
    // =========================================================================

    /// Commits `cart` as a bill and decrements stock, all or nothing.
    pub async fn finalize(&self, cart: &mut Cart, checkout: Checkout) -> StoreResult<Bill> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        checkout.validate()?;

        let mut catalog = self.shared.catalog.write().await;

        // Check everything before touching anything
        let requested = cart.requested_by_batch();
        for (&batch_id, &quantity) in &requested {
            let batch = catalog
                .batch(batch_id)
                .ok_or_else(|| CoreError::BatchNotFound(batch_id.to_string()))?;
            if quantity > batch.remaining {
                warn!(
                    batch_id = %batch_id,
                    available = batch.remaining,
                    requested = quantity,
                    "Finalize aborted: insufficient stock"
                );
                return Err(CoreError::InsufficientStock {
                    batch_id: batch_id.to_string(),
                    available: batch.remaining,
                    requested: quantity,
                }
                .into());
            }
        }

        let totals =
            invoice::calculate_with_rounding(&cart.lines, cart.discount, checkout.round_to_rupee);

        for (&batch_id, &quantity) in &requested {
            if let Some(batch) = catalog.batch_mut(batch_id) {
                batch.remaining -= quantity;
                debug!(batch_id = %batch_id, remaining = batch.remaining, "Stock decremented");
            }
        }

        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            bill_number: catalog.next_bill_number(),
            items: cart.lines.clone(),
            subtotal: totals.subtotal,
            discount: cart.discount,
            discount_amount: totals.discount_amount,
            tax: totals.tax,
            round_off: totals.round_off,
            grand_total: totals.grand_total,
            payment_method: checkout.payment_method,
            customer: checkout.customer,
            date: Utc::now(),
        };
        catalog.bills.push(bill.clone());
        cart.clear();

        info!(
            bill_number = %bill.bill_number,
            items = bill.items.len(),
            total = %bill.grand_total,
            payment = %bill.payment_method,
            "Sale finalized"
        );

        self.shared.persist(&catalog).await;
        Ok(bill)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
