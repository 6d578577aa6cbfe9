//! # Cart State
//!
//! The counter's in-progress cart. One per running server.
//!
//! ## Thread Safety
//! The cart sits behind a `tokio::sync::Mutex` because:
//! 1. Several requests may touch it at once
//! 2. Add / update must check stock and write the line without interleaving
//! 3. Checkout holds it across the catalog write lock
//!
//! Lock order is always cart → catalog.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Client Action            Endpoint                    Cart Change       │
//! │  ─────────────            ────────                    ───────────       │
//! │  Pick batch ─────────────► POST /api/cart/lines ─────► lines.push       │
//! │  Change qty / rate ──────► PUT  /api/cart/lines/{id} ► line updated     │
//! │  Remove ─────────────────► DELETE /api/cart/lines/{id}► line removed    │
//! │  Discount ───────────────► PUT  /api/cart/discount ──► discount set     │
//! │  Clear ──────────────────► DELETE /api/cart ─────────► cleared          │
//! │  Checkout ───────────────► POST /api/cart/checkout ──► bill, cleared    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use capital_core::{BillItem, Cart, DiscountPercent, InvoiceTotals};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

/// Cart contents plus live totals, as returned by every cart endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<BillItem>,
    pub discount: DiscountPercent,
    pub totals: InvoiceTotals,
    pub created_at: DateTime<Utc>,
}

impl CartView {
    pub fn new(cart: &Cart, round_to_rupee: bool) -> Self {
        CartView {
            lines: cart.lines.clone(),
            discount: cart.discount,
            totals: cart.totals(round_to_rupee),
            created_at: cart.created_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct CartState {
    cart: Mutex<Cart>,
}

impl CartState {
    pub fn new() -> Self {
        CartState {
            cart: Mutex::new(Cart::new()),
        }
    }

    /// Exclusive access for the duration of one request.
    pub async fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().await
    }

    pub async fn view(&self, round_to_rupee: bool) -> CartView {
        CartView::new(&*self.cart.lock().await, round_to_rupee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_view_reflects_discount() {
        let state = CartState::new();
        state
            .lock()
            .await
            .set_discount(DiscountPercent::new(dec!(5)).unwrap());

        let view = state.view(false).await;
        assert!(view.lines.is_empty());
        assert_eq!(view.discount.value(), dec!(5));
        assert!(view.totals.grand_total.is_zero());
    }
}
