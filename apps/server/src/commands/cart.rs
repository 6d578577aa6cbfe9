//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│   Bill   │        │
//! │  │  Cart    │     │          │     │          │     │          │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │                        │                 │                              │
//! │                   add_line          checkout (sale.rs)                  │
//! │                   update_line                                           │
//! │                   remove_line                                           │
//! │                   set_discount                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole cart with fresh totals.

use axum::extract::{Path, State};
use axum::Json;
use capital_core::{DiscountPercent, Money};
use serde::Deserialize;
use tracing::debug;

use super::ApiJson;
use crate::error::ApiError;
use crate::state::{AppState, CartView};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLine {
    pub product_id: String,
    pub batch_id: String,
    #[serde(default = "one")]
    pub quantity: i64,
    /// Overrides the batch sale price.
    #[serde(default)]
    pub rate: Option<Money>,
}

fn one() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLine {
    pub quantity: i64,
    #[serde(default)]
    pub rate: Option<Money>,
}

#[derive(Debug, Deserialize)]
pub struct SetDiscount {
    /// Percent, 0 to 100.
    pub discount: DiscountPercent,
}

pub async fn get_cart(State(state): State<AppState>) -> Json<CartView> {
    Json(state.cart.view(state.round_to_rupee()).await)
}

/// Adds a line for one batch, checked against its remaining stock
/// (including what the cart already holds from that batch).
pub async fn add_line(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddLine>,
) -> Result<Json<CartView>, ApiError> {
    debug!(batch_id = %req.batch_id, quantity = req.quantity, "add_line command");

    let mut cart = state.cart.lock().await;
    state
        .store
        .sales()
        .add_to_cart(&mut cart, &req.product_id, &req.batch_id, req.quantity, req.rate)
        .await?;
    Ok(Json(CartView::new(&cart, state.round_to_rupee())))
}

pub async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateLine>,
) -> Result<Json<CartView>, ApiError> {
    let mut cart = state.cart.lock().await;
    state
        .store
        .sales()
        .update_cart_line(&mut cart, &id, req.quantity, req.rate)
        .await?;
    Ok(Json(CartView::new(&cart, state.round_to_rupee())))
}

/// Removing a line that is not there is a no-op.
pub async fn remove_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<CartView> {
    let mut cart = state.cart.lock().await;
    if cart.remove_line(&id).is_none() {
        debug!(item_id = %id, "remove_line: no such line");
    }
    Json(CartView::new(&cart, state.round_to_rupee()))
}

pub async fn set_discount(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SetDiscount>,
) -> Json<CartView> {
    let mut cart = state.cart.lock().await;
    cart.set_discount(req.discount);
    Json(CartView::new(&cart, state.round_to_rupee()))
}

pub async fn clear_cart(State(state): State<AppState>) -> Json<CartView> {
    let mut cart = state.cart.lock().await;
    cart.clear();
    Json(CartView::new(&cart, state.round_to_rupee()))
}
