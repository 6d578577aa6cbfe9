//! # Sale Commands
//!
//! Checkout, bill history, invoice documents and sharing.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/cart/checkout { paymentMethod, customer? }                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock cart ──► store.sales().finalize(cart, checkout)                   │
//! │       │            ├── Err → cart and stock unchanged, error returned   │
//! │       │            └── Ok(bill) → stock decremented, cart cleared       │
//! │       ▼                                                                 │
//! │  exports[bill.id] = Pending ──► spawn export (never retried)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 { bill, export: { status: "pending" } }                            │
//! │                                                                         │
//! │  GET  /api/bills/{id}/export ──► pending | ready{url} | failed{reason}  │
//! │  POST /api/bills/{id}/share  ──► wa.me link (409 while pending)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use capital_core::receipt::render_invoice_text;
use capital_core::{Bill, Customer, DateRange, PaymentMethod};
use capital_store::Checkout;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{ApiJson, ApiQuery};
use crate::error::ApiError;
use crate::export::spawn_export;
use crate::state::{AppState, ExportStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub customer: Option<CustomerInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub bill: Bill,
    pub export: ExportStatus,
}

/// Finalizes the counter cart into a bill.
pub async fn checkout(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let checkout = Checkout {
        payment_method: req.payment_method,
        customer: req.customer.map(|c| Customer {
            id: Uuid::new_v4().to_string(),
            name: c.name.trim().to_string(),
            phone: c.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
        }),
        round_to_rupee: state.round_to_rupee(),
    };

    let bill = {
        let mut cart = state.cart.lock().await;
        state.store.sales().finalize(&mut cart, checkout).await?
    };

    state.exports.set(&bill.id, ExportStatus::Pending).await;
    spawn_export(state.exporter.clone(), state.exports.clone(), bill.clone());

    info!(bill_number = %bill.bill_number, "checkout command completed");
    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            bill,
            export: ExportStatus::Pending,
        }),
    ))
}

/// Bills newest first, optionally within `?from=YYYY-MM-DD&to=YYYY-MM-DD`.
pub async fn list_bills(
    State(state): State<AppState>,
    ApiQuery(range): ApiQuery<DateRange>,
) -> Json<Vec<Bill>> {
    Json(state.store.bills().list(range).await)
}

/// Accepts a bill id or a bill number (`INV-000001`).
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bill>, ApiError> {
    Ok(Json(find_bill(&state, &id).await?))
}

async fn find_bill(state: &AppState, id: &str) -> Result<Bill, ApiError> {
    let bills = state.store.bills();
    match bills.get(id).await {
        Ok(bill) => Ok(bill),
        Err(_) => Ok(bills.get_by_number(id).await?),
    }
}

/// Printable plain-text invoice.
pub async fn bill_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let bill = find_bill(&state, &id).await?;
    Ok(render_invoice_text(&bill, &state.config.store_header()))
}

pub async fn export_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExportStatus>, ApiError> {
    let bill = find_bill(&state, &id).await?;
    state
        .exports
        .get(&bill.id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Export", &bill.bill_number))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// Overrides the customer's phone on the bill.
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub link: String,
    pub document_url: Option<String>,
}

/// Composes the share link. A finished export adds the download link; a
/// failed or missing one is shared without it.
pub async fn share_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<ShareRequest>,
) -> Result<Json<ShareResponse>, ApiError> {
    let bill = find_bill(&state, &id).await?;

    let document_url = match state.exports.get(&bill.id).await {
        Some(ExportStatus::Pending) => {
            return Err(ApiError::conflict(format!(
                "Document for {} is still being exported",
                bill.bill_number
            )))
        }
        Some(status) => status.url().map(str::to_string),
        None => None,
    };

    let contact = req
        .phone
        .or_else(|| bill.customer.as_ref().and_then(|c| c.phone.clone()));
    let link = state
        .notifier
        .dispatch(&bill, contact.as_deref(), document_url.as_deref())
        .await?;

    debug!(bill_number = %bill.bill_number, "share_bill command");
    Ok(Json(ShareResponse { link, document_url }))
}
