//! # HTTP Commands Module
//!
//! Every endpoint of the billing API.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (router, shared extractors)
//! ├── category.rs  ◄─── Category CRUD
//! ├── product.rs   ◄─── Product management, product batches
//! ├── batch.rs     ◄─── Batch management
//! ├── cart.rs      ◄─── Cart builder
//! ├── sale.rs      ◄─── Checkout, bill history, export status, share
//! └── report.rs    ◄─── Dashboard and reports
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/cart/lines  { "productId": "..", "batchId": "..", ... }      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn add_line(                                                     │
//! │      State(state): State<AppState>,   ◄── store, cart, config           │
//! │      ApiJson(req): ApiJson<AddLine>,  ◄── bad JSON → 400 ApiError       │
//! │  ) -> Result<Json<CartView>, ApiError>                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  200 { "lines": [...], "totals": {...} }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod batch;
pub mod cart;
pub mod category;
pub mod product;
pub mod report;
pub mod sale;

use axum::extract::{FromRequest, FromRequestParts};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// JSON body whose rejection is reported as an [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string whose rejection is reported as an [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "capital-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// All routes, without state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Categories
        .route(
            "/api/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/categories/{id}",
            put(category::update_category).delete(category::delete_category),
        )
        // Products
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/products/{id}",
            get(product::get_product).put(product::update_product),
        )
        .route(
            "/api/products/{id}/toggle-status",
            post(product::toggle_product_status),
        )
        .route("/api/products/{id}/batches", get(product::product_batches))
        .route("/api/products/{id}/stock", get(product::product_stock))
        // Batches
        .route(
            "/api/batches",
            get(batch::list_batches).post(batch::create_batch),
        )
        .route(
            "/api/batches/{id}",
            get(batch::get_batch)
                .put(batch::update_batch)
                .delete(batch::delete_batch),
        )
        // Cart
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/lines", post(cart::add_line))
        .route(
            "/api/cart/lines/{id}",
            put(cart::update_line).delete(cart::remove_line),
        )
        .route("/api/cart/discount", put(cart::set_discount))
        .route("/api/cart/checkout", post(sale::checkout))
        // Bills
        .route("/api/bills", get(sale::list_bills))
        .route("/api/bills/{id}", get(sale::get_bill))
        .route("/api/bills/{id}/invoice", get(sale::bill_invoice))
        .route("/api/bills/{id}/export", get(sale::export_status))
        .route("/api/bills/{id}/share", post(sale::share_bill))
        .route("/api/bills/{id}/profit", get(report::bill_profit))
        // Reports
        .route("/api/reports/dashboard", get(report::dashboard))
        .route("/api/reports/sales", get(report::sales_summary))
        .route("/api/reports/products", get(report::profit_by_product))
        .route("/api/reports/batches", get(report::batch_report))
        .route("/api/reports/low-stock", get(report::low_stock))
}
