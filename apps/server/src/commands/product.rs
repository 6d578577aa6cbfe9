//! # Product Commands
//!
//! ## Billing Screen Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Staff types "kurta"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /api/products?search=kurta&status=active                           │
//! │       │                                                                 │
//! │       ▼  picks "White Cotton Kurta Pajama"                              │
//! │  GET /api/products/{id}/batches?available=true                          │
//! │       │                                                                 │
//! │       ▼  picks a batch                                                  │
//! │  POST /api/cart/lines                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use capital_core::{Batch, Product, ProductDraft, ProductStatus, ProductStock, ProductUpdate};
use capital_store::ProductFilter;
use serde::Deserialize;
use tracing::debug;

use super::{ApiJson, ApiQuery};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub status: Option<ProductStatus>,
    pub search: Option<String>,
}

impl From<ProductQuery> for ProductFilter {
    fn from(q: ProductQuery) -> Self {
        ProductFilter {
            category_id: q.category_id,
            status: q.status,
            search: q.search,
        }
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Json<Vec<Product>> {
    debug!(search = ?query.search, "list_products command");
    Json(state.store.products().list(&query.into()).await)
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.store.products().get(&id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    debug!(sku = %draft.sku, "create_product command");
    let product = state.store.products().create(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.store.products().update(&id, update).await?))
}

/// Products are never deleted; deactivating hides them from billing.
pub async fn toggle_product_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.store.products().toggle_status(&id).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    /// Only batches with stock left.
    #[serde(default)]
    pub available: bool,
}

pub async fn product_batches(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<BatchQuery>,
) -> Result<Json<Vec<Batch>>, ApiError> {
    let batches = state
        .store
        .batches()
        .list_for_product(&id, query.available)
        .await?;
    Ok(Json(batches))
}

pub async fn product_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductStock>, ApiError> {
    Ok(Json(state.store.products().stock(&id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::commands::test_support::{demo_app, send};

    #[tokio::test]
    async fn test_search_and_batches() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = demo_app(dir.path()).await;

        let (status, found) = send(&app, Method::GET, "/api/products?search=KURTA", None).await;
        assert_eq!(status, StatusCode::OK);
        // White Cotton Kurta Pajama, Cotton Kids Kurta Set
        assert_eq!(found.as_array().unwrap().len(), 2);

        let id = found[0]["id"].as_str().unwrap().to_string();
        let (status, batches) = send(
            &app,
            Method::GET,
            &format!("/api/products/{}/batches?available=true", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(batches.as_array().unwrap().len(), 1);
        assert!(batches[0]["remaining"].as_i64().unwrap() > 0);

        let (status, _) = send(&app, Method::GET, "/api/products/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_toggle_and_inactive_filter() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = demo_app(dir.path()).await;
        let category_id = state.store.categories().list().await[0].id.clone();

        let (status, product) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(json!({
                "name": "Chikankari Kurta",
                "categoryId": category_id,
                "sku": "MW-010",
                "variants": [{ "size": "L", "color": "White" }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product["status"], "active");
        let id = product["id"].as_str().unwrap().to_string();

        let (status, toggled) = send(
            &app,
            Method::POST,
            &format!("/api/products/{}/toggle-status", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["status"], "inactive");

        let (_, inactive) =
            send(&app, Method::GET, "/api/products?status=inactive", None).await;
        assert_eq!(inactive.as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(json!({ "name": "Copy", "categoryId": category_id, "sku": "mw-010" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }
}
