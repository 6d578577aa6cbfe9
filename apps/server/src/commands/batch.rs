//! # Batch Commands
//!
//! Receiving stock and correcting batch records. `remaining` is never set
//! directly: it starts at `quantity` and only checkout lowers it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use capital_core::{Batch, BatchDraft, BatchUpdate};
use tracing::debug;

use super::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_batches(State(state): State<AppState>) -> Json<Vec<Batch>> {
    Json(state.store.batches().list().await)
}

pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Batch>, ApiError> {
    Ok(Json(state.store.batches().get(&id).await?))
}

pub async fn create_batch(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<BatchDraft>,
) -> Result<(StatusCode, Json<Batch>), ApiError> {
    debug!(product_id = %draft.product_id, quantity = draft.quantity, "create_batch command");
    let batch = state.store.batches().create(draft).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

pub async fn update_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<BatchUpdate>,
) -> Result<Json<Batch>, ApiError> {
    Ok(Json(state.store.batches().update(&id, update).await?))
}

pub async fn delete_batch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.batches().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::commands::test_support::{demo_app, send};

    #[tokio::test]
    async fn test_receive_and_edit_batch() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = demo_app(dir.path()).await;
        let product = state.store.products().get_by_sku("LW-002").await.unwrap();

        let (status, batch) = send(
            &app,
            Method::POST,
            "/api/batches",
            Some(json!({
                "productId": product.id,
                "purchasePrice": 480,
                "salePrice": 899,
                "quantity": 40,
                "supplier": "Delhi Rayon Textiles",
                "date": "2025-11-02"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(batch["remaining"], 40);
        assert_eq!(batch["profit"].as_f64().unwrap(), 419.0);
        assert_eq!(batch["productName"], "Rayon Anarkali Suit");
        let id = batch["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/batches/{}", id),
            Some(json!({ "salePrice": 949 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["salePrice"].as_f64().unwrap(), 949.0);
        // Frozen at creation
        assert_eq!(updated["profit"].as_f64().unwrap(), 419.0);

        // Stock counts are not editable
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/batches/{}", id),
            Some(json!({ "quantity": 400 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let (_, unchanged) = send(&app, Method::GET, &format!("/api/batches/{}", id), None).await;
        assert_eq!(unchanged["quantity"], 40);
        assert_eq!(unchanged["remaining"], 40);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/batches/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &format!("/api/batches/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_batch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = demo_app(dir.path()).await;
        let product = state.store.products().get_by_sku("LW-002").await.unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/batches",
            Some(json!({
                "productId": product.id,
                "purchasePrice": -5,
                "salePrice": 899,
                "quantity": 0,
                "supplier": ""
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/batches",
            Some(json!({
                "productId": "missing",
                "purchasePrice": 1,
                "salePrice": 2,
                "quantity": 1,
                "supplier": "S"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/batches",
            Some(json!({
                "productId": product.id,
                "purchasePrice": 480,
                "salePrice": 5e28,
                "quantity": 10,
                "supplier": "S"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
