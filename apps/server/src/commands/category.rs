//! # Category Commands

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use capital_core::{Category, CategoryDraft};
use tracing::debug;

use super::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.store.categories().list().await)
}

pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<CategoryDraft>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    debug!(name = %draft.name, "create_category command");
    let category = state.store.categories().create(draft).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Renames a category. Products refer to it by id, so they follow.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<CategoryDraft>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.store.categories().update(&id, draft).await?))
}

/// Fails with 409 while any product still uses the category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.categories().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
