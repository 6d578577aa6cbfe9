//! # Report Commands
//!
//! Read-only views over bills and batches.
//!
//! Two profit figures exist side by side:
//! - batch report: profit per unit frozen when the batch was received
//! - everything else: sale rate minus the batch's current purchase price

use axum::extract::{Path, State};
use axum::Json;
use capital_core::report::{BatchReportRow, DashboardStats, ProductProfit, SalesSummary};
use capital_core::{Batch, DateRange, Money};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ApiQuery;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Reporting day; defaults to today (UTC).
    pub date: Option<NaiveDate>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Json<DashboardStats> {
    let reports = state.store.reports();
    let stats = match query.date {
        Some(day) => reports.dashboard(day).await,
        None => reports.dashboard_today().await,
    };
    Json(stats)
}

pub async fn sales_summary(
    State(state): State<AppState>,
    ApiQuery(range): ApiQuery<DateRange>,
) -> Json<SalesSummary> {
    Json(state.store.reports().sales_summary(range).await)
}

pub async fn profit_by_product(State(state): State<AppState>) -> Json<Vec<ProductProfit>> {
    Json(state.store.reports().profit_by_product().await)
}

pub async fn batch_report(State(state): State<AppState>) -> Json<Vec<BatchReportRow>> {
    Json(state.store.reports().batch_report().await)
}

pub async fn low_stock(State(state): State<AppState>) -> Json<Vec<Batch>> {
    Json(state.store.reports().low_stock().await)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillProfit {
    pub bill_id: String,
    pub profit: Money,
}

pub async fn bill_profit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BillProfit>, ApiError> {
    let profit = state.store.reports().bill_profit(&id).await?;
    Ok(Json(BillProfit { bill_id: id, profit }))
}
