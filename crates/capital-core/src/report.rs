//! # Reporting Aggregator
//!
//! Read-only derivations over bill history and batch data.
//!
//! ## Two Profit Figures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LIVE (per bill)                     STATIC (per batch)                 │
//! │  ─────────────────                   ──────────────────                 │
//! │  Σ (item.rate − batch.purchase)      batch.profit × sold                │
//! │        × item.quantity                                                  │
//! │                                                                         │
//! │  uses the CURRENT purchase price     uses the margin frozen when the    │
//! │  and the actual selling rate         batch was received                 │
//! │                                                                         │
//! │  → dashboard margin, sales summary   → batch report                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two agree until someone edits a batch price or sells below/above the
//! list price. Both are reported as-is.
//!
//! Nothing here is cached: every figure is recomputed from its inputs.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Batch, Bill, StockStatus};
use crate::LOW_STOCK_THRESHOLD;

/// Batch lookup by id.
type BatchIndex<'a> = HashMap<&'a str, &'a Batch>;

fn index(batches: &[Batch]) -> BatchIndex<'_> {
    batches.iter().map(|b| (b.id.as_str(), b)).collect()
}

// =============================================================================
// Per-Bill / Per-Batch Figures
// =============================================================================

/// Live profit of one bill against current batch purchase prices.
///
/// Items whose batch no longer exists contribute nothing.
pub fn bill_profit(bill: &Bill, batches: &[Batch]) -> Money {
    profit_with_index(bill, &index(batches))
}

fn profit_with_index(bill: &Bill, batches: &BatchIndex<'_>) -> Money {
    bill.items
        .iter()
        .filter_map(|item| {
            let batch = batches.get(item.batch_id.as_str())?;
            Some((item.rate - batch.purchase_price) * item.quantity)
        })
        .sum()
}

/// Realized profit of a batch using its frozen per-unit margin.
#[inline]
pub fn batch_realized_profit(batch: &Batch) -> Money {
    batch.profit * batch.sold()
}

/// `remaining ≤ 10`
#[inline]
pub fn is_low_stock(batch: &Batch) -> bool {
    batch.remaining <= LOW_STOCK_THRESHOLD
}

/// Stock health by remaining share: `> 50%` safe, `> 20%` medium, else danger.
pub fn stock_status(batch: &Batch) -> StockStatus {
    if batch.quantity <= 0 {
        return StockStatus::Danger;
    }
    // remaining/quantity > 1/2  ⇔  2·remaining > quantity; i128 so snapshot
    // data outside the validated range cannot overflow
    let remaining = i128::from(batch.remaining);
    let quantity = i128::from(batch.quantity);
    if remaining * 2 > quantity {
        StockStatus::Safe
    } else if remaining * 5 > quantity {
        StockStatus::Medium
    } else {
        StockStatus::Danger
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub bills_today: usize,
    pub sales_today: Money,
    pub total_sales: Money,
    pub total_profit: Money,
    /// Batches with stock left.
    pub active_batches: usize,
    /// Percent, two decimals. Zero when there is no revenue.
    #[ts(type = "number")]
    pub profit_margin: Decimal,
    pub low_stock_batches: Vec<Batch>,
}

/// Builds the dashboard for `today` (UTC calendar day).
pub fn dashboard_stats(bills: &[Bill], batches: &[Batch], today: NaiveDate) -> DashboardStats {
    let idx = index(batches);

    let todays: Vec<&Bill> = bills.iter().filter(|b| b.day() == today).collect();
    let total_sales: Money = bills.iter().map(|b| b.grand_total).sum();
    let total_profit: Money = bills.iter().map(|b| profit_with_index(b, &idx)).sum();

    DashboardStats {
        bills_today: todays.len(),
        sales_today: todays.iter().map(|b| b.grand_total).sum(),
        total_sales,
        total_profit,
        active_batches: batches.iter().filter(|b| b.is_available()).count(),
        profit_margin: margin(total_profit, total_sales),
        low_stock_batches: batches.iter().filter(|b| is_low_stock(b)).cloned().collect(),
    }
}

fn margin(profit: Money, revenue: Money) -> Decimal {
    if revenue.is_zero() {
        return Decimal::ZERO;
    }
    (profit.amount() / revenue.amount() * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Inclusive calendar-day range; an open end is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateRange {
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub range: DateRange,
    pub bill_count: usize,
    /// Σ grand total.
    pub revenue: Money,
    pub tax_collected: Money,
    pub discount_given: Money,
    pub average_bill_value: Money,
    /// Live profit.
    pub total_profit: Money,
}

pub fn sales_summary(bills: &[Bill], batches: &[Batch], range: DateRange) -> SalesSummary {
    let idx = index(batches);
    let in_range: Vec<&Bill> = bills.iter().filter(|b| range.contains(b.day())).collect();

    let revenue: Money = in_range.iter().map(|b| b.grand_total).sum();
    let average_bill_value = if in_range.is_empty() {
        Money::zero()
    } else {
        Money::new(revenue.amount() / Decimal::from(in_range.len()))
    };

    SalesSummary {
        range,
        bill_count: in_range.len(),
        revenue,
        tax_collected: in_range.iter().map(|b| b.tax).sum(),
        discount_given: in_range.iter().map(|b| b.discount_amount).sum(),
        average_bill_value,
        total_profit: in_range.iter().map(|b| profit_with_index(b, &idx)).sum(),
    }
}

// =============================================================================
// Product / Batch Breakdowns
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductProfit {
    pub product_id: String,
    pub product_name: String,
    pub units_sold: i64,
    /// Σ line amounts, before discount and tax.
    pub revenue: Money,
    /// Live profit; lines whose batch is gone are excluded.
    pub profit: Money,
}

/// Live profit per product across all bills, highest profit first.
pub fn profit_by_product(bills: &[Bill], batches: &[Batch]) -> Vec<ProductProfit> {
    let idx = index(batches);
    let mut by_product: BTreeMap<&str, ProductProfit> = BTreeMap::new();

    for item in bills.iter().flat_map(|b| b.items.iter()) {
        let entry = by_product
            .entry(item.product_id.as_str())
            .or_insert_with(|| ProductProfit {
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                units_sold: 0,
                revenue: Money::zero(),
                profit: Money::zero(),
            });
        entry.units_sold += item.quantity;
        entry.revenue += item.amount;
        if let Some(batch) = idx.get(item.batch_id.as_str()) {
            entry.profit += (item.rate - batch.purchase_price) * item.quantity;
        }
    }

    let mut rows: Vec<ProductProfit> = by_product.into_values().collect();
    rows.sort_by(|a, b| b.profit.cmp(&a.profit));
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportRow {
    pub batch_id: String,
    pub product_id: String,
    pub product_name: String,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub quantity: i64,
    pub sold: i64,
    pub remaining: i64,
    /// Static profit; negative means a loss.
    pub realized_profit: Money,
    pub stock_status: StockStatus,
    pub low_stock: bool,
    pub supplier: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
}

pub fn batch_report(batches: &[Batch]) -> Vec<BatchReportRow> {
    batches
        .iter()
        .map(|b| BatchReportRow {
            batch_id: b.id.clone(),
            product_id: b.product_id.clone(),
            product_name: b.product_name.clone(),
            purchase_price: b.purchase_price,
            sale_price: b.sale_price,
            quantity: b.quantity,
            sold: b.sold(),
            remaining: b.remaining,
            realized_profit: batch_realized_profit(b),
            stock_status: stock_status(b),
            low_stock: is_low_stock(b),
            supplier: b.supplier.clone(),
            date: b.date,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product_id: String,
    pub total_batches: usize,
    pub total_remaining: i64,
}

pub fn product_stock(product_id: &str, batches: &[Batch]) -> ProductStock {
    let own = batches.iter().filter(|b| b.product_id == product_id);
    let (total_batches, total_remaining) =
        own.fold((0, 0), |(n, rem), b| (n + 1, rem + b.remaining));

    ProductStock {
        product_id: product_id.to_string(),
        total_batches,
        total_remaining,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
