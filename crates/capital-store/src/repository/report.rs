//! # Report Repository
//!
//! Takes one read lock, copies nothing it does not need, and hands the
//! slices to the pure aggregators in `capital_core::report`.

use std::sync::Arc;

use capital_core::report::{self, BatchReportRow, DashboardStats, ProductProfit, SalesSummary};
use capital_core::{Batch, DateRange, Money};
use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::Shared;

#[derive(Debug, Clone)]
pub struct ReportRepository {
    shared: Arc<Shared>,
}

impl ReportRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        ReportRepository { shared }
    }

    /// Dashboard figures with `today` as the reporting day.
    pub async fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let catalog = self.shared.catalog.read().await;
        let stats = report::dashboard_stats(&catalog.bills, &catalog.batches, today);
        debug!(
            bills_today = stats.bills_today,
            margin = %stats.profit_margin,
            "Dashboard computed"
        );
        stats
    }

    /// Dashboard for the current UTC day.
    pub async fn dashboard_today(&self) -> DashboardStats {
        self.dashboard(Utc::now().date_naive()).await
    }

    pub async fn sales_summary(&self, range: DateRange) -> SalesSummary {
        let catalog = self.shared.catalog.read().await;
        report::sales_summary(&catalog.bills, &catalog.batches, range)
    }

    pub async fn profit_by_product(&self) -> Vec<ProductProfit> {
        let catalog = self.shared.catalog.read().await;
        report::profit_by_product(&catalog.bills, &catalog.batches)
    }

    pub async fn batch_report(&self) -> Vec<BatchReportRow> {
        report::batch_report(&self.shared.catalog.read().await.batches)
    }

    pub async fn low_stock(&self) -> Vec<Batch> {
        self.shared
            .catalog
            .read()
            .await
            .batches
            .iter()
            .filter(|b| report::is_low_stock(b))
            .cloned()
            .collect()
    }

    /// Live profit of one finalized bill.
    pub async fn bill_profit(&self, bill_id: &str) -> StoreResult<Money> {
        let catalog = self.shared.catalog.read().await;
        let bill = catalog
            .bill(bill_id)
            .ok_or_else(|| StoreError::not_found("Bill", bill_id))?;
        Ok(report::bill_profit(bill, &catalog.batches))
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::store_with_batch;
    use crate::{Checkout, Store, StoreConfig};
    use capital_core::{BatchUpdate, Cart, DateRange, Money, StockStatus};
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_reports_after_sale_and_price_edit() {
        let (store, product_id, batch_id) = store_with_batch(20).await;
        let mut cart = Cart::new();
        store
            .sales()
            .add_to_cart(&mut cart, &product_id, &batch_id, 2, None)
            .await
            .unwrap();
        let bill = store
            .sales()
            .finalize(&mut cart, Checkout::default())
            .await
            .unwrap();

        let reports = store.reports();
        assert_eq!(
            reports.bill_profit(&bill.id).await.unwrap(),
            Money::from_major(1498)
        );

        let stats = reports.dashboard_today().await;
        assert_eq!(stats.bills_today, 1);
        assert_eq!(stats.total_sales.amount(), dec!(3537.64));
        assert_eq!(stats.active_batches, 1);

        // Purchase price corrected: live profit moves, batch profit does not
        store
            .batches()
            .update(
                &batch_id,
                BatchUpdate {
                    purchase_price: Some(Money::from_major(900)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            reports.bill_profit(&bill.id).await.unwrap(),
            Money::from_major(1198)
        );
        let rows = reports.batch_report().await;
        assert_eq!(rows[0].realized_profit, Money::from_major(1498));
        assert_eq!(rows[0].sold, 2);
        assert_eq!(rows[0].stock_status, StockStatus::Safe);

        let by_product = reports.profit_by_product().await;
        assert_eq!(by_product[0].units_sold, 2);
        assert_eq!(by_product[0].profit, Money::from_major(1198));
    }

    #[tokio::test]
    async fn test_sales_summary_range() {
        let (store, product_id, batch_id) = store_with_batch(20).await;
        let mut cart = Cart::new();
        store
            .sales()
            .add_to_cart(&mut cart, &product_id, &batch_id, 1, None)
            .await
            .unwrap();
        store
            .sales()
            .finalize(&mut cart, Checkout::default())
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let summary = store
            .reports()
            .sales_summary(DateRange::new(Some(today), Some(today)))
            .await;
        assert_eq!(summary.bill_count, 1);
        assert_eq!(summary.tax_collected.amount(), dec!(269.82));

        let yesterday = today - Duration::days(1);
        let empty = store
            .reports()
            .sales_summary(DateRange::new(None, Some(yesterday)))
            .await;
        assert_eq!(empty.bill_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_bill_profit() {
        let store = Store::in_memory();
        assert!(store.reports().bill_profit("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_seeded_low_stock() {
        let store = Store::open(StoreConfig::new().seed_demo(true)).await.unwrap();
        let low: Vec<String> = store
            .reports()
            .low_stock()
            .await
            .into_iter()
            .map(|b| b.product_name)
            .collect();
        // BTH-003 (8 left), BTH-005 (6 left), BTH-008 (5 left)
        assert_eq!(low.len(), 3);
        assert!(low.contains(&"Silk Kids Sherwani".to_string()));
    }
}
