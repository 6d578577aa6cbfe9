//! # Batch Repository
//!
//! Stock lots. `quantity` is fixed when the batch is received and
//! `remaining` is only ever decreased by the sale finalizer; edits here can
//! change prices, supplier and date.
//!
//! ```text
//! create   quantity 60, remaining 60
//! sales    quantity 60, remaining 35   (25 sold)
//! update   prices / supplier / date    (quantity, remaining untouched)
//! ```

use std::sync::Arc;

use capital_core::report;
use capital_core::{Batch, BatchDraft, BatchUpdate, CoreError};
use chrono::Utc;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Shared;

#[derive(Debug, Clone)]
pub struct BatchRepository {
    shared: Arc<Shared>,
}

impl BatchRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        BatchRepository { shared }
    }

    pub async fn list(&self) -> Vec<Batch> {
        self.shared.catalog.read().await.batches.clone()
    }

    pub async fn get(&self, id: &str) -> StoreResult<Batch> {
        self.shared
            .catalog
            .read()
            .await
            .batch(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Batch", id))
    }

    /// Batches of one product; with `available_only`, only those with stock
    /// left (what the billing screen offers).
    pub async fn list_for_product(
        &self,
        product_id: &str,
        available_only: bool,
    ) -> StoreResult<Vec<Batch>> {
        let catalog = self.shared.catalog.read().await;
        if catalog.product(product_id).is_none() {
            return Err(StoreError::not_found("Product", product_id));
        }
        Ok(catalog
            .batches
            .iter()
            .filter(|b| b.product_id == product_id)
            .filter(|b| !available_only || b.is_available())
            .cloned()
            .collect())
    }

    /// Batches at or below the low-stock threshold.
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

    /// Receives a new batch. Profit is fixed now as `sale − purchase`.
    pub async fn create(&self, draft: BatchDraft) -> StoreResult<Batch> {
        draft.validate()?;

        let mut catalog = self.shared.catalog.write().await;
        let product_name = catalog
            .product(draft.product_id.trim())
            .map(|p| p.name.clone())
            .ok_or_else(|| CoreError::ProductNotFound(draft.product_id.clone()))?;

        let batch = draft.into_batch(&product_name, Utc::now().date_naive());
        info!(
            id = %batch.id,
            product_id = %batch.product_id,
            quantity = batch.quantity,
            "Batch received"
        );
        catalog.batches.push(batch.clone());
        self.shared.persist(&catalog).await;
        Ok(batch)
    }

    /// Edits a batch. Price edits leave `profit` untouched.
    pub async fn update(&self, id: &str, update: BatchUpdate) -> StoreResult<Batch> {
        update.validate()?;

        let mut catalog = self.shared.catalog.write().await;
        let batch = catalog
            .batch_mut(id)
            .ok_or_else(|| StoreError::not_found("Batch", id))?;

        update.apply(batch);
        let updated = batch.clone();

        debug!(id = %id, remaining = updated.remaining, "Batch updated");
        self.shared.persist(&catalog).await;
        Ok(updated)
    }

    /// Deletes a batch that no bill references.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut catalog = self.shared.catalog.write().await;
        if catalog.batch(id).is_none() {
            return Err(StoreError::not_found("Batch", id));
        }

        let bills = catalog.bills_using_batch(id);
        if bills > 0 {
            return Err(StoreError::BatchInUse {
                id: id.to_string(),
                bills,
            });
        }

        catalog.batches.retain(|b| b.id != id);
        info!(id = %id, "Batch deleted");
        self.shared.persist(&catalog).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::store_with_batch;
    use crate::Store;
    use capital_core::{Money, MAX_PRICE};

    #[tokio::test]
    async fn test_create_sets_remaining_and_profit() {
        let (store, product_id, batch_id) = store_with_batch(60).await;
        let batch = store.batches().get(&batch_id).await.unwrap();

        assert_eq!(batch.product_id, product_id);
        assert_eq!(batch.product_name, "Pakistani Suit (Georgette)");
        assert_eq!(batch.remaining, 60);
        assert_eq!(batch.profit, Money::from_major(749));
        assert_eq!(batch.date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_create_for_unknown_product() {
        let store = Store::in_memory();
        let err = store
            .batches()
            .create(BatchDraft {
                product_id: "missing".to_string(),
                purchase_price: Money::from_major(1),
                sale_price: Money::from_major(2),
                quantity: 1,
                supplier: "S".to_string(),
                date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_price_edit_keeps_profit() {
        let (store, _, batch_id) = store_with_batch(60).await;

        let updated = store
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
        assert_eq!(updated.purchase_price, Money::from_major(900));
        assert_eq!(updated.profit, Money::from_major(749));
    }

    #[tokio::test]
    async fn test_update_leaves_stock_counts() {
        let (store, _, batch_id) = store_with_batch(60).await;
        {
            let mut catalog = store.shared_for_tests().catalog.write().await;
            catalog.batch_mut(&batch_id).unwrap().remaining = 35;
        }

        let updated = store
            .batches()
            .update(
                &batch_id,
                BatchUpdate {
                    sale_price: Some(Money::from_major(1599)),
                    supplier: Some("Surat Silk House".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity, 60);
        assert_eq!(updated.remaining, 35);
        assert_eq!(updated.sold(), 25);

        let err = store
            .batches()
            .update(
                &batch_id,
                BatchUpdate {
                    sale_price: Some(Money::from_major(MAX_PRICE + 1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        let batch = store.batches().get(&batch_id).await.unwrap();
        assert_eq!(batch.sale_price, Money::from_major(1599));
    }

    #[tokio::test]
    async fn test_list_for_product_available_only() {
        let (store, product_id, batch_id) = store_with_batch(5).await;
        {
            let mut catalog = store.shared_for_tests().catalog.write().await;
            catalog.batch_mut(&batch_id).unwrap().remaining = 0;
        }

        assert_eq!(
            store.batches().list_for_product(&product_id, false).await.unwrap().len(),
            1
        );
        assert!(store
            .batches()
            .list_for_product(&product_id, true)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.batches().low_stock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unused_batch() {
        let (store, _, batch_id) = store_with_batch(5).await;
        store.batches().delete(&batch_id).await.unwrap();
        assert!(store.batches().list().await.is_empty());
    }
}
