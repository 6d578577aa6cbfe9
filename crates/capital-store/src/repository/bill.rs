//! # Bill Repository
//!
//! Read access to bill history. Bills are appended only by the sale
//! finalizer and never modified.

use std::sync::Arc;

use capital_core::{Bill, DateRange};

use crate::error::{StoreError, StoreResult};
use crate::store::Shared;

#[derive(Debug, Clone)]
pub struct BillRepository {
    shared: Arc<Shared>,
}

impl BillRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        BillRepository { shared }
    }

    /// Bills whose date falls within `range` (inclusive), newest first.
    pub async fn list(&self, range: DateRange) -> Vec<Bill> {
        let catalog = self.shared.catalog.read().await;
        catalog
            .bills
            .iter()
            .rev()
            .filter(|b| range.contains(b.day()))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: &str) -> StoreResult<Bill> {
        self.shared
            .catalog
            .read()
            .await
            .bill(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Bill", id))
    }

    pub async fn get_by_number(&self, bill_number: &str) -> StoreResult<Bill> {
        self.shared
            .catalog
            .read()
            .await
            .bill_by_number(bill_number)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Bill", bill_number))
    }

    pub async fn count(&self) -> usize {
        self.shared.catalog.read().await.bills.len()
    }
}
