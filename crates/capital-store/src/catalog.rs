//! # Catalog
//!
//! The whole mutable state of the store in one serializable value.
//!
//! ```text
//! Catalog
//! ├── categories   Vec<Category>
//! ├── products     Vec<Product>
//! ├── batches      Vec<Batch>
//! ├── bills        Vec<Bill>      (append-only, oldest first)
//! └── last_bill_number            (INV-000001, INV-000002, ...)
//! ```
//!
//! Vectors keep insertion order, which is the order lists are returned in.
//! A counter shop holds hundreds of rows, not millions, so lookups are
//! linear scans.

use capital_core::{Batch, Bill, Category, Product};
use serde::{Deserialize, Serialize};

const BILL_NUMBER_PREFIX: &str = "INV-";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub batches: Vec<Batch>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    /// Sequence value of the most recent bill number; 0 before the first sale.
    #[serde(default)]
    pub last_bill_number: u64,
}

impl Catalog {
    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Case-insensitive name lookup, optionally ignoring one category (the
    /// one being renamed).
    pub fn category_named(&self, name: &str, except_id: Option<&str>) -> Option<&Category> {
        let name = name.trim();
        self.categories
            .iter()
            .filter(|c| Some(c.id.as_str()) != except_id)
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// SKU lookup (case-insensitive), optionally ignoring one product.
    pub fn product_with_sku(&self, sku: &str, except_id: Option<&str>) -> Option<&Product> {
        let sku = sku.trim();
        self.products
            .iter()
            .filter(|p| Some(p.id.as_str()) != except_id)
            .find(|p| p.sku.eq_ignore_ascii_case(sku))
    }

    pub fn products_in_category(&self, category_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }

    // -------------------------------------------------------------------------
    // Batches
    // -------------------------------------------------------------------------

    pub fn batch(&self, id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == id)
    }

    pub fn batch_mut(&mut self, id: &str) -> Option<&mut Batch> {
        self.batches.iter_mut().find(|b| b.id == id)
    }

    /// Number of bills with at least one line from `batch_id`.
    pub fn bills_using_batch(&self, batch_id: &str) -> usize {
        self.bills
            .iter()
            .filter(|bill| bill.items.iter().any(|i| i.batch_id == batch_id))
            .count()
    }

    // -------------------------------------------------------------------------
    // Bills
    // -------------------------------------------------------------------------

    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    pub fn bill_by_number(&self, number: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.bill_number == number)
    }

    /// Advances the bill sequence and returns the new number.
    pub fn next_bill_number(&mut self) -> String {
        self.last_bill_number += 1;
        format_bill_number(self.last_bill_number)
    }
}

/// `7` → `INV-000007`
pub fn format_bill_number(sequence: u64) -> String {
    format!("{}{:06}", BILL_NUMBER_PREFIX, sequence)
}
