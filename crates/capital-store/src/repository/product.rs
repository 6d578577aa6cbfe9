//! # Product Repository
//!
//! Product CRUD, search and activation.
//!
//! ## Lifecycle
//! ```text
//! create (active) ──► update ... ──► toggle_status (inactive) ──► toggle ...
//!
//! Products are never deleted: bills and batches keep pointing at them.
//! An inactive product stays in reports but cannot be added to a cart.
//! ```

use std::sync::Arc;

use capital_core::report::{self, ProductStock};
use capital_core::{CoreError, Product, ProductDraft, ProductStatus, ProductUpdate};
use chrono::Utc;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{StoreError, StoreResult};
use crate::store::Shared;

/// List filter; every field is optional.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<String>,
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring of name or SKU.
    pub search: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category_id) = &self.category_id {
            if &product.category_id != category_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                product.name.to_lowercase().contains(&q) || product.sku.to_lowercase().contains(&q)
            }
            _ => true,
        }
    }
}

/// Repository for product operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
/// let kurtas = repo.list(&ProductFilter { search: Some("kurta".into()), ..Default::default() }).await;
/// let product = repo.toggle_status(&id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    shared: Arc<Shared>,
}

impl ProductRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        ProductRepository { shared }
    }

    pub async fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        let catalog = self.shared.catalog.read().await;
        let products: Vec<Product> = catalog
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        debug!(count = products.len(), "Listed products");
        products
    }

    pub async fn get(&self, id: &str) -> StoreResult<Product> {
        self.shared
            .catalog
            .read()
            .await
            .product(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    pub async fn get_by_sku(&self, sku: &str) -> StoreResult<Product> {
        self.shared
            .catalog
            .read()
            .await
            .product_with_sku(sku, None)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Product", sku))
    }

    /// Creates a product.
    ///
    /// ## Checks
    /// - Draft fields valid
    /// - Category exists
    /// - SKU unique (case-insensitive)
    pub async fn create(&self, draft: ProductDraft) -> StoreResult<Product> {
        draft.validate()?;

        let mut catalog = self.shared.catalog.write().await;
        ensure_category(&catalog, &draft.category_id)?;
        if catalog.product_with_sku(&draft.sku, None).is_some() {
            return Err(StoreError::duplicate("sku", draft.sku.trim()));
        }

        let product = draft.into_product(Utc::now());
        info!(id = %product.id, sku = %product.sku, name = %product.name, "Product created");
        catalog.products.push(product.clone());
        self.shared.persist(&catalog).await;
        Ok(product)
    }

    /// Applies a partial edit. A rename is copied to the product's batches;
    /// finalized bills keep the name they were sold under.
    pub async fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        update.validate()?;

        let mut catalog = self.shared.catalog.write().await;
        if catalog.product(id).is_none() {
            return Err(StoreError::not_found("Product", id));
        }
        if let Some(category_id) = &update.category_id {
            ensure_category(&catalog, category_id)?;
        }
        if let Some(sku) = &update.sku {
            if catalog.product_with_sku(sku, Some(id)).is_some() {
                return Err(StoreError::duplicate("sku", sku.trim()));
            }
        }

        let product = catalog
            .product_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;
        update.apply(product, Utc::now());
        let updated = product.clone();

        for batch in catalog.batches.iter_mut().filter(|b| b.product_id == id) {
            batch.product_name = updated.name.clone();
        }

        debug!(id = %id, "Product updated");
        self.shared.persist(&catalog).await;
        Ok(updated)
    }

    /// Flips active ⇄ inactive.
    pub async fn toggle_status(&self, id: &str) -> StoreResult<Product> {
        let mut catalog = self.shared.catalog.write().await;
        let product = catalog
            .product_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.status = product.status.toggled();
        product.updated_at = Utc::now();
        let updated = product.clone();

        info!(id = %id, status = ?updated.status, "Product status toggled");
        self.shared.persist(&catalog).await;
        Ok(updated)
    }

    /// Batch count and total remaining units for a product.
    pub async fn stock(&self, id: &str) -> StoreResult<ProductStock> {
        let catalog = self.shared.catalog.read().await;
        if catalog.product(id).is_none() {
            return Err(StoreError::not_found("Product", id));
        }
        Ok(report::product_stock(id, &catalog.batches))
    }
}

fn ensure_category(catalog: &Catalog, category_id: &str) -> StoreResult<()> {
    if catalog.category(category_id.trim()).is_none() {
        return Err(CoreError::CategoryNotFound(category_id.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::store_with_batch;
    use crate::Store;
    use capital_core::{CategoryDraft, VariantDraft};

    async fn store_with_category() -> (Store, String) {
        let store = Store::in_memory();
        let category = store
            .categories()
            .create(CategoryDraft {
                name: "Men's Wear".to_string(),
                description: None,
            })
            .await
            .unwrap();
        (store, category.id)
    }

    fn draft(category_id: &str, sku: &str, name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category_id: category_id.to_string(),
            sku: sku.to_string(),
            status: ProductStatus::Active,
            variants: vec![VariantDraft {
                size: "L".to_string(),
                color: "White".to_string(),
                design: Some("Plain".to_string()),
            }],
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let store = Store::in_memory();
        let err = store
            .products()
            .create(draft("missing", "MW-001", "Kurta"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::CategoryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let (store, category_id) = store_with_category().await;
        store
            .products()
            .create(draft(&category_id, "MW-001", "White Cotton Kurta Pajama"))
            .await
            .unwrap();

        let err = store
            .products()
            .create(draft(&category_id, "mw-001", "Another"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_invalid_draft_rejected() {
        let (store, category_id) = store_with_category().await;
        let err = store
            .products()
            .create(draft(&category_id, "bad sku", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert!(store.products().list(&ProductFilter::default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let (store, category_id) = store_with_category().await;
        let repo = store.products();
        repo.create(draft(&category_id, "MW-001", "White Cotton Kurta Pajama"))
            .await
            .unwrap();
        let jacket = repo
            .create(draft(&category_id, "MW-003", "Linen Nehru Jacket"))
            .await
            .unwrap();
        repo.toggle_status(&jacket.id).await.unwrap();

        let search = ProductFilter {
            search: Some("KURTA".to_string()),
            ..Default::default()
        };
        assert_eq!(repo.list(&search).await.len(), 1);

        let active = ProductFilter {
            status: Some(ProductStatus::Active),
            ..Default::default()
        };
        assert_eq!(repo.list(&active).await.len(), 1);

        let by_sku = ProductFilter {
            search: Some("mw-00".to_string()),
            category_id: Some(category_id.clone()),
            ..Default::default()
        };
        assert_eq!(repo.list(&by_sku).await.len(), 2);
        assert_eq!(repo.get_by_sku("mw-003").await.unwrap().id, jacket.id);
    }

    #[tokio::test]
    async fn test_toggle_status_round_trip() {
        let (store, product_id, _) = store_with_batch(5).await;

        let p = store.products().toggle_status(&product_id).await.unwrap();
        assert_eq!(p.status, ProductStatus::Inactive);
        let p = store.products().toggle_status(&product_id).await.unwrap();
        assert_eq!(p.status, ProductStatus::Active);
    }

    #[tokio::test]
    async fn test_rename_updates_batch_names() {
        let (store, product_id, batch_id) = store_with_batch(5).await;

        store
            .products()
            .update(
                &product_id,
                ProductUpdate {
                    name: Some("Georgette Suit".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let batch = store.batches().get(&batch_id).await.unwrap();
        assert_eq!(batch.product_name, "Georgette Suit");
    }

    #[tokio::test]
    async fn test_stock_summary() {
        let (store, product_id, _) = store_with_batch(25).await;
        let stock = store.products().stock(&product_id).await.unwrap();
        assert_eq!(stock.total_batches, 1);
        assert_eq!(stock.total_remaining, 25);
        assert!(store.products().stock("missing").await.is_err());
    }
}
