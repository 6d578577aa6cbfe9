//! # Category Repository
//!
//! Category CRUD. Names are unique regardless of case, and a category cannot
//! be deleted while products reference it.

use std::sync::Arc;

use capital_core::{Category, CategoryDraft};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Shared;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    shared: Arc<Shared>,
}

impl CategoryRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        CategoryRepository { shared }
    }

    pub async fn list(&self) -> Vec<Category> {
        self.shared.catalog.read().await.categories.clone()
    }

    pub async fn get(&self, id: &str) -> StoreResult<Category> {
        self.shared
            .catalog
            .read()
            .await
            .category(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Category", id))
    }

    pub async fn create(&self, draft: CategoryDraft) -> StoreResult<Category> {
        draft.validate()?;

        let mut catalog = self.shared.catalog.write().await;
        if catalog.category_named(&draft.name, None).is_some() {
            return Err(StoreError::duplicate("category name", draft.name.trim()));
        }

        let category = draft.into_category();
        info!(id = %category.id, name = %category.name, "Category created");
        catalog.categories.push(category.clone());
        self.shared.persist(&catalog).await;
        Ok(category)
    }

    /// Renames / re-describes a category. Products follow automatically since
    /// they hold the id.
    pub async fn update(&self, id: &str, draft: CategoryDraft) -> StoreResult<Category> {
        draft.validate()?;

        let mut catalog = self.shared.catalog.write().await;
        if catalog.category_named(&draft.name, Some(id)).is_some() {
            return Err(StoreError::duplicate("category name", draft.name.trim()));
        }

        let category = catalog
            .category_mut(id)
            .ok_or_else(|| StoreError::not_found("Category", id))?;
        draft.apply(category);
        let updated = category.clone();

        debug!(id = %id, name = %updated.name, "Category updated");
        self.shared.persist(&catalog).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut catalog = self.shared.catalog.write().await;
        if catalog.category(id).is_none() {
            return Err(StoreError::not_found("Category", id));
        }

        let products = catalog.products_in_category(id);
        if products > 0 {
            return Err(StoreError::CategoryInUse {
                id: id.to_string(),
                products,
            });
        }

        catalog.categories.retain(|c| c.id != id);
        info!(id = %id, "Category deleted");
        self.shared.persist(&catalog).await;
        Ok(())
    }
}
