//! # Drafts
//!
//! Typed input for creating and editing catalog entities.
//!
//! A draft is what arrives from the counter UI: it is parsed by serde,
//! validated here as a whole (every failing field is reported at once), and
//! only then turned into a domain value by the store.
//!
//! ```text
//! JSON body ──► ProductDraft ──► validate() ──► into_product() ──► store
//!                                   │
//!                                   └── ValidationError::Many([...])
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Batch, Category, Product, ProductStatus, ProductVariant};
use crate::validation::{
    validate_name, validate_price, validate_sku, validate_stock_quantity, ValidationResult,
};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims an optional text field, dropping it when blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Category
// =============================================================================

/// Create or rename a category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryDraft {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("name", &self.name)
    }

    pub fn into_category(self) -> Category {
        Category {
            id: new_id(),
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
        }
    }

    /// Overwrites name and description of an existing category.
    pub fn apply(self, category: &mut Category) {
        category.name = self.name.trim().to_string();
        category.description = non_blank(self.description);
    }
}

// =============================================================================
// Product
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantDraft {
    pub size: String,
    pub color: String,
    #[serde(default)]
    pub design: Option<String>,
}

impl VariantDraft {
    fn validate_into(&self, errors: &mut Vec<ValidationError>) {
        if let Err(e) = validate_name("variant.size", &self.size) {
            errors.push(e);
        }
        if let Err(e) = validate_name("variant.color", &self.color) {
            errors.push(e);
        }
    }

    fn into_variant(self) -> ProductVariant {
        ProductVariant {
            id: new_id(),
            size: self.size.trim().to_string(),
            color: self.color.trim().to_string(),
            design: non_blank(self.design),
        }
    }
}

/// New product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category_id: String,
    pub sku: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub variants: Vec<VariantDraft>,
}

impl ProductDraft {
    /// Checks every field and reports all failures together.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = validate_name("name", &self.name) {
            errors.push(e);
        }
        if let Err(e) = validate_sku(&self.sku) {
            errors.push(e);
        }
        if self.category_id.trim().is_empty() {
            errors.push(ValidationError::Required {
                field: "category_id".to_string(),
            });
        }
        for variant in &self.variants {
            variant.validate_into(&mut errors);
        }

        ValidationError::collect(errors)
    }

    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: new_id(),
            name: self.name.trim().to_string(),
            category_id: self.category_id.trim().to_string(),
            sku: self.sku.trim().to_string(),
            status: self.status,
            variants: self.variants.into_iter().map(VariantDraft::into_variant).collect(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial product edit. Absent fields are left unchanged.
///
/// `variants`, when present, replaces the whole variant list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub variants: Option<Vec<VariantDraft>>,
}

impl ProductUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if let Err(e) = validate_name("name", name) {
                errors.push(e);
            }
        }
        if let Some(sku) = &self.sku {
            if let Err(e) = validate_sku(sku) {
                errors.push(e);
            }
        }
        if matches!(&self.category_id, Some(c) if c.trim().is_empty()) {
            errors.push(ValidationError::Required {
                field: "category_id".to_string(),
            });
        }
        for variant in self.variants.iter().flatten() {
            variant.validate_into(&mut errors);
        }

        ValidationError::collect(errors)
    }

    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name.trim().to_string();
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id.trim().to_string();
        }
        if let Some(sku) = self.sku {
            product.sku = sku.trim().to_string();
        }
        if let Some(variants) = self.variants {
            product.variants = variants.into_iter().map(VariantDraft::into_variant).collect();
        }
        product.updated_at = now;
    }
}

// =============================================================================
// Batch
// =============================================================================

/// Stock received for a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BatchDraft {
    pub product_id: String,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub quantity: i64,
    pub supplier: String,
    /// Receipt date; today when omitted.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
}

impl BatchDraft {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if self.product_id.trim().is_empty() {
            errors.push(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }
        if let Err(e) = validate_price("purchase_price", self.purchase_price) {
            errors.push(e);
        }
        if let Err(e) = validate_price("sale_price", self.sale_price) {
            errors.push(e);
        }
        if let Err(e) = validate_stock_quantity(self.quantity) {
            errors.push(e);
        }
        if let Err(e) = validate_name("supplier", &self.supplier) {
            errors.push(e);
        }

        ValidationError::collect(errors)
    }

    /// Builds a full batch: `remaining = quantity` and the per-unit profit is
    /// fixed at `sale_price − purchase_price`.
    pub fn into_batch(self, product_name: &str, today: NaiveDate) -> Batch {
        Batch {
            id: new_id(),
            product_id: self.product_id.trim().to_string(),
            product_name: product_name.to_string(),
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            quantity: self.quantity,
            remaining: self.quantity,
            supplier: self.supplier.trim().to_string(),
            date: self.date.unwrap_or(today),
            profit: self.sale_price - self.purchase_price,
        }
    }
}

/// Partial batch edit.
///
/// Editing prices does NOT touch `profit`. `quantity` is fixed at receipt
/// and `remaining` only falls through sales, so neither is editable; a body
/// naming either is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BatchUpdate {
    #[serde(default)]
    pub purchase_price: Option<Money>,
    #[serde(default)]
    pub sale_price: Option<Money>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
}

impl BatchUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Some(price) = self.purchase_price {
            if let Err(e) = validate_price("purchase_price", price) {
                errors.push(e);
            }
        }
        if let Some(price) = self.sale_price {
            if let Err(e) = validate_price("sale_price", price) {
                errors.push(e);
            }
        }
        if let Some(supplier) = &self.supplier {
            if let Err(e) = validate_name("supplier", supplier) {
                errors.push(e);
            }
        }

        ValidationError::collect(errors)
    }

    pub fn apply(self, batch: &mut Batch) {
        if let Some(price) = self.purchase_price {
            batch.purchase_price = price;
        }
        if let Some(price) = self.sale_price {
            batch.sale_price = price;
        }
        if let Some(supplier) = self.supplier {
            batch.supplier = supplier.trim().to_string();
        }
        if let Some(date) = self.date {
            batch.date = date;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
