//! # Store Error Types
//!
//! Error types for catalog store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (stock, cart, validation)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds referential / lifecycle failures       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in server) ← Serialized for clients                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use capital_core::{CoreError, ValidationError};
use thiserror::Error;

/// Catalog store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique value already taken.
    ///
    /// ## When This Occurs
    /// - Creating or renaming to an existing SKU
    /// - Category name clash (case-insensitive)
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Category still referenced by products.
    #[error("Category {id} is used by {products} product(s)")]
    CategoryInUse { id: String, products: usize },

    /// Batch referenced by finalized bills; deleting it would orphan history.
    #[error("Batch {id} is referenced by {bills} bill(s)")]
    BatchInUse { id: String, bills: usize },

    /// Domain rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing the snapshot file failed.
    #[error("Snapshot failed: {0}")]
    Snapshot(String),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Snapshot(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Snapshot(format!("invalid snapshot: {}", err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
