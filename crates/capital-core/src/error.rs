//! # Error Types
//!
//! Domain-specific error types for capital-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  capital-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations (stock, cart, refs)    │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  capital-store errors (separate crate)                                  │
//! │  └── StoreError       - Referential / lifecycle failures in the store   │
//! │                                                                         │
//! │  Server errors (in app)                                                 │
//! │  └── ApiError         - What HTTP clients see (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Batch id does not exist.
    ///
    /// ## When This Occurs
    /// - Cart line references a batch that was deleted after it was added
    /// - Client sends a stale batch id
    ///
    /// Finalize aborts as a whole; no stock is decremented.
    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    /// Category id does not exist.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Requested quantity exceeds what the batch has left.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (BTH-004, qty: 5)
    ///      │
    ///      ▼
    /// Check batch: remaining=3, already in cart=0
    ///      │
    ///      ▼
    /// InsufficientStock { batch_id: "BTH-004", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 left in batch BTH-004"
    /// ```
    #[error("Insufficient stock in batch {batch_id}: available {available}, requested {requested}")]
    InsufficientStock {
        batch_id: String,
        available: i64,
        requested: i64,
    },

    /// Product is deactivated and cannot be sold.
    #[error("Product {0} is inactive")]
    ProductInactive(String),

    /// The batch does not belong to the product it was paired with.
    #[error("Batch {batch_id} does not belong to product {product_id}")]
    BatchProductMismatch {
        batch_id: String,
        product_id: String,
    },

    /// Finalize was called on a cart without lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart line id is not in the cart.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// Cart has reached the maximum number of lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Drafts collect every failing field; a single failure is reported as-is and
/// several are wrapped in [`ValidationError::Many`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., SKU characters, phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Several fields failed at once.
    #[error("{}", join_messages(.0))]
    Many(Vec<ValidationError>),
}

impl ValidationError {
    /// Folds a list of failures into a result.
    ///
    /// ```rust
    /// use capital_core::ValidationError;
    ///
    /// assert!(ValidationError::collect(vec![]).is_ok());
    /// let err = ValidationError::collect(vec![
    ///     ValidationError::Required { field: "name".into() },
    ///     ValidationError::Required { field: "sku".into() },
    /// ])
    /// .unwrap_err();
    /// assert_eq!(err.to_string(), "name is required; sku is required");
    /// ```
    pub fn collect(mut errors: Vec<ValidationError>) -> Result<(), ValidationError> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Many(errors)),
        }
    }

    /// Returns every individual failure, flattening [`ValidationError::Many`].
    pub fn fields(&self) -> Vec<&ValidationError> {
        match self {
            ValidationError::Many(errors) => errors.iter().flat_map(|e| e.fields()).collect(),
            other => vec![other],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
