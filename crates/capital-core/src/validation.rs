//! # Validation Module
//!
//! Input validation utilities for Capital billing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler                                                  │
//! │  └── Type validation (JSON deserialization, DiscountPercent range)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Drafts / Cart (this crate)                                    │
//! │  └── THIS MODULE: field rules (sku, names, prices, quantities)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                         │
//! │  ├── Unique SKU / category name                                         │
//! │  └── Referential checks (category in use, batch in use)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use capital_core::validation::{validate_sku, validate_quantity};
//!
//! validate_sku("MW-001").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const MAX_SKU_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ```rust
/// use capital_core::validation::validate_sku;
///
/// assert!(validate_sku("LW-004").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("LW 004").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a required free-text field (names, supplier).
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// Spaces, dashes, parentheses and a leading `+` are allowed; 10 to 15
/// digits must remain.
///
/// ```rust
/// use capital_core::validation::validate_phone;
///
/// assert!(validate_phone("+91 98765 43210").is_ok());
/// assert!(validate_phone("12345").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+');

    if !phone.chars().all(allowed) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, dashes or a leading +".to_string(),
        });
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must have between 10 and 15 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Billing: Add Item                                                      │
/// │                                                                         │
/// │  Staff enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"                │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"      │
/// │       │                                                                 │
/// │       └── OK → batch stock check                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the received quantity of a batch: 1 to [`MAX_STOCK_QUANTITY`].
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if qty > MAX_STOCK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_STOCK_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a price. Zero is allowed (free items), negatives and anything
/// above [`MAX_PRICE`] rupees are not.
///
/// ```rust
/// use capital_core::money::Money;
/// use capital_core::validation::validate_price;
///
/// assert!(validate_price("rate", Money::from_major(1499)).is_ok());
/// assert!(validate_price("rate", Money::zero()).is_ok());
/// assert!(validate_price("rate", Money::from_minor(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if price > Money::from_major(MAX_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("MW-001").is_ok());
        assert!(validate_sku("KW_009").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "White Cotton Kurta Pajama").is_ok());
        assert_eq!(
            validate_name("supplier", " ").unwrap_err(),
            ValidationError::Required {
                field: "supplier".to_string()
            }
        );
        assert!(validate_name("name", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("+91-98765-43210").is_ok());
        assert!(validate_phone("98765abc10").is_err());
        assert!(validate_phone("987654").is_err());
        assert!(validate_phone(&"9".repeat(16)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(5000).is_ok());
        assert!(validate_stock_quantity(MAX_STOCK_QUANTITY).is_ok());
        assert!(validate_stock_quantity(0).is_err());
        assert!(matches!(
            validate_stock_quantity(5_000_000_000_000_000_000),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("purchase_price", Money::from_major(750)).is_ok());
        assert!(matches!(
            validate_price("purchase_price", Money::from_major(-1)),
            Err(ValidationError::Negative { .. })
        ));
        assert!(validate_price("sale_price", Money::from_major(MAX_PRICE)).is_ok());
        assert!(matches!(
            validate_price("sale_price", Money::from_major(MAX_PRICE) + Money::from_minor(1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        // Near the top of Decimal's range
        let huge = Money::new("50000000000000000000000000000".parse().unwrap());
        assert!(validate_price("rate", huge).is_err());
    }
}
