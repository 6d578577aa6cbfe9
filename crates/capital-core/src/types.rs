//! # Domain Types
//!
//! Core domain types used throughout Capital billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Category     │◄──│     Product     │◄──│      Batch      │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │        │
//! │  │  name (unique)  │   │  sku (business) │   │  purchase/sale  │        │
//! │  │  description    │   │  category_id FK │   │  quantity       │        │
//! │  └─────────────────┘   │  status         │   │  remaining      │        │
//! │                        │  variants[]     │   │  profit (fixed) │        │
//! │                        └─────────────────┘   └────────▲────────┘        │
//! │                                                       │                 │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                 │
//! │  │      Bill       │──►│    BillItem     │────────────┘                 │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  bill_number    │   │  batch_id       │                              │
//! │  │  totals, GST    │   │  quantity, rate │                              │
//! │  │  payment_method │   │  amount         │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4, immutable, used for references
//! - Business ID: (sku, bill_number) human-readable

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product grouping ("Men's Wear", "Ladies' Wear", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// Unique, compared case-insensitively.
    pub name: String,
    pub description: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// Whether a product can be sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Active,
    Inactive,
}

impl ProductStatus {
    /// The other status; used by the toggle operation.
    pub fn toggled(self) -> Self {
        match self {
            ProductStatus::Active => ProductStatus::Inactive,
            ProductStatus::Inactive => ProductStatus::Active,
        }
    }
}

/// Size / colour / design combination of a product.
///
/// Informational only; stock is tracked per batch, not per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub size: String,
    pub color: String,
    pub design: Option<String>,
}

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown at the counter and on the invoice.
    pub name: String,

    /// Category reference.
    pub category_id: String,

    /// Stock Keeping Unit, e.g. `MW-001`.
    pub sku: String,

    /// Products are never deleted, only deactivated.
    pub status: ProductStatus,

    pub variants: Vec<ProductVariant>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A stock lot of one product received at one purchase price and date.
///
/// ## Stock Lifecycle
/// ```text
/// Receive (quantity: 60, remaining: 60)
///      │
///      ▼
/// Sales finalize ──► remaining -= sold quantity
///      │
///      ▼
/// remaining ≤ 10  → low stock alert
/// remaining == 0  → no longer offered at the counter
/// ```
///
/// `profit` is `sale_price − purchase_price` captured when the batch is
/// created. Later price edits do not change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: String,
    pub product_id: String,
    /// Denormalized for display.
    pub product_name: String,
    pub purchase_price: Money,
    pub sale_price: Money,
    /// Original stock count.
    pub quantity: i64,
    /// Units still unsold; `0 ≤ remaining ≤ quantity`.
    pub remaining: i64,
    pub supplier: String,
    /// Receipt date.
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Per-unit margin frozen at creation.
    pub profit: Money,
}

impl Batch {
    /// Units sold out of this batch so far.
    #[inline]
    pub fn sold(&self) -> i64 {
        self.quantity - self.remaining
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }
}

/// Stock health of a batch, by remaining share of the original quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// More than half left.
    Safe,
    /// More than a fifth left.
    Medium,
    Danger,
}

// =============================================================================
// Bill
// =============================================================================

/// One line on a bill (and in the cart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub batch_id: String,
    pub quantity: i64,
    /// Unit price at sale time; defaults to the batch sale price but may be
    /// overridden at the counter.
    pub rate: Money,
    /// `quantity × rate`
    pub amount: Money,
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Upi,
    Credit,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Credit => "credit",
        };
        f.write_str(label)
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "upi" => Ok(PaymentMethod::Upi),
            "credit" => Ok(PaymentMethod::Credit),
            other => Err(ValidationError::InvalidFormat {
                field: "payment_method".to_string(),
                reason: format!("unknown payment method '{}'", other),
            }),
        }
    }
}

/// Customer attached to a bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
}

/// A finalized sale. Immutable once appended to history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,

    /// Human-readable sequence number, e.g. `INV-000042`.
    pub bill_number: String,

    pub items: Vec<BillItem>,

    pub subtotal: Money,

    /// Discount percentage (0-100).
    #[ts(type = "number")]
    pub discount: DiscountPercent,

    pub discount_amount: Money,

    /// Combined GST (CGST + SGST).
    pub tax: Money,

    /// Adjustment to the nearest rupee; zero unless rounding is enabled.
    pub round_off: Money,

    /// Discounted subtotal plus tax, before round-off.
    pub grand_total: Money,

    pub payment_method: PaymentMethod,

    pub customer: Option<Customer>,

    #[ts(as = "String")]
    pub date: DateTime<Utc>,
}

impl Bill {
    /// Central GST share (half of `tax`).
    #[inline]
    pub fn cgst(&self) -> Money {
        self.tax.half()
    }

    /// State GST share (half of `tax`).
    #[inline]
    pub fn sgst(&self) -> Money {
        self.tax.half()
    }

    /// Amount actually collected.
    #[inline]
    pub fn payable(&self) -> Money {
        self.grand_total + self.round_off
    }

    /// Total units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Bill date as a calendar day (UTC).
    #[inline]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

// =============================================================================
// Discount Percent
// =============================================================================

/// A discount percentage guaranteed to lie within `0..=100`.
///
/// Construction is the only validation point, so an out-of-range discount can
/// never reach the invoice calculator.
///
/// ```rust
/// use capital_core::DiscountPercent;
/// use rust_decimal::Decimal;
///
/// assert!(DiscountPercent::new(Decimal::from(5)).is_ok());
/// assert!(DiscountPercent::new(Decimal::from(101)).is_err());
/// assert!(DiscountPercent::new(Decimal::from(-1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    pub const MAX: Decimal = Decimal::ONE_HUNDRED;

    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Self::MAX {
            return Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountPercent(value))
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountPercent(Decimal::ZERO)
    }

    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        DiscountPercent::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(d: DiscountPercent) -> Self {
        d.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn batch(quantity: i64, remaining: i64) -> Batch {
        Batch {
            id: "b1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Pakistani Suit (Georgette)".to_string(),
            purchase_price: Money::from_major(750),
            sale_price: Money::from_major(1499),
            quantity,
            remaining,
            supplier: "Mumbai Georgette Fabrics".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(),
            profit: Money::from_major(749),
        }
    }

    #[test]
    fn test_batch_sold() {
        let b = batch(60, 35);
        assert_eq!(b.sold(), 25);
        assert!(b.is_available());
        assert!(!batch(5, 0).is_available());
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(ProductStatus::Active.toggled(), ProductStatus::Inactive);
        assert_eq!(ProductStatus::Inactive.toggled(), ProductStatus::Active);
        assert_eq!(ProductStatus::default(), ProductStatus::Active);
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!(" cash ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::Credit.to_string(), "credit");
    }

    #[test]
    fn test_discount_bounds() {
        assert!(DiscountPercent::new(dec!(0)).is_ok());
        assert!(DiscountPercent::new(dec!(100)).is_ok());
        assert!(DiscountPercent::new(dec!(12.5)).is_ok());
        assert!(matches!(
            DiscountPercent::new(dec!(100.01)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(DiscountPercent::new(dec!(-0.5)).is_err());
        assert_eq!(DiscountPercent::new(dec!(5.0)).unwrap().to_string(), "5%");
    }

    #[test]
    fn test_discount_deserialize_rejects_out_of_range() {
        let ok: DiscountPercent = serde_json::from_str("5").unwrap();
        assert_eq!(ok.value(), dec!(5));
        assert!(serde_json::from_str::<DiscountPercent>("150").is_err());
    }

    #[test]
    fn test_batch_serializes_camel_case() {
        let json = serde_json::to_value(batch(60, 35)).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["purchasePrice"], 750.0);
        assert_eq!(json["date"], "2025-10-12");
    }
}
