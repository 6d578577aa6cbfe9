//! # capital-core: Pure Business Logic for Capital Billing
//!
//! Billing math, cart rules, stock checks and report derivations as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Capital Billing Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    Counter UI / HTTP clients                    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                    apps/server (axum handlers)                  │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ capital-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐           │    │
//! │  │   │  types   │ │  money   │ │   cart   │ │ invoice  │           │    │
//! │  │   │  Batch   │ │  Money   │ │ add/upd  │ │ GST 18%  │           │    │
//! │  │   │  Bill    │ │ (exact)  │ │ remove   │ │ discount │           │    │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘           │    │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐                        │    │
//! │  │   │  report  │ │  draft   │ │ receipt  │                        │    │
//! │  │   └──────────┘ └──────────┘ └──────────┘                        │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE FUNCTIONS               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │          capital-store (catalog, bill history, finalize)        │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Batch, Bill, ...)
//! - [`money`] - Exact decimal Money
//! - [`cart`] - Cart builder with per-batch stock checks
//! - [`invoice`] - Subtotal, discount, GST and grand total
//! - [`report`] - Profit, sales and stock reports
//! - [`draft`] - Validated create/edit inputs
//! - [`receipt`] - Invoice text and share message
//! - [`validation`] - Field rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use capital_core::{invoice, BillItem, DiscountPercent, Money};
//!
//! let items = vec![
//!     BillItem {
//!         id: "1".into(),
//!         product_id: "p4".into(),
//!         product_name: "Pakistani Suit (Georgette)".into(),
//!         batch_id: "b4".into(),
//!         quantity: 1,
//!         rate: Money::from_major(1499),
//!         amount: Money::from_major(1499),
//!     },
//!     BillItem {
//!         id: "2".into(),
//!         product_id: "p7".into(),
//!         product_name: "Kids Party Frock".into(),
//!         batch_id: "b7".into(),
//!         quantity: 1,
//!         rate: Money::from_major(898),
//!         amount: Money::from_major(898),
//!     },
//! ];
//!
//! let totals = invoice::calculate(&items, DiscountPercent::zero());
//! assert_eq!(totals.grand_total.to_string(), "₹2828.46");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod draft;
pub mod error;
pub mod invoice;
pub mod money;
pub mod receipt;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use draft::{BatchDraft, BatchUpdate, CategoryDraft, ProductDraft, ProductUpdate, VariantDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{InvoiceTotals, GST_RATE};
pub use money::Money;
pub use receipt::StoreHeader;
pub use report::{
    BatchReportRow, DashboardStats, DateRange, ProductProfit, ProductStock, SalesSummary,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts; a counter sale never gets near this.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity on a single cart line.
///
/// ## Business Reason
/// Catches typos (1000 instead of 10) before they hit stock checks.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest unit price, in whole rupees, a batch or cart line may carry.
///
/// ## Business Reason
/// Keeps `rate × quantity` and every report sum far inside decimal range.
pub const MAX_PRICE: i64 = 10_000_000;

/// Largest quantity a batch may be received with.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000;

/// A batch at or below this many units is flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;
