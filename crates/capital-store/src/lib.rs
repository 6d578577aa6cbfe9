//! # capital-store: Catalog Store for Capital Billing
//!
//! Holds products, categories, batches and bill history, and commits sales.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Capital Billing Data Flow                          │
//! │                                                                         │
//! │  HTTP handler (POST /api/cart/checkout)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  capital-store (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │    Store      │    │  Repositories │    │   Snapshot   │    │    │
//! │  │   │  (store.rs)   │    │               │    │   (JSON)     │    │    │
//! │  │   │               │    │ ProductRepo   │    │              │    │    │
//! │  │   │ RwLock<       │◄───│ BatchRepo     │───►│ temp + rename│    │    │
//! │  │   │   Catalog>    │    │ SaleRepo      │    │              │    │    │
//! │  │   │               │    │ ReportRepo    │    │              │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  capital-core (cart rules, invoice math, reports)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle, configuration, snapshot persistence
//! - [`catalog`] - The in-memory collections
//! - [`repository`] - Repository implementations
//! - [`seed`] - Demo catalog
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use capital_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new().seed_demo(true)).await?;
//! let batches = store.batches().list_for_product(&product_id, true).await?;
//! let bill = store.sales().finalize(&mut cart, checkout).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

pub use repository::batch::BatchRepository;
pub use repository::bill::BillRepository;
pub use repository::category::CategoryRepository;
pub use repository::product::{ProductFilter, ProductRepository};
pub use repository::report::ReportRepository;
pub use repository::sale::{Checkout, SaleRepository};
