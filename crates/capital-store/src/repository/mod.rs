//! # Repository Module
//!
//! Catalog access for Capital billing, one repository per concern.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  store.batches().list_for_product(id, true)                     │
//! │       ▼                                                                 │
//! │  BatchRepository                                                        │
//! │  ├── list / get                                                         │
//! │  ├── create / update / delete                                           │
//! │  └── low_stock                                                          │
//! │       │                                                                 │
//! │       │  read() / write() on RwLock<Catalog>                            │
//! │       ▼                                                                 │
//! │  Catalog (+ snapshot after every committed write)                       │
//! │                                                                         │
//! │  Every write validates fully before it mutates anything.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Category CRUD, restrict-on-delete
//! - [`product::ProductRepository`] - Product CRUD, search, status toggle
//! - [`batch::BatchRepository`] - Stock lots
//! - [`bill::BillRepository`] - Bill history queries
//! - [`sale::SaleRepository`] - Cart stock checks and the sale finalizer
//! - [`report::ReportRepository`] - Dashboard and reports

pub mod batch;
pub mod bill;
pub mod category;
pub mod product;
pub mod report;
pub mod sale;
