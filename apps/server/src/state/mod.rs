//! # State Module
//!
//! Shared state handed to every axum handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::with_state(AppState)   (cloned per request, all Arc inside)    │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌────────────────┐  │
//! │  │    Store     │ │  CartState   │ │ ServerConfig │ │ ExportRegistry │  │
//! │  │              │ │              │ │              │ │                │  │
//! │  │ RwLock<      │ │ Mutex<Cart>  │ │ read-only    │ │ bill → status  │  │
//! │  │   Catalog>   │ │              │ │              │ │                │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └────────────────┘  │
//! │                                                                         │
//! │  + Arc<dyn DocumentExporter>, Arc<dyn NotificationDispatcher>           │
//! │                                                                         │
//! │  LOCK ORDER: cart → catalog                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod export;

use std::sync::Arc;

use capital_store::Store;

use crate::export::{DocumentExporter, TextFileExporter};
use crate::notify::{NotificationDispatcher, WhatsAppLinkDispatcher};

pub use cart::{CartState, CartView};
pub use config::{
    BillingSection, ConfigError, DataSection, ExportSection, ServerConfig, ServerSection,
    StoreSection,
};
pub use export::{ExportRegistry, ExportStatus};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub cart: Arc<CartState>,
    pub config: Arc<ServerConfig>,
    pub exports: Arc<ExportRegistry>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub notifier: Arc<dyn NotificationDispatcher>,
}

impl AppState {
    /// State with the shipped collaborators: text-file exporter into the
    /// configured export dir and the WhatsApp link dispatcher.
    pub fn new(store: Store, config: ServerConfig) -> Self {
        let header = config.store_header();
        let exporter = TextFileExporter::new(config.export_dir(), header.clone());
        AppState {
            store,
            cart: Arc::new(CartState::new()),
            exports: Arc::new(ExportRegistry::new()),
            exporter: Arc::new(exporter),
            notifier: Arc::new(WhatsAppLinkDispatcher::new(header)),
            config: Arc::new(config),
        }
    }

    /// Replaces the document exporter.
    pub fn with_exporter(mut self, exporter: Arc<dyn DocumentExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn round_to_rupee(&self) -> bool {
        self.config.billing.round_to_rupee
    }
}
