//! # Store Handle
//!
//! Creation, snapshot persistence and repository access for the catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Store                                    │
//! │                                                                         │
//! │  Server startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new().snapshot_path(..).seed_demo(..)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config).await ← load snapshot / seed / start empty         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │   Arc<Shared>                           │                            │
//! │  │   └── RwLock<Catalog>                   │  readers in parallel,      │
//! │  │                                         │  one writer at a time      │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.products() / batches() / sales() ... (cheap Arc clones)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot
//! When a snapshot path is configured, every committed mutation rewrites the
//! JSON file while the write lock is still held, so the file always matches a
//! state some reader could have observed. The write goes to a temp file that
//! is then renamed over the old one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::error::StoreResult;
use crate::repository::batch::BatchRepository;
use crate::repository::bill::BillRepository;
use crate::repository::category::CategoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SaleRepository;
use crate::seed;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use capital_store::StoreConfig;
///
/// let config = StoreConfig::new()
///     .snapshot_path("/var/lib/capital/catalog.json")
///     .seed_demo(true);
/// assert!(config.seed_demo);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// JSON snapshot file. `None` keeps everything in memory only.
    pub snapshot_path: Option<PathBuf>,

    /// Load the demo catalog when no snapshot exists yet.
    /// Default: false
    pub seed_demo: bool,
}

impl StoreConfig {
    pub fn new() -> Self {
        StoreConfig::default()
    }

    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn seed_demo(mut self, seed: bool) -> Self {
        self.seed_demo = seed;
        self
    }
}

// =============================================================================
// Shared State
// =============================================================================

/// State shared by every repository handle.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) catalog: RwLock<Catalog>,
    snapshot_path: Option<PathBuf>,
}

impl Shared {
    /// Writes the snapshot if persistence is configured.
    ///
    /// Called with the write lock held. Failures are logged, not returned:
    /// the in-memory state is already committed and stays authoritative.
    pub(crate) async fn persist(&self, catalog: &Catalog) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        if let Err(e) = write_snapshot(path, catalog).await {
            error!(path = %path.display(), error = %e, "Failed to write snapshot");
        }
    }
}

async fn write_snapshot(path: &Path, catalog: &Catalog) -> StoreResult<()> {
    let bytes = serde_json::to_vec_pretty(catalog)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await?;
    tokio::fs::rename(&tmp, path).await?;

    debug!(path = %path.display(), bytes = bytes.len(), "Snapshot written");
    Ok(())
}

async fn read_snapshot(path: &Path) -> StoreResult<Catalog> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the catalog store. Clone freely; all clones share one catalog.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
///     Ok(Json(state.store.products().list().await))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

impl Store {
    /// Opens the store.
    ///
    /// ## What This Does
    /// 1. Loads the snapshot when the configured file exists
    /// 2. Otherwise seeds the demo catalog (if enabled) or starts empty
    /// 3. Writes an initial snapshot for a fresh store with persistence on
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        let existing = match &config.snapshot_path {
            Some(path) if tokio::fs::try_exists(path).await? => {
                info!(path = %path.display(), "Loading catalog snapshot");
                Some(read_snapshot(path).await?)
            }
            _ => None,
        };

        let fresh = existing.is_none();
        let catalog = match existing {
            Some(catalog) => catalog,
            None if config.seed_demo => {
                info!("Seeding demo catalog");
                seed::demo_catalog()
            }
            None => Catalog::default(),
        };

        info!(
            categories = catalog.categories.len(),
            products = catalog.products.len(),
            batches = catalog.batches.len(),
            bills = catalog.bills.len(),
            "Catalog store ready"
        );

        let store = Store::from_parts(catalog, config.snapshot_path);
        if fresh {
            let catalog = store.shared.catalog.read().await;
            store.shared.persist(&catalog).await;
            drop(catalog);
        }
        Ok(store)
    }

    /// Empty, non-persistent store (for tests).
    pub fn in_memory() -> Self {
        Store::from_parts(Catalog::default(), None)
    }

    /// Non-persistent store over an existing catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Store::from_parts(catalog, None)
    }

    fn from_parts(catalog: Catalog, snapshot_path: Option<PathBuf>) -> Self {
        Store {
            shared: Arc::new(Shared {
                catalog: RwLock::new(catalog),
                snapshot_path,
            }),
        }
    }

    /// Writes the snapshot now and reports failures (used on shutdown).
    pub async fn save_snapshot(&self) -> StoreResult<()> {
        let Some(path) = &self.shared.snapshot_path else {
            return Ok(());
        };
        let catalog = self.shared.catalog.read().await;
        write_snapshot(path, &catalog).await
    }

    #[cfg(test)]
    pub(crate) fn shared_for_tests(&self) -> &Shared {
        &self.shared
    }

    /// Consistent copy of the whole catalog.
    pub async fn snapshot(&self) -> Catalog {
        self.shared.catalog.read().await.clone()
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.shared.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.shared.clone())
    }

    pub fn batches(&self) -> BatchRepository {
        BatchRepository::new(self.shared.clone())
    }

    pub fn bills(&self) -> BillRepository {
        BillRepository::new(self.shared.clone())
    }

    /// Cart checks against live stock, and the sale finalizer.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.shared.clone())
    }

    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.shared.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
