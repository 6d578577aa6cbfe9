//! # Document Export
//!
//! Turns a finalized bill into a shareable document and returns its URL.
//!
//! The shipped exporter writes the plain-text invoice into a directory and
//! hands back a `file://` URL. A PDF renderer or an upload to object storage
//! would implement the same trait.
//!
//! ## When Exports Run
//! ```text
//! POST /api/cart/checkout
//!      │
//!      ├── finalize (bill committed) ──► response { bill, export: pending }
//!      │
//!      └── tokio::spawn ──► exporter.export(&bill)
//!                               ├── Ok(url)  → ExportStatus::Ready
//!                               └── Err(e)   → ExportStatus::Failed, logged
//! ```
//!
//! A failed export never touches the committed sale.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use capital_core::receipt::render_invoice_text;
use capital_core::{Bill, StoreHeader};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::state::{ExportRegistry, ExportStatus};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot build a URL for {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Produces a document for a bill.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Exports `bill` and returns a URL the customer can open.
    async fn export(&self, bill: &Bill) -> Result<String, ExportError>;
}

/// Writes `<dir>/<bill number>.txt`.
#[derive(Debug, Clone)]
pub struct TextFileExporter {
    dir: PathBuf,
    header: StoreHeader,
}

impl TextFileExporter {
    pub fn new(dir: impl Into<PathBuf>, header: StoreHeader) -> Self {
        TextFileExporter {
            dir: dir.into(),
            header,
        }
    }
}

#[async_trait]
impl DocumentExporter for TextFileExporter {
    async fn export(&self, bill: &Bill) -> Result<String, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.dir.join(format!("{}.txt", bill.bill_number));
        tokio::fs::write(&path, render_invoice_text(bill, &self.header)).await?;

        // from_file_path needs an absolute path
        let absolute = tokio::fs::canonicalize(&path).await?;
        let url = Url::from_file_path(&absolute).map_err(|_| ExportError::InvalidPath(absolute))?;

        debug!(bill_number = %bill.bill_number, url = %url, "Invoice document written");
        Ok(url.to_string())
    }
}

/// Runs one export in the background and records the outcome.
pub fn spawn_export(
    exporter: Arc<dyn DocumentExporter>,
    registry: Arc<ExportRegistry>,
    bill: Bill,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let status = match exporter.export(&bill).await {
            Ok(url) => {
                info!(bill_number = %bill.bill_number, "Bill exported");
                ExportStatus::Ready { url }
            }
            Err(e) => {
                error!(bill_number = %bill.bill_number, error = %e, "Bill export failed");
                ExportStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        registry.set(&bill.id, status).await;
    })
}
