//! # Export Registry
//!
//! Tracks the background document export started for each bill.
//!
//! ```text
//! checkout ──► Pending ──┬──► Ready { url }
//!                        └──► Failed { reason }     (never retried)
//! ```

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;

/// Export state of one bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExportStatus {
    Pending,
    Ready { url: String },
    Failed { reason: String },
}

impl ExportStatus {
    /// Document link, when the export finished.
    pub fn url(&self) -> Option<&str> {
        match self {
            ExportStatus::Ready { url } => Some(url),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportRegistry {
    entries: RwLock<HashMap<String, ExportStatus>>,
}

impl ExportRegistry {
    pub fn new() -> Self {
        ExportRegistry::default()
    }

    pub async fn set(&self, bill_id: &str, status: ExportStatus) {
        self.entries
            .write()
            .await
            .insert(bill_id.to_string(), status);
    }

    pub async fn get(&self, bill_id: &str) -> Option<ExportStatus> {
        self.entries.read().await.get(bill_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_transitions() {
        let registry = ExportRegistry::new();
        assert!(registry.get("b1").await.is_none());

        registry.set("b1", ExportStatus::Pending).await;
        assert_eq!(registry.get("b1").await.unwrap().url(), None);

        registry
            .set(
                "b1",
                ExportStatus::Ready {
                    url: "file:///tmp/INV-000001.txt".into(),
                },
            )
            .await;
        assert_eq!(
            registry.get("b1").await.unwrap().url(),
            Some("file:///tmp/INV-000001.txt")
        );
    }

    #[test]
    fn test_status_json() {
        let json = serde_json::to_value(ExportStatus::Failed {
            reason: "disk full".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "disk full");
    }
}
