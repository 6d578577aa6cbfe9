//! # Server Configuration
//!
//! Loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CAPITAL_*`)
//! 2. Config file (`--config <path>`, `CAPITAL_CONFIG`, or the platform
//!    config dir's `capital.toml`)
//! 3. Defaults (this file)
//!
//! ```toml
//! [store]
//! name = "Capital"
//! address = ["12 Market Road", "Pune"]
//!
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [billing]
//! round_to_rupee = true
//!
//! [data]
//! snapshot_path = "/var/lib/capital/catalog.json"
//! seed_demo = false
//!
//! [export]
//! dir = "/var/lib/capital/bills"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use capital_core::StoreHeader;
use capital_store::StoreConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "Capital", "capital")
}

// =============================================================================
// Sections
// =============================================================================

/// Printed on every invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub name: String,
    pub address: Vec<String>,
    pub currency_symbol: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: "Capital".to_string(),
            address: Vec::new(),
            currency_symbol: "₹".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        ServerSection {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingSection {
    /// Add a round-off so the payable amount is a whole rupee.
    pub round_to_rupee: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// JSON snapshot; unset means everything lives in memory only.
    pub snapshot_path: Option<PathBuf>,
    /// Load the demo catalog when no snapshot exists.
    pub seed_demo: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Where invoice documents are written. Default: `<data dir>/bills`.
    pub dir: Option<PathBuf>,
}

// =============================================================================
// ServerConfig
// =============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub store: StoreSection,
    pub server: ServerSection,
    pub billing: BillingSection,
    pub data: DataSection,
    pub export: ExportSection,
}

impl ServerConfig {
    /// Loads defaults, then the config file, then `CAPITAL_*` overrides.
    ///
    /// ## File Resolution
    /// - `explicit` (from `--config`) must exist
    /// - otherwise `CAPITAL_CONFIG`, which must exist when set
    /// - otherwise the platform config dir, silently skipped when absent
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok();

        let (path, required) = match explicit {
            Some(path) => (Some(path.to_path_buf()), true),
            None => match env("CAPITAL_CONFIG") {
                Some(path) => (Some(PathBuf::from(path)), true),
                None => (
                    project_dirs().map(|d| d.config_dir().join("capital.toml")),
                    false,
                ),
            },
        };

        let mut config = match path {
            Some(path) if required || path.exists() => {
                info!(path = %path.display(), "Loading config file");
                ServerConfig::from_file(&path)?
            }
            _ => {
                debug!("No config file, using defaults");
                ServerConfig::default()
            }
        };

        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ServerConfig::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Applies `CAPITAL_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `CAPITAL_STORE_NAME`
    /// - `CAPITAL_BIND_ADDR`, `CAPITAL_PORT`
    /// - `CAPITAL_ROUND_TO_RUPEE`
    /// - `CAPITAL_SNAPSHOT_PATH`, `CAPITAL_SEED_DEMO`
    /// - `CAPITAL_EXPORT_DIR`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("CAPITAL_STORE_NAME") {
            self.store.name = name;
        }
        if let Some(addr) = lookup("CAPITAL_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(port) = lookup("CAPITAL_PORT") {
            self.server.port = parse_value("CAPITAL_PORT", &port)?;
        }
        if let Some(flag) = lookup("CAPITAL_ROUND_TO_RUPEE") {
            self.billing.round_to_rupee = parse_bool("CAPITAL_ROUND_TO_RUPEE", &flag)?;
        }
        if let Some(path) = lookup("CAPITAL_SNAPSHOT_PATH") {
            self.data.snapshot_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("CAPITAL_SEED_DEMO") {
            self.data.seed_demo = parse_bool("CAPITAL_SEED_DEMO", &flag)?;
        }
        if let Some(dir) = lookup("CAPITAL_EXPORT_DIR") {
            self.export.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = parse_value("server.bind_addr", &self.server.bind_addr)?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn store_header(&self) -> StoreHeader {
        StoreHeader {
            name: self.store.name.clone(),
            address: self.store.address.clone(),
            currency_symbol: self.store.currency_symbol.clone(),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new().seed_demo(self.data.seed_demo);
        match &self.data.snapshot_path {
            Some(path) => config.snapshot_path(path),
            None => config,
        }
    }

    /// Invoice export directory.
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export.dir {
            return dir.clone();
        }
        project_dirs()
            .map(|d| d.data_dir().join("bills"))
            .unwrap_or_else(|| PathBuf::from("bills"))
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
