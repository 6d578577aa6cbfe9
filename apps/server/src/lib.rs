//! # Capital Server
//!
//! HTTP API for the Capital clothing-store billing system.
//!
//! ## Module Organization
//! ```text
//! capital_server/
//! ├── commands/   ◄─── axum handlers, one file per area
//! ├── state/      ◄─── AppState, counter cart, config, export registry
//! ├── error.rs    ◄─── ApiError (StoreError / CoreError → HTTP status)
//! ├── export.rs   ◄─── DocumentExporter + background export task
//! └── notify.rs   ◄─── NotificationDispatcher (WhatsApp share links)
//! ```
//!
//! ## Startup
//! ```text
//! main ──► init_tracing ──► ServerConfig::load ──► serve
//!                                                    │
//!            Store::open (snapshot or demo seed) ◄───┤
//!            TcpListener::bind(server.bind_addr) ◄───┤
//!            axum::serve + graceful shutdown     ◄───┤
//!            final snapshot save                 ◄───┘
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod notify;
pub mod state;

use axum::Router;
use capital_store::{Store, StoreError};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::state::{AppState, ConfigError, ServerConfig};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Console logging filtered by `RUST_LOG`; defaults to `info` with debug
/// output from the capital crates.
///
/// Safe to call twice; the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,capital=debug"));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}

/// The full application with request tracing.
pub fn router(state: AppState) -> Router {
    commands::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the store and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    let addr = config.socket_addr()?;
    let store = Store::open(config.store_config()).await?;
    let state = AppState::new(store.clone(), config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Capital billing server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Writes made while persisting was failing get one more chance
    if let Err(e) = store.save_snapshot().await {
        error!(error = %e, "Final snapshot save failed");
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
