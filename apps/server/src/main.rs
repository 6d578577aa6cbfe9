//! # Capital Billing Server
//!
//! ```text
//! capital-server [--config <path>]
//! ```
//!
//! Configuration: see `state::config`. Logging: `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use capital_server::state::ServerConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    capital_server::init_tracing();

    let config_path = match parse_args(std::env::args().skip(1)) {
        Ok(path) => path,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: capital-server [--config <path>]");
            return ExitCode::from(2);
        }
    };

    info!("Starting Capital billing server...");

    let config = match ServerConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration failed");
            return ExitCode::FAILURE;
        }
    };
    info!(
        store = %config.store.name,
        port = config.server.port,
        round_to_rupee = config.billing.round_to_rupee,
        "Configuration loaded"
    );

    match capital_server::serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<PathBuf>, String> {
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => return Err("--config needs a path".to_string()),
            },
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(config)
}
