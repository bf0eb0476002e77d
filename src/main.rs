//! nexus-auth - Entry Point
//!
//! Opens the configured storage partition and runs the console shell on
//! stdin/stdout. An optional first argument names a config file.

use log::{error, info};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{BufReader, stdin, stdout};

use nexus_auth::shell::run_shell;
use nexus_auth::utils::setup_logging;
use nexus_auth::{AuthConfig, AuthGateway, FileStorage};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => AuthConfig::load_from(Path::new(&path), true),
        None => AuthConfig::load(),
    };

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the config, so report this one directly
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    setup_logging(&config.log_level);
    info!("Launching nexus-auth...");

    let storage = match FileStorage::open(config.storage_path()) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            error!("Failed to open storage at {}: {}", config.storage_dir, e);
            return ExitCode::FAILURE;
        }
    };

    let gateway = AuthGateway::new(storage, config);

    if let Err(e) = run_shell(&gateway, BufReader::new(stdin()), stdout()).await {
        error!("Shell terminated: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
