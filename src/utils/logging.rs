//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env};

/// Setup logging for the process.
///
/// `RUST_LOG` wins over `default_level`. Safe to call more than once; later
/// calls are ignored.
pub fn setup_logging(default_level: &str) {
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .try_init();
}
