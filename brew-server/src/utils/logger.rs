//! Logging Infrastructure
//!
//! Structured logging via tracing-subscriber. `RUST_LOG` overrides the
//! default level.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_level("info");
}

/// Initialize the logger with a default level used when `RUST_LOG` is unset
pub fn init_logger_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
