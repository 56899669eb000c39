//! Logging infrastructure for the clinic scheduler.
//!
//! Provides centralized tracing setup for all binaries.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging with sensible defaults
///
/// Environment-based filtering (RUST_LOG), compact format. Default level
/// is WARN so storage diagnostics surface without drowning CLI output.
pub fn init() {
    init_with_level("warn")
}

/// Initialize logging with a specific default level
///
/// Can still be overridden by the RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
