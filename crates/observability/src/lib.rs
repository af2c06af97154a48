//! Shared tracing/logging setup for the scrawl binaries.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide logging.
///
/// JSON-formatted events, filtered via `RUST_LOG` (default `info`). Safe to
/// call multiple times; subsequent calls are no-ops, which keeps test
/// binaries that each spawn the app from fighting over the global
/// subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
