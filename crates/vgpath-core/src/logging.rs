//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global fmt subscriber.
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_FILTER`]. Panics if a global
/// subscriber was already installed; use [`try_init`] where that can happen.
pub fn init() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Install a global fmt subscriber, ignoring an already installed one.
///
/// Intended for tests, where every test binary may race to initialize logging.
pub fn try_init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}
