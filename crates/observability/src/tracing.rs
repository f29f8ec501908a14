//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Variable consulted for the filter when `RUST_LOG` is unset.
pub const LOG_ENV: &str = "STOCKROOM_LOG";

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "info";

/// Resolve the log filter directive: `RUST_LOG`, then `STOCKROOM_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn filter_directive() -> String {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .or_else(|_| std::env::var(LOG_ENV))
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_new(filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // JSON logs + timestamps.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
