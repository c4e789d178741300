//! Tracing setup for hosting binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info` for this crate.
/// Call once at startup; a second call is a no-op so tests that share a
/// process never panic here.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("karma_core=info"));

    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
