//! Logging init: tracing to stderr with env-filter control.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr. The host agent owns log routing
/// (journald, files), so this crate never writes log files itself.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rolegrant=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
