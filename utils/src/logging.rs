//! Structured logging initialization via `tracing`.

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_level` applies when it is unset.
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
