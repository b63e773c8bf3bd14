//! Diagnostic logging on stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,mintforge=info";

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

pub fn init_with_filter(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}
