//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber with env-filter support.
///
/// Intended for binaries and harnesses embedding the subsystem. The
/// filter honors `RUST_LOG` and falls back to `default_filter` when it
/// is unset. Repeated calls are no-ops, so test harnesses can call this
/// freely.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
