//! Logging setup for binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! left to the executable.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,realm_tracker=debug";

/// Install a stderr `tracing` subscriber.
///
/// Log levels are controlled by `RUST_LOG`, falling back to
/// `default_filter`. Logs go to stderr so they don't interleave with the
/// roster printed on stdout. Calling this twice is harmless: the second
/// install is ignored.
pub fn setup_logging(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
