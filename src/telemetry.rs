//! Logging setup for the binary.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Installs the global subscriber, writing to stderr so `analyze` output on
/// stdout stays clean JSON.
///
/// Filter directives come from `OUTLOOK_LOG`, falling back to `outlook=info`.
/// Useful targets:
/// - `outlook::api` for request, rejection and server lifecycle events
/// - `outlook::core` for pipeline stage events; `debug` shows population size,
///   quantiles and histogram occupancy per pass
///
/// e.g. `OUTLOOK_LOG=outlook::api=info,outlook::core=debug`. Only the first
/// call installs anything.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("OUTLOOK_LOG").unwrap_or_else(|_| EnvFilter::new("outlook=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
