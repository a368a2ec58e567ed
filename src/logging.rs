//! Diagnostic logging setup for the binary

use std::env;
use std::io;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `debug` or `treescribe=info`.
pub const LOG_ENV: &str = "TREESCRIBE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber. Stdout stays reserved for the tree.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging() {
    let filter = env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let filter_layer = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .try_init();
}
