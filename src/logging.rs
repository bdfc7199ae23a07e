//! Logging initialization.
//!
//! Progress meant for the user goes to stdout through [`crate::output`].
//! Internal diagnostics use `tracing` and go to stderr, so the two never mix.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` with `verbose`, `warn` without.
/// Calling it twice is harmless (the second call is ignored).
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
