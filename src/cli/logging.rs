use std::io;

use colored::control::ShouldColorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr logger. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose { "ann=debug" } else { "ann=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second initialization (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_ansi(ShouldColorize::from_env().should_colorize())
                .compact(),
        )
        .try_init();
}
