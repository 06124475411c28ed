//! Logging setup.
//!
//! Library code logs through `tracing` spans and events and through the `log`
//! macros (the config loader). One subscriber on stderr receives both, so
//! report output on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directive for a `-v` count: 0 warn, 1 info, 2 debug, 3+ trace.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when set. Calling this twice is
/// harmless; the second install is ignored.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_for_verbosity(verbosity)))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
