//! Logging setup
//!
//! Logs go to stderr so stdout stays reserved for CSV output. `RUST_LOG`
//! takes precedence over the level passed on the command line.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
