//! Diagnostic logging on stderr

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `-v` when both are given.
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbosity))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn directive_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
