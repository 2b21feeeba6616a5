//! Diagnostics on stderr; stdout carries only answers.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` overrides the default, which shows this crate's `info` events (the input file
/// being read) and only warnings from everything else.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .compact()
        .init();
}
