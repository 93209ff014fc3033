//! Helpers shared by the command line tools.

use tracing_subscriber::EnvFilter;

/// Log to stderr so that stdout only carries the run summary.
///
/// `default` is the filter used when `RUST_LOG` is not set.
pub fn init_tracing(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
