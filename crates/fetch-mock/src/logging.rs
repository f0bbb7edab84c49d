//! Tracing setup for test binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init_logging(default_filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_test_writer()
        .compact()
        .finish();

    // Another thread may have won the race since the check above.
    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::debug!("fetch-mock logging initialized");
}

