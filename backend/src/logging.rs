//! Logger setup for binaries and UIs embedding the backend.

use env_logger::Env;

/// Install `env_logger`. `RUST_LOG` takes precedence over `default_level`.
///
/// Returns false if a logger was already installed.
pub fn init_logging(default_level: &str) -> bool {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
