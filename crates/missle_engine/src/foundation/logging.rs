//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Defaults to `info` unless `RUST_LOG` says otherwise.
pub fn init() {
    init_with_default_filter("info");
}

/// Initialize the logging system with a fallback filter used when `RUST_LOG`
/// is not set
pub fn init_with_default_filter(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .init();
}
