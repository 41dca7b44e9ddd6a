//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize logging with a default level
///
/// `RUST_LOG` still wins when it is set. Calling this twice is harmless; the
/// second logger is discarded.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if let Err(err) = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
    {
        log::debug!("Keeping the installed logger: {}", err);
    }
}
