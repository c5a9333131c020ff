use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Installs the global `fmt` subscriber at `settings.log_level`.
///
/// `RUST_LOG`, when set, takes precedence. Calling this twice is harmless;
/// the second call leaves the first subscriber in place.
pub fn init(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.to_ascii_lowercase()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
