//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `crate_name` (binary names may use
/// hyphens, which are converted to the module form) and `tower_http` are
/// logged at `default_level`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn setup_logger(crate_name: &str, default_level: &str) {
    let target = crate_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{target}={default_level},parlor_server={default_level},tower_http={default_level}"
        ))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init();
}
