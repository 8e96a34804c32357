//! Logging setup utilities for the Madang chat server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given crate targets.
///
/// `tower_http` is always included so request traces follow the same level.
pub fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| target.replace('-', "_"))
        .chain(std::iter::once("tower_http".to_string()))
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `targets` - Crate names whose events are enabled (e.g. `["madang-server"]`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use madang_shared::logger::setup_logger;
///
/// setup_logger(&["madang-server", "madang-shared"], "debug");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    let directive = default_directive(targets, default_log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| directive.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    tracing::debug!("Logger initialized (default directive: {})", directive);
}
