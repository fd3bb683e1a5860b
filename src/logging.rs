//! Tracing subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or to whoever embeds the library).

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::AlignError;

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr so they never mix with aligned output on stdout.
///
/// # Errors
/// Returns [`AlignError::InvalidLogLevel`] if the configured level is not a
/// valid filter directive, even when `RUST_LOG` overrides it.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AlignError> {
    let configured =
        EnvFilter::try_new(&config.level).map_err(|source| AlignError::InvalidLogLevel {
            level: config.level.clone(),
            source,
        })?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(configured);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    Ok(())
}
