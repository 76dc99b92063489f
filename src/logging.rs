//! Logging setup: tracing with an env-filter, writing to stderr.
//!
//! Diagnostics go to standard error so stdout carries nothing but the run
//! report.

use crate::error::BundleError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable honored for filter directives.
pub const LOG_ENV_VAR: &str = "BUNDLESUM_LOG";

/// Initialize the logging system.
///
/// Precedence: `BUNDLESUM_LOG` directives, then `--log-level`, then
/// `--verbose`, then the "info" default.
pub fn init_logging(level: Option<&str>, verbose: bool) -> Result<(), BundleError> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => {
            let level = match level {
                Some(level) => level,
                None if verbose => "debug",
                None => "info",
            };
            EnvFilter::try_new(level)
                .map_err(|e| BundleError::Usage(format!("invalid log level {:?}: {}", level, e)))?
        }
    };

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    Ok(())
}
