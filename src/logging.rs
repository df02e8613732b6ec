//! Logging setup shared by the binaries.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter directives for the configurator, e.g. `M22_LOG=debug`.
pub const LOG_ENV: &str = "M22_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr `fmt` subscriber. `verbose` forces `debug`; otherwise the
/// filter comes from `M22_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("initialising logging: {err}"))
}
