//! Diagnostic logging setup.
//!
//! Failed exchanges are reported through `tracing` rather than the transcript.
//! Events go to stderr; the filter comes from `QUERYCHAT_LOG`, falling back to
//! errors only so a normal chat stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "QUERYCHAT_LOG";

const DEFAULT_FILTER: &str = "error";
const VERBOSE_FILTER: &str = "querychat=debug";

/// Builds the log filter; `verbose` wins over the environment.
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global stderr subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
