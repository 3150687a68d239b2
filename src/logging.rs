//! Diagnostic logging. Output goes to stderr so it never mixes with tables
//! or exported data on stdout.

use tracing_subscriber::EnvFilter;

/// Env var holding the filter directive, e.g. `checkdesk=debug`.
pub const LOG_ENV: &str = "CHECKDESK_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
