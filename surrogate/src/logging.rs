//! Test logging setup.
//!
//! Registration and teardown emit `tracing` events under the `surrogate`
//! target, import resolution under `surrogate_core`. Call
//! [`init_test_logging`] at the start of a test to see them; `RUST_LOG`
//! overrides the level derived from the configuration.

use crate::config::SurrogateConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a verbosity level.
pub fn default_directive(verbose: u32) -> &'static str {
    match verbose {
        0 => "surrogate=warn,surrogate_core=warn",
        1 => "surrogate=debug,surrogate_core=debug",
        _ => "surrogate=trace,surrogate_core=trace",
    }
}

/// Install a compact test-writer subscriber.
///
/// Safe to call from every test: only the first call installs a
/// subscriber, later calls return `false`.
pub fn init_test_logging(config: &SurrogateConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok()
}
