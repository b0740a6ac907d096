//! Installs the process-wide tracing subscriber.
//!
//! Events are formatted on stderr without timestamps, keeping the event
//! target (`tcp::resolve`, `tcp::copy`, `tcp::transfer`) so instrumentation
//! can be told apart from diagnostics. The level comes from the supplied
//! [`VerbosityConfig`]; the environment is never consulted.

use crate::config::VerbosityConfig;

/// Initialize tracing with the given verbosity configuration.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left untouched.
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(VerbosityConfig::default());
/// tracing::debug!(target: "tcp::copy", "copying file");
/// ```
pub fn init_tracing(config: VerbosityConfig) -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.level())
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok()
}
