//! Verbosity configuration for tracing instrumentation.

use tracing::level_filters::LevelFilter;

/// Maximum level of `tracing` events recorded by [`init_tracing`](crate::init_tracing).
///
/// The default records warnings and errors only, so an ordinary run prints
/// nothing beyond its diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerbosityConfig {
    level: LevelFilter,
}

impl VerbosityConfig {
    /// Returns the configured level filter.
    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Default for VerbosityConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}
