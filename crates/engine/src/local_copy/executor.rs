use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use fast_io::{CopyStrategy, DefaultStrategy, close_file};
use tracing::debug;

use super::error::{LocalCopyError, LocalCopyErrorKind};
use super::resolve::resolve_target;
use super::source::{FileIdentity, SourceFile};

/// Operands of a single copy: a source path and the raw target argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocalCopyRequest {
    source: PathBuf,
    target: OsString,
}

impl LocalCopyRequest {
    /// Creates a request from the two operands.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<OsString>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// The source operand.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The unresolved target operand.
    #[must_use]
    pub fn target(&self) -> &std::ffi::OsStr {
        &self.target
    }
}

/// Outcome of a completed copy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CopySummary {
    destination: PathBuf,
    bytes_copied: u64,
    strategy: &'static str,
}

impl CopySummary {
    /// The resolved path that was written.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of bytes transferred.
    #[must_use]
    pub const fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Name of the strategy that moved the bytes.
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        self.strategy
    }
}

/// Copy driver parameterised by its transfer strategy.
///
/// [`LocalCopy::with_default_strategy`] uses the [`DefaultStrategy`] compiled
/// into this build; [`LocalCopy::new`] accepts any other [`CopyStrategy`].
#[derive(Clone, Debug)]
pub struct LocalCopy<S = DefaultStrategy> {
    strategy: S,
}

impl LocalCopy<DefaultStrategy> {
    /// Creates a driver using the strategy selected at build time.
    pub const fn with_default_strategy() -> Self {
        Self {
            strategy: DefaultStrategy::new(),
        }
    }
}

impl Default for LocalCopy<DefaultStrategy> {
    fn default() -> Self {
        Self::with_default_strategy()
    }
}

impl<S: CopyStrategy> LocalCopy<S> {
    /// Creates a driver that transfers bytes with `strategy`.
    pub const fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns the configured strategy.
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Copies `request.source()` to the path resolved from `request.target()`.
    pub fn execute(&self, request: &LocalCopyRequest) -> Result<CopySummary, LocalCopyError> {
        let source = SourceFile::inspect(request.source())?;

        let destination = resolve_target(source.path(), request.target()).map_err(|error| {
            debug!(target: "tcp::resolve", %error, "target rejected");
            LocalCopyErrorKind::InvalidTarget(error)
        })?;
        debug!(
            target: "tcp::copy",
            source = %source.path().display(),
            destination = %destination.display(),
            strategy = self.strategy.name(),
            "resolved copy"
        );

        ensure_distinct(&source, &destination)?;

        let source_file = File::open(source.path()).map_err(LocalCopyErrorKind::SourceOpen)?;
        let target_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .mode(source.mode())
            .open(&destination)
            .map_err(LocalCopyErrorKind::TargetOpen)?;

        let bytes_copied = self
            .strategy
            .transfer(&source_file, &target_file, &source.info())?;

        close_file(source_file).map_err(LocalCopyErrorKind::SourceClose)?;
        close_file(target_file).map_err(LocalCopyErrorKind::TargetClose)?;

        debug!(target: "tcp::copy", bytes_copied, "copy complete");
        Ok(CopySummary {
            destination,
            bytes_copied,
            strategy: self.strategy.name(),
        })
    }
}

/// Rejects a destination that already exists as the same inode as the source.
fn ensure_distinct(source: &SourceFile, destination: &Path) -> Result<(), LocalCopyError> {
    match fs::metadata(destination) {
        Ok(metadata) if FileIdentity::of(&metadata) == source.identity() => {
            Err(LocalCopyErrorKind::SameFile.into())
        }
        _ => Ok(()),
    }
}
