use std::io;

use fast_io::TransferError;

use super::resolve::ResolveError;
use crate::exit_code::ExitCode;

/// Broad classification of a failed copy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorCategory {
    /// The operands were rejected before any file was opened.
    Validation,
    /// A system call failed while opening, transferring or closing.
    Io,
}

/// Error produced when a local copy fails.
///
/// The display form is the one-line diagnostic shown to the user. Target
/// resolution failures all render as `target path is invalid`; the precise
/// [`ResolveError`] stays reachable through [`LocalCopyErrorKind::InvalidTarget`]
/// and [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct LocalCopyError(#[from] LocalCopyErrorKind);

/// The specific failure behind a [`LocalCopyError`].
#[derive(Debug, thiserror::Error)]
pub enum LocalCopyErrorKind {
    /// The source exists but is not a regular file.
    #[error("source is not a regular file")]
    SourceNotRegular,

    /// The source's status could not be queried.
    #[error("source is not a regular file: {0}")]
    SourceStatus(#[source] io::Error),

    /// The target operand could not be resolved to a file path.
    #[error("target path is invalid")]
    InvalidTarget(#[source] ResolveError),

    /// Source and resolved target share device and inode.
    #[error("source and target are the same file")]
    SameFile,

    /// Opening the source for reading failed.
    #[error("source open error: {0}")]
    SourceOpen(#[source] io::Error),

    /// Opening or creating the target failed.
    #[error("target open error: {0}")]
    TargetOpen(#[source] io::Error),

    /// The copy strategy failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Closing the source descriptor failed.
    #[error("source close error: {0}")]
    SourceClose(#[source] io::Error),

    /// Closing the target descriptor failed.
    #[error("target close error: {0}")]
    TargetClose(#[source] io::Error),
}

impl LocalCopyError {
    /// Returns the specific failure.
    #[must_use]
    pub const fn kind(&self) -> &LocalCopyErrorKind {
        &self.0
    }

    /// Returns the broad category of the failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            LocalCopyErrorKind::SourceNotRegular
            | LocalCopyErrorKind::SourceStatus(_)
            | LocalCopyErrorKind::InvalidTarget(_)
            | LocalCopyErrorKind::SameFile => ErrorCategory::Validation,
            LocalCopyErrorKind::SourceOpen(_)
            | LocalCopyErrorKind::TargetOpen(_)
            | LocalCopyErrorKind::Transfer(_)
            | LocalCopyErrorKind::SourceClose(_)
            | LocalCopyErrorKind::TargetClose(_) => ErrorCategory::Io,
        }
    }

    /// Returns the process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }
}

impl From<TransferError> for LocalCopyError {
    fn from(error: TransferError) -> Self {
        Self(LocalCopyErrorKind::Transfer(error))
    }
}
