//! Error type shared by all transfer strategies.

use std::fmt;
use std::io;

/// System-level operation that failed while transferring bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TransferOperation {
    /// Reading from the source descriptor.
    Read,
    /// Writing to the target descriptor, including short writes.
    Write,
    /// Resizing the target to the captured source length.
    Resize,
    /// Mapping a chunk of the source.
    SourceMap,
    /// Mapping a chunk of the target.
    TargetMap,
}

impl TransferOperation {
    /// Returns the diagnostic prefix reported for this operation.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Read => "read error",
            Self::Write => "write error",
            Self::Resize => "target resize error",
            Self::SourceMap => "source mmap error",
            Self::TargetMap => "target mmap error",
        }
    }
}

impl fmt::Display for TransferOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A transfer failed in the named [`TransferOperation`].
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {source}")]
pub struct TransferError {
    operation: TransferOperation,
    source: io::Error,
}

impl TransferError {
    /// Wraps an I/O error raised by `operation`.
    pub const fn new(operation: TransferOperation, source: io::Error) -> Self {
        Self { operation, source }
    }

    /// Reports a write that accepted fewer bytes than requested.
    pub fn short_write(requested: usize, written: usize) -> Self {
        Self::new(
            TransferOperation::Write,
            io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write ({written} of {requested} bytes)"),
            ),
        )
    }

    /// Returns the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> TransferOperation {
        self.operation
    }

    /// Returns the underlying I/O error.
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.source
    }
}

/// Extension trait for tagging I/O results with the operation that produced them.
pub(crate) trait IoResultExt<T> {
    fn during(self, operation: TransferOperation) -> Result<T, TransferError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn during(self, operation: TransferOperation) -> Result<T, TransferError> {
        self.map_err(|error| TransferError::new(operation, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation_and_reason() {
        let error = TransferError::new(
            TransferOperation::SourceMap,
            io::Error::new(io::ErrorKind::InvalidInput, "bad offset"),
        );
        assert_eq!(error.to_string(), "source mmap error: bad offset");
        assert_eq!(error.operation(), TransferOperation::SourceMap);
    }

    #[test]
    fn short_write_reports_counts() {
        let error = TransferError::short_write(4096, 100);
        assert_eq!(error.operation(), TransferOperation::Write);
        assert_eq!(error.io_error().kind(), io::ErrorKind::WriteZero);
        let display = error.to_string();
        assert!(display.starts_with("write error"));
        assert!(display.contains("100 of 4096"));
    }

    #[test]
    fn resize_prefix_matches_diagnostic() {
        assert_eq!(TransferOperation::Resize.to_string(), "target resize error");
    }
}
