#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! Copy driver for `tcp`.
//!
//! [`local_copy`] turns a source path and a raw target operand into a
//! concrete destination, refuses to copy a file onto itself, opens both
//! descriptors and hands them to a [`fast_io::CopyStrategy`]. [`exit_code`]
//! maps the outcome onto the process status.

pub mod exit_code;
pub mod local_copy;

pub use exit_code::ExitCode;
pub use local_copy::{
    CopySummary, ErrorCategory, FileIdentity, LocalCopy, LocalCopyError, LocalCopyErrorKind,
    LocalCopyRequest, MAX_PATH_LEN, ResolveError, SourceFile, resolve_target,
};
