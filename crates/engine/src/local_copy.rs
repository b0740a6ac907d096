//! # Overview
//!
//! Implements the single-file copy performed by `tcp`. A
//! [`LocalCopyRequest`] carries the source path and the raw target operand;
//! [`LocalCopy::execute`] runs the whole pipeline:
//!
//! 1. [`SourceFile::inspect`] requires the source to be a regular file and
//!    captures its size, block-size hint, mode and identity.
//! 2. [`resolve_target`] turns the target operand into a concrete file path,
//!    appending the source's file name when the target is a directory.
//! 3. The resolved path is compared against the source by device and inode;
//!    copying a file onto itself is refused before anything is opened.
//! 4. The source is opened read-only and the target read-write, created with
//!    the source's permission bits or truncated if it already exists.
//! 5. The configured [`CopyStrategy`](fast_io::CopyStrategy) moves the bytes,
//!    then both descriptors are closed with their `close(2)` result checked.
//!
//! # Invariants
//!
//! - Source and target never refer to the same inode.
//! - A resolved target path is never empty and never longer than
//!   [`MAX_PATH_LEN`] bytes.
//! - Failures are terminal. A target that was partially written before an I/O
//!   error is left on disk.
//!
//! # Examples
//!
//! ```
//! use engine::{LocalCopy, LocalCopyRequest};
//!
//! let temp = tempfile::tempdir().unwrap();
//! let source = temp.path().join("a.txt");
//! std::fs::write(&source, b"hello").unwrap();
//!
//! let request = LocalCopyRequest::new(&source, temp.path().join("out"));
//! let summary = LocalCopy::with_default_strategy().execute(&request).unwrap();
//!
//! assert_eq!(summary.bytes_copied(), 5);
//! assert_eq!(std::fs::read(summary.destination()).unwrap(), b"hello");
//! ```

mod error;
mod executor;
mod resolve;
mod source;

pub use error::{ErrorCategory, LocalCopyError, LocalCopyErrorKind};
pub use executor::{CopySummary, LocalCopy, LocalCopyRequest};
pub use resolve::{MAX_PATH_LEN, ResolveError, resolve_target};
pub use source::{FileIdentity, SourceFile};
