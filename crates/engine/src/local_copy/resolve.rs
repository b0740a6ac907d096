//! Target path resolution.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Longest resolved target path accepted, in bytes.
pub const MAX_PATH_LEN: usize = libc::PATH_MAX as usize;

/// Reason a target operand could not be resolved.
///
/// Callers report every variant to the user as the same generic
/// "target path is invalid" diagnostic. The variants exist so the cause can
/// be logged and tested.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The target operand is the empty string.
    #[error("target path is empty")]
    Empty,

    /// Querying the target's status failed for a reason other than absence.
    #[error("cannot query target status: {0}")]
    Status(#[source] io::Error),

    /// The target is a directory but the source path has no file name to append.
    #[error("source path has no file name")]
    NoFileName,

    /// The resolved path does not fit the platform path-length bound.
    #[error("resolved target path is {len} bytes, exceeding the {max}-byte limit")]
    TooLong {
        /// Length the resolved path would have had.
        len: usize,
        /// The bound that was exceeded.
        max: usize,
    },

    /// The target exists but is neither a directory nor a regular file.
    #[error("target is neither a directory nor a regular file")]
    UnsupportedType,
}

/// Computes the destination file path for copying `source` to `target`.
///
/// - A target that does not exist is returned verbatim; it will be created.
/// - An existing regular file is returned verbatim; it will be truncated.
/// - An existing directory yields `target/<file name of source>`. No extra
///   separator is inserted when `target` already ends in `/`.
/// - Anything else (device, socket, FIFO) is rejected.
///
/// Status queries follow symbolic links. A status failure other than "not
/// found" (permission denied, a non-directory path prefix, name too long) is
/// rejected as [`ResolveError::Status`] rather than treated as creatable.
///
/// ```
/// use engine::resolve_target;
/// use std::ffi::OsStr;
/// use std::path::Path;
///
/// let dir = tempfile::tempdir().unwrap();
/// let with_slash = format!("{}/", dir.path().display());
///
/// let resolved = resolve_target(Path::new("docs/a.txt"), OsStr::new(&with_slash)).unwrap();
/// assert_eq!(resolved, dir.path().join("a.txt"));
///
/// let resolved = resolve_target(Path::new("docs/a.txt"), dir.path().as_os_str()).unwrap();
/// assert_eq!(resolved, dir.path().join("a.txt"));
/// ```
pub fn resolve_target(source: &Path, target: &OsStr) -> Result<PathBuf, ResolveError> {
    if target.is_empty() {
        return Err(ResolveError::Empty);
    }

    let resolved = match fs::metadata(target) {
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(target: "tcp::resolve", path = ?target, "target does not exist yet");
            target.to_os_string()
        }
        Err(error) => return Err(ResolveError::Status(error)),
        Ok(metadata) if metadata.is_dir() => join_file_name(source, target)?,
        Ok(metadata) if metadata.is_file() => target.to_os_string(),
        Ok(_) => return Err(ResolveError::UnsupportedType),
    };

    ensure_within_bound(resolved).map(PathBuf::from)
}

fn join_file_name(source: &Path, directory: &OsStr) -> Result<OsString, ResolveError> {
    let name = source.file_name().ok_or(ResolveError::NoFileName)?;

    let mut joined = OsString::with_capacity(directory.len() + 1 + name.len());
    joined.push(directory);
    if !has_trailing_separator(directory) {
        joined.push("/");
    }
    joined.push(name);

    debug!(target: "tcp::resolve", directory = ?directory, file_name = ?name, "target is a directory");
    Ok(joined)
}

fn ensure_within_bound(path: OsString) -> Result<OsString, ResolveError> {
    let len = path.len();
    if len > MAX_PATH_LEN {
        return Err(ResolveError::TooLong {
            len,
            max: MAX_PATH_LEN,
        });
    }
    Ok(path)
}

fn has_trailing_separator(path: &OsStr) -> bool {
    path.as_bytes().last() == Some(&b'/')
}
