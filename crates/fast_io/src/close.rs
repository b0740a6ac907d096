//! Checked descriptor close.
//!
//! Dropping a [`File`] discards any error reported by `close(2)`. Deferred
//! write-back failures (NFS, quota) can surface only there, so the copy driver
//! closes both descriptors explicitly and reports the result.

use std::fs::File;
use std::io;
use std::os::fd::IntoRawFd;

/// Closes `file`, returning the error reported by `close(2)`, if any.
pub fn close_file(file: File) -> io::Result<()> {
    let fd = file.into_raw_fd();
    // SAFETY: `into_raw_fd` transferred ownership of the descriptor to us and
    // nothing else refers to it, so it is closed exactly once.
    let result = unsafe { libc::close(fd) };
    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
