//! Program name used to prefix diagnostics.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

/// Name reported when `argv[0]` is missing or has no file-name component.
pub const DEFAULT_PROGRAM_NAME: &str = "tcp";

/// The name a diagnostic is attributed to, derived from `argv[0]`.
///
/// Only the final path component is kept, so `/usr/bin/tcp` and `./tcp` both
/// render as `tcp`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgramName(String);

impl ProgramName {
    /// Builds the name from the first process argument.
    pub fn from_argv0(argv0: impl AsRef<OsStr>) -> Self {
        let name = Path::new(argv0.as_ref())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty());
        name.map_or_else(Self::default, Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProgramName {
    fn default() -> Self {
        Self(DEFAULT_PROGRAM_NAME.to_owned())
    }
}

impl fmt::Display for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
