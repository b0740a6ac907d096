//! Process exit status for a copy run.

/// Exit codes returned by `tcp`.
///
/// Every failure, whatever its category, exits with [`ExitCode::Failure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// The copy completed.
    Ok = 0,

    /// Usage, validation or I/O failure.
    Failure = 1,
}

impl ExitCode {
    /// Returns the numeric process status.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(u8::try_from(code.as_i32()).unwrap_or(u8::MAX))
    }
}
