use std::fmt;
use std::io::{self, Write};

use crate::program_name::ProgramName;

/// A single user-facing diagnostic line.
///
/// Most diagnostics are attributed to the program (`tcp: target path is
/// invalid`). Usage text is rendered bare, since it already names the program.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    text: String,
    attributed: bool,
}

impl Diagnostic {
    /// Creates a diagnostic prefixed with the program name when rendered.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributed: true,
        }
    }

    /// Creates a diagnostic rendered without the program-name prefix.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributed: false,
        }
    }

    /// Creates a diagnostic from an error's display form.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        Self::new(error.to_string())
    }

    /// The message text without any prefix.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn render<W: Write>(&self, program: &ProgramName, writer: &mut W) -> io::Result<()> {
        if self.attributed {
            write!(writer, "{program}: ")?;
        }
        writer.write_all(self.text.as_bytes())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
