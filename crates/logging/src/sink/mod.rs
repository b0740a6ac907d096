use std::io::{self, Write};

use crate::diagnostic::Diagnostic;
use crate::program_name::ProgramName;

/// Streaming sink that renders [`Diagnostic`] values into an [`io::Write`] target.
///
/// The sink owns the writer together with the [`ProgramName`] each attributed
/// diagnostic is prefixed with. Each call to [`write`](Self::write) renders one
/// diagnostic followed by a newline.
///
/// ```
/// use logging::{Diagnostic, DiagnosticSink, ProgramName};
///
/// let mut sink = DiagnosticSink::new(Vec::new(), ProgramName::default());
/// sink.write(&Diagnostic::bare("usage: tcp source target"))?;
/// assert_eq!(sink.into_inner(), b"usage: tcp source target\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct DiagnosticSink<W> {
    writer: W,
    program: ProgramName,
}

impl<W> DiagnosticSink<W> {
    /// Creates a sink writing into `writer` on behalf of `program`.
    #[must_use]
    pub fn new(writer: W, program: ProgramName) -> Self {
        Self { writer, program }
    }

    /// Returns the program name diagnostics are attributed to.
    #[must_use]
    pub const fn program(&self) -> &ProgramName {
        &self.program
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink<W> {
    /// Writes a single diagnostic and flushes the writer.
    pub fn write(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        diagnostic.render(&self.program, &mut self.writer)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
