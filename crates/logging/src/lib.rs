#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the two output channels used by `tcp`:
//!
//! - user-facing diagnostics, rendered by [`DiagnosticSink`] as single lines
//!   prefixed with the invoking [`ProgramName`]
//! - developer-facing instrumentation, emitted through the `tracing` macros and
//!   installed by [`init_tracing`] according to a [`VerbosityConfig`]
//!
//! # Design
//!
//! The program name is an explicit value handed to the sink when it is
//! constructed. Nothing in this crate keeps process-wide program state, so a
//! sink writing into a `Vec<u8>` in a test renders exactly what the binary
//! writes to stderr.
//!
//! # Examples
//!
//! ```
//! use logging::{Diagnostic, DiagnosticSink, ProgramName};
//!
//! let program = ProgramName::from_argv0("/usr/local/bin/tcp");
//! let mut sink = DiagnosticSink::new(Vec::new(), program);
//! sink.write(&Diagnostic::new("source and target are the same file"))?;
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "tcp: source and target are the same file\n");
//! # Ok::<(), std::io::Error>(())
//! ```

mod config;
mod diagnostic;
mod program_name;
mod sink;
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use diagnostic::Diagnostic;
pub use program_name::{DEFAULT_PROGRAM_NAME, ProgramName};
pub use sink::DiagnosticSink;
pub use tracing_bridge::init_tracing;
