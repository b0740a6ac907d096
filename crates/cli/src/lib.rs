#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front-end of `tcp`. The command
//! takes exactly two operands, `source` and `target`, and recognises no
//! options: every argument, including ones that start with `-`, is an operand.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with a handle for
//! standard error and returns the process exit code. A
//! [`clap`](https://docs.rs/clap/) command with its help and version flags
//! disabled performs the operand parse. Transfers are delegated to
//! [`engine::LocalCopy`] built with the strategy compiled into this binary.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as exit code `1` and a single
//!   diagnostic line on the error stream.
//! - Exactly two arguments after the program name are accepted, and each is
//!   taken verbatim. A literal `--` is an operand like any other.
//! - Diagnostics are prefixed with the invoked program name taken from the
//!   first argument, passed explicitly to the [`logging::DiagnosticSink`].
//! - Nothing is written on success.
//!
//! # Examples
//!
//! ```
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["tcp", "only-one-operand"], &mut stderr);
//!
//! assert_eq!(exit_code, engine::ExitCode::Failure);
//! assert_eq!(stderr, b"usage: tcp source target\n");
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use engine::{ExitCode, LocalCopy, LocalCopyRequest};
use logging::{
    DEFAULT_PROGRAM_NAME, Diagnostic, DiagnosticSink, ProgramName, VerbosityConfig, init_tracing,
};
use tracing::debug;

/// Operands produced by [`parse_args`].
#[derive(Debug, Eq, PartialEq)]
struct ParsedArgs {
    source: OsString,
    target: OsString,
}

/// Marker placed ahead of the user's arguments so clap treats every one of
/// them, including a literal `--`, as a positional value.
const END_OF_OPTIONS: &str = "--";

fn command() -> Command {
    Command::new(DEFAULT_PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("operands")
                .num_args(0..)
                .action(ArgAction::Append)
                .allow_hyphen_values(true)
                .value_parser(OsStringValueParser::new()),
        )
}

fn parse_args(args: Vec<OsString>) -> Result<ParsedArgs, clap::Error> {
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| OsString::from(DEFAULT_PROGRAM_NAME));
    let argv = [program, OsString::from(END_OF_OPTIONS)]
        .into_iter()
        .chain(args);

    let mut matches = command().try_get_matches_from(argv)?;
    let operands: Vec<OsString> = matches
        .remove_many::<OsString>("operands")
        .map(|values| values.collect())
        .unwrap_or_default();

    match <[OsString; 2]>::try_from(operands) {
        Ok([source, target]) => Ok(ParsedArgs { source, target }),
        Err(_) => Err(clap::Error::new(clap::error::ErrorKind::WrongNumberOfValues)),
    }
}

/// Renders the one-line usage message.
fn usage(program: &ProgramName) -> Diagnostic {
    Diagnostic::bare(format!("usage: {program} source target"))
}

/// Runs the CLI using the provided argument iterator and error stream.
///
/// The first argument is the program name. Returns [`ExitCode::Ok`] after a
/// successful copy and [`ExitCode::Failure`] after any failure, which is
/// reported on `stderr`.
pub fn run<I, S, Err>(arguments: I, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Err: Write,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(DEFAULT_PROGRAM_NAME));
    }

    init_tracing(VerbosityConfig::default());

    let program = ProgramName::from_argv0(&args[0]);
    let mut sink = DiagnosticSink::new(stderr, program);

    match parse_args(args) {
        Ok(parsed) => execute(parsed, &mut sink),
        Err(error) => {
            debug!(target: "tcp::copy", kind = ?error.kind(), "operand parse failed");
            let message = usage(sink.program());
            report(&mut sink, &message);
            ExitCode::Failure
        }
    }
}

fn execute<Err: Write>(parsed: ParsedArgs, sink: &mut DiagnosticSink<Err>) -> ExitCode {
    let request = LocalCopyRequest::new(parsed.source, parsed.target);

    match LocalCopy::with_default_strategy().execute(&request) {
        Ok(summary) => {
            debug!(
                target: "tcp::copy",
                destination = %summary.destination().display(),
                bytes = summary.bytes_copied(),
                strategy = summary.strategy(),
                "copied"
            );
            ExitCode::Ok
        }
        Err(error) => {
            debug!(target: "tcp::copy", category = ?error.category(), "copy failed");
            report(sink, &Diagnostic::from_error(&error));
            error.exit_code()
        }
    }
}

fn report<Err: Write>(sink: &mut DiagnosticSink<Err>, diagnostic: &Diagnostic) {
    if sink.write(diagnostic).is_err() {
        // The error stream itself failed; there is nowhere left to report to.
        debug!(target: "tcp::copy", "diagnostic could not be written");
    }
}
