//! Front end of the set-algebra calculator.
//!
//! Reads one expression, evaluates it and writes either the sorted result or
//! an error marker. The whole run completes before anything is written, so a
//! failure never leaves partial output behind.

use std::io::{self, BufRead, Write};

use log::info;
use serde::Serialize;
use setc_eval::{evaluate_expression, render_snippet, Diagnostic, EvalError, SetValue};
use setc_lexer::{read_expression, Expression, InvalidInputError, ReadError};

/// Marker written to the error stream on any failure
pub const ERROR_MARKER: &str = "[error]";

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Flags that shape a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub mode: OutputMode,
    /// Exit with a non-zero status on failure instead of always `0`
    pub strict_exit: bool,
    /// Print a source snippet under the error marker
    pub verbose: bool,
}

/// Why a run failed
#[derive(Debug)]
pub enum Failure {
    InvalidInput {
        error: InvalidInputError,
        line: String,
    },
    Eval {
        error: EvalError,
        line: String,
    },
    Io(io::Error),
}

impl Failure {
    /// Status returned by `run` under `--strict-exit`
    pub fn strict_exit_code(&self) -> i32 {
        match self {
            Failure::InvalidInput { .. } => 1,
            Failure::Eval { error, .. } if !error.is_internal() => 1,
            Failure::Eval { .. } | Failure::Io(_) => 2,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Failure::InvalidInput { .. } => "invalid_input",
            Failure::Eval { error, .. } => error.kind(),
            Failure::Io(_) => "io",
        }
    }

    fn message(&self) -> String {
        match self {
            Failure::InvalidInput { error, .. } => error.to_string(),
            Failure::Eval { error, .. } => error.to_string(),
            Failure::Io(error) => format!("failed to read expression: {error}"),
        }
    }

    fn column(&self) -> Option<usize> {
        match self {
            Failure::InvalidInput { error, .. } => Some(error.column),
            Failure::Eval { error, .. } => error.column(),
            Failure::Io(_) => None,
        }
    }

    fn snippet(&self) -> Option<String> {
        match self {
            Failure::InvalidInput { error, line } => {
                Some(render_snippet(&Diagnostic::from(error), line))
            }
            Failure::Eval { error, line } => Some(render_snippet(&Diagnostic::from(error), line)),
            Failure::Io(_) => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorReport {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a [i32]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

/// Validate and evaluate one expression.
///
/// The expression comes from `argument` when given, otherwise from the first
/// line of `input`.
pub fn calculate<R: BufRead>(argument: Option<&str>, input: R) -> Result<SetValue, Failure> {
    let expression = match argument {
        Some(text) => Expression::parse(text).map_err(|error| Failure::InvalidInput {
            error,
            line: text.lines().next().unwrap_or_default().to_string(),
        })?,
        None => read_expression(input).map_err(|err| match err {
            ReadError::InvalidInput { source, line } => Failure::InvalidInput {
                error: source,
                line,
            },
            ReadError::Io(error) => Failure::Io(error),
        })?,
    };

    evaluate_expression(&expression).map_err(|error| Failure::Eval {
        error,
        line: expression.source_line().to_string(),
    })
}

/// Run one calculation and write its outcome; returns the exit status.
pub fn run<R: BufRead, W: Write, E: Write>(
    argument: Option<&str>,
    input: R,
    out: &mut W,
    err: &mut E,
    options: &RunOptions,
) -> i32 {
    let outcome = calculate(argument, input);
    let written = match &outcome {
        Ok(result) => write_result(out, result, options.mode),
        Err(failure) => {
            info!("calculation failed: {}", failure.message());
            write_failure(out, err, failure, options)
        }
    };

    if let Err(e) = written {
        info!("failed to write output: {e}");
        return if options.strict_exit { 2 } else { 0 };
    }

    match outcome {
        Err(failure) if options.strict_exit => failure.strict_exit_code(),
        _ => 0,
    }
}

fn write_result<W: Write>(out: &mut W, result: &SetValue, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Text => {
            writeln!(out)?;
            writeln!(out, "{result}")
        }
        OutputMode::Json => {
            let report = Report {
                result: Some(result.elements()),
                error: None,
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)
        }
    }
}

fn write_failure<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    failure: &Failure,
    options: &RunOptions,
) -> io::Result<()> {
    writeln!(err, "{ERROR_MARKER}")?;
    if options.verbose {
        match failure.snippet() {
            Some(snippet) => write!(err, "{snippet}")?,
            None => writeln!(err, "{}", failure.message())?,
        }
    }

    if options.mode == OutputMode::Json {
        let report = Report {
            result: None,
            error: Some(ErrorReport {
                kind: failure.kind(),
                message: failure.message(),
                column: failure.column(),
            }),
        };
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn run_with(argument: Option<&str>, stdin: &str, options: RunOptions) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(argument, Cursor::new(stdin), &mut out, &mut err, &options);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_text_success_has_leading_blank_line() {
        let (code, out, err) = run_with(None, "[1,2,3]U[3,4]\n", RunOptions::default());
        assert_eq!(code, 0);
        assert_eq!(out, "\n[1,2,3,4]\n");
        assert_eq!(err, "");
    }

    #[test]
    fn test_argument_takes_precedence_over_stdin() {
        let (_, out, _) = run_with(Some("[2]"), "[1]", RunOptions::default());
        assert_eq!(out, "\n[2]\n");
    }

    #[test]
    fn test_failure_keeps_exit_code_zero_by_default() {
        let (code, out, err) = run_with(None, "[1]%[2]", RunOptions::default());
        assert_eq!(code, 0);
        assert_eq!(out, "");
        assert_eq!(err, "[error]\n");
    }

    #[test]
    fn test_strict_exit_codes() {
        let options = RunOptions {
            strict_exit: true,
            ..RunOptions::default()
        };
        assert_eq!(run_with(None, "[1]%", options).0, 1);
        assert_eq!(run_with(None, "([1]", options).0, 1);
        assert_eq!(run_with(None, "[1]", options).0, 0);
    }

    #[test]
    fn test_verbose_failure_renders_snippet() {
        let options = RunOptions {
            verbose: true,
            ..RunOptions::default()
        };
        let (_, _, err) = run_with(None, "[1] )", options);
        assert!(err.starts_with("[error]\nerror: unmatched ')' at column 5"));
        assert!(err.contains("1 | [1] )"));
        assert!(err.contains("  |     ^"));
    }

    #[test]
    fn test_json_output() {
        let options = RunOptions {
            mode: OutputMode::Json,
            ..RunOptions::default()
        };
        let (_, out, _) = run_with(None, "[3,1]", options);
        assert_eq!(out, "{\"result\":[1,3]}\n");

        let (_, out, err) = run_with(None, "[1]U", options);
        assert_eq!(err, "[error]\n");
        assert_eq!(
            out,
            "{\"error\":{\"kind\":\"missing_operand\",\"message\":\"operator 'U' is missing an operand\"}}\n"
        );
    }
}
