//! Shared helpers for the end-to-end tests.

use std::io::Cursor;

use setc::{run, RunOptions};

/// Everything a single run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Feed `stdin` to the calculator with the given options and capture the
/// streams.
pub fn run_stdin(stdin: &str, options: RunOptions) -> Captured {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(None, Cursor::new(stdin), &mut stdout, &mut stderr, &options);
    Captured {
        code,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

/// `run_stdin` with default options
pub fn run_line(stdin: &str) -> Captured {
    run_stdin(stdin, RunOptions::default())
}

/// The result line of a successful text-mode run
pub fn result_line(captured: &Captured) -> Option<&str> {
    captured.stdout.strip_prefix('\n')?.strip_suffix('\n')
}
