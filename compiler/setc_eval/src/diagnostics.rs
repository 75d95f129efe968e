use std::fmt::Write as _;

use setc_lexer::InvalidInputError;

use crate::error::EvalError;

/// A user-facing error anchored at a column of the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// 1-based column, `None` when the problem has no single position
    pub column: Option<usize>,
    /// Number of characters to underline
    pub width: usize,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic at a column
    pub fn at_column<S: Into<String>>(column: usize, message: S) -> Self {
        Self {
            message: message.into(),
            column: Some(column),
            width: 1,
            help: None,
        }
    }

    /// Create an error diagnostic with no position
    pub fn without_position<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            column: None,
            width: 0,
            help: None,
        }
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }
}

impl From<&InvalidInputError> for Diagnostic {
    fn from(err: &InvalidInputError) -> Self {
        Diagnostic::at_column(err.column, format!("Unexpected character {:?}", err.ch))
            .with_help("Expressions may only use digits and the symbols - , U ( ) [ ] ^ \\")
    }
}

impl From<&EvalError> for Diagnostic {
    fn from(err: &EvalError) -> Self {
        let base = match err.column() {
            Some(column) => Diagnostic::at_column(column, err.to_string()),
            None => Diagnostic::without_position(err.to_string()),
        };
        let base = match err {
            EvalError::InvalidLiteral { lexeme, .. } => base.with_width(lexeme.len()),
            EvalError::UnexpectedToken { found, .. } => base.with_width(found.chars().count()),
            _ => base,
        };
        match help_for_error(err) {
            Some(help) => base.with_help(help),
            None => base,
        }
    }
}

fn help_for_error(err: &EvalError) -> Option<&'static str> {
    match err {
        EvalError::UnmatchedCloseParen { .. } => Some("Did you forget a matching '(' earlier?"),
        EvalError::UnclosedParen { .. } => Some("Add a ')' to close this group"),
        EvalError::MissingOperand { .. } => {
            Some("Operators need a set on each side, e.g. '[1]U[2]'")
        }
        EvalError::UnexpectedToken { .. } => {
            Some("Sets and operators must alternate, e.g. '([1]U[2])^[2]'")
        }
        EvalError::InvalidLiteral { .. } => {
            Some("Set elements must fit in a 32-bit signed integer")
        }
        EvalError::MalformedSet { .. } => Some("Set literals look like '[1,2,3]' or '[]'"),
        EvalError::EmptyExpression
        | EvalError::LeftoverOperands { .. }
        | EvalError::StackUnderflow(_) => None,
    }
}

/// Render a diagnostic against the input line with a caret underline.
///
/// ```text
/// error: unmatched ')' at column 4
///  --> col 4
///   |
/// 1 | [1])
///   |    ^
///   = help: Did you forget a matching '(' earlier?
/// ```
pub fn render_snippet(diag: &Diagnostic, source: &str) -> String {
    let line = source.lines().next().unwrap_or("");
    let mut out = String::new();

    let _ = writeln!(out, "error: {}", diag.message);
    if let Some(column) = diag.column {
        let _ = writeln!(out, " --> col {column}");
        let _ = writeln!(out, "  |");
        let _ = writeln!(out, "1 | {line}");
        let marker = if diag.width <= 1 {
            "^".to_string()
        } else {
            "~".repeat(diag.width)
        };
        let _ = writeln!(out, "  | {}{marker}", " ".repeat(column.saturating_sub(1)));
    }
    if let Some(help) = &diag.help {
        let _ = writeln!(out, "  = help: {help}");
    }
    out
}
