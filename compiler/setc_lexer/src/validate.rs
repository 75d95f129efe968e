//! Symbol validation and expression reading
//!
//! An expression is read once, character by character, up to the first
//! newline or end of input. Whitespace is dropped, every other character must
//! belong to the fixed alphabet; the first one that does not aborts the read.

use std::fmt;
use std::io::BufRead;

use log::{debug, trace};
use setc_stack::GrowableStack;
use thiserror::Error;

/// Characters an expression may contain (whitespace aside)
pub const ALPHABET: &str = "0123456789-,U()[]^\\";

/// A character outside the accepted alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid character {ch:?} at column {column}")]
pub struct InvalidInputError {
    /// The offending character
    pub ch: char,
    /// 1-based column in the raw input line
    pub column: usize,
}

/// Errors raised while reading an expression from a stream
#[derive(Debug, Error)]
pub enum ReadError {
    /// The line contained a character outside the alphabet
    #[error("{source}")]
    InvalidInput {
        /// The rejected character and its column
        source: InvalidInputError,
        /// The raw line, for error reporting
        line: String,
    },

    /// The underlying reader failed
    #[error("failed to read expression: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns true if `ch` belongs to the expression alphabet.
pub fn is_valid_symbol(ch: char) -> bool {
    ALPHABET.contains(ch)
}

/// A validated expression.
///
/// Holds only alphabet characters, in input order, along with the raw
/// column each of them was read from.
#[derive(Clone, PartialEq, Eq)]
pub struct Expression {
    text: String,
    columns: GrowableStack<usize>,
    raw: String,
}

impl Expression {
    /// Validate a line of input.
    ///
    /// Reading stops at the first `\n`; whitespace is skipped.
    pub fn parse(line: &str) -> Result<Self, InvalidInputError> {
        let raw = line.split('\n').next().unwrap_or_default();
        let mut text = String::with_capacity(raw.len());
        let mut columns = GrowableStack::new();

        for (index, ch) in raw.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let column = index + 1;
            if !is_valid_symbol(ch) {
                debug!("rejecting {ch:?} at column {column}");
                return Err(InvalidInputError { ch, column });
            }
            trace!("accepted {ch:?} at column {column}");
            text.push(ch);
            columns.push(column);
        }

        Ok(Self {
            text,
            columns,
            raw: raw.to_string(),
        })
    }

    /// The input line as it was read, whitespace included
    pub fn source_line(&self) -> &str {
        &self.raw
    }

    /// The validated characters
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of validated characters
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if no characters were accepted
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Raw input column of the character at `offset`.
    ///
    /// Offsets past the end map to the column after the last character.
    pub fn column_at(&self, offset: usize) -> usize {
        match self.columns.as_slice().get(offset) {
            Some(column) => *column,
            None => self.columns.top().map_or(1, |last| last + 1),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.text).finish()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Read and validate one expression line from `reader`.
///
/// End of stream without a newline terminates the line as well.
pub fn read_expression<R: BufRead>(mut reader: R) -> Result<Expression, ReadError> {
    let mut bytes = Vec::new();
    let read = reader.read_until(b'\n', &mut bytes)?;
    debug!("read {read} bytes of input");
    let line = String::from_utf8_lossy(&bytes);
    Expression::parse(&line).map_err(|source| ReadError::InvalidInput {
        source,
        line: line.trim_end_matches(['\n', '\r']).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn test_alphabet_membership() {
        for ch in "0123456789-,U()[]^\\".chars() {
            assert!(is_valid_symbol(ch), "{ch:?} should be valid");
        }
        for ch in ['%', 'u', 'a', '{', '+', '.', '/'] {
            assert!(!is_valid_symbol(ch), "{ch:?} should be invalid");
        }
    }

    #[test]
    fn test_spaces_are_dropped() {
        let expr = Expression::parse(" [1, 2] U [3]").unwrap();
        assert_eq!(expr.as_str(), "[1,2]U[3]");
        assert_eq!(expr.column_at(0), 2);
        assert_eq!(expr.column_at(3), 6);
        assert_eq!(expr.column_at(expr.len()), 14);
    }

    #[test]
    fn test_invalid_character_reports_raw_column() {
        let err = Expression::parse("[1] % [2]").unwrap_err();
        assert_eq!(err, InvalidInputError { ch: '%', column: 5 });
    }

    #[test]
    fn test_newline_ends_the_expression() {
        let expr = Expression::parse("[1] \n%%%").unwrap();
        assert_eq!(expr.as_str(), "[1]");
        assert_eq!(expr.source_line(), "[1] ");
    }

    #[test]
    fn test_read_expression_from_stream() {
        let expr = read_expression(Cursor::new("[1,2]^[2]\n[9]\n")).unwrap();
        assert_eq!(expr.as_str(), "[1,2]^[2]");

        let expr = read_expression(Cursor::new("[7]")).unwrap();
        assert_eq!(expr.as_str(), "[7]");

        let expr = read_expression(Cursor::new("")).unwrap();
        assert!(expr.is_empty());
        assert_eq!(expr.column_at(0), 1);
    }

    #[test]
    fn test_read_expression_rejects_non_ascii() {
        let err = read_expression(Cursor::new("[1]\u{00e9}")).unwrap_err();
        match err {
            ReadError::InvalidInput { source, line } => {
                assert_eq!(source.column, 4);
                assert_eq!(line, "[1]\u{00e9}");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn revalidation_never_fails(line in "[0-9,U()\\[\\]^\\\\ -]{0,40}") {
            let first = Expression::parse(&line).unwrap();
            let second = Expression::parse(first.as_str()).unwrap();
            prop_assert_eq!(first.as_str(), second.as_str());
        }
    }
}
