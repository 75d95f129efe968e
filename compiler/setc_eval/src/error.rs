use setc_lexer::SetOperator;
use setc_stack::StackUnderflow;
use thiserror::Error;

/// Errors that can occur while evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A `)` with no matching `(`
    #[error("unmatched ')' at column {column}")]
    UnmatchedCloseParen { column: usize },

    /// A `(` still open at end of input
    #[error("'(' at column {column} is never closed")]
    UnclosedParen { column: usize },

    /// An operator without two completed operand sets
    #[error("operator '{op}' is missing an operand")]
    MissingOperand { op: SetOperator },

    /// A token where the grammar allows only a set or only an operator
    #[error("unexpected '{found}' at column {column}, expected {expected}")]
    UnexpectedToken {
        found: String,
        column: usize,
        expected: &'static str,
    },

    /// An integer literal that does not fit an element
    #[error("invalid integer literal '{lexeme}' at column {column}")]
    InvalidLiteral { lexeme: String, column: usize },

    /// A bracketed set literal that does not follow the grammar
    #[error("malformed set at column {column}: {reason}")]
    MalformedSet { column: usize, reason: &'static str },

    /// Nothing to evaluate
    #[error("empty expression")]
    EmptyExpression,

    /// More than one set left once every operator was applied; never raised
    /// for input the driver accepted
    #[error("internal error: {count} sets left on the operand stack")]
    LeftoverOperands { count: usize },

    /// Internal invariant failure; never raised for a well-formed expression
    #[error("internal error: {0}")]
    StackUnderflow(#[from] StackUnderflow),
}

impl EvalError {
    /// Returns true for internal invariant failures as opposed to grammar
    /// errors in the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            EvalError::StackUnderflow(_) | EvalError::LeftoverOperands { .. }
        )
    }

    /// Column the error points at, when it has one
    pub fn column(&self) -> Option<usize> {
        match self {
            EvalError::UnmatchedCloseParen { column }
            | EvalError::UnclosedParen { column }
            | EvalError::UnexpectedToken { column, .. }
            | EvalError::InvalidLiteral { column, .. }
            | EvalError::MalformedSet { column, .. } => Some(*column),
            _ => None,
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::UnmatchedCloseParen { .. } | EvalError::UnclosedParen { .. } => {
                "structural_mismatch"
            }
            EvalError::MissingOperand { .. } => "missing_operand",
            EvalError::UnexpectedToken { .. } => "unexpected_token",
            EvalError::InvalidLiteral { .. } => "invalid_literal",
            EvalError::MalformedSet { .. } => "malformed_set",
            EvalError::EmptyExpression => "empty_expression",
            EvalError::LeftoverOperands { .. } => "leftover_operands",
            EvalError::StackUnderflow(_) => "stack_underflow",
        }
    }
}

/// Result type for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EvalError::UnmatchedCloseParen { column: 4 }.to_string(),
            "unmatched ')' at column 4"
        );
        assert_eq!(
            EvalError::MissingOperand {
                op: SetOperator::Difference
            }
            .to_string(),
            "operator '\\' is missing an operand"
        );
        assert_eq!(
            EvalError::UnexpectedToken {
                found: "U".to_string(),
                column: 1,
                expected: "a set or '('"
            }
            .to_string(),
            "unexpected 'U' at column 1, expected a set or '('"
        );
        assert_eq!(
            EvalError::from(StackUnderflow).to_string(),
            "internal error: pop from an empty stack"
        );
    }

    #[test]
    fn test_invariant_failures_are_internal() {
        assert!(EvalError::StackUnderflow(StackUnderflow).is_internal());
        assert!(EvalError::LeftoverOperands { count: 2 }.is_internal());
        assert!(!EvalError::EmptyExpression.is_internal());
        assert!(!EvalError::UnclosedParen { column: 1 }.is_internal());
    }
}
