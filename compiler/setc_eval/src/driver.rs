//! Single-pass evaluation of a validated expression
//!
//! Tokens are consumed left to right. Set literals are collected between
//! their brackets and pushed onto the operand stack as whole values;
//! parentheses and operators go to the scheduler, which applies operators
//! as soon as their right operand is complete. Sets and operators must
//! alternate, so every parenthesised group is a complete expression.

use log::{debug, warn};
use setc_lexer::{Expression, Lexer, SetOperator, Token, TokenKind};

use crate::error::{EvalError, EvalResult};
use crate::evaluator::OperandStack;
use crate::scheduler::Scheduler;
use crate::set::SetValue;

const EXPECTED_OPERAND: &str = "a set or '('";
const EXPECTED_OPERATOR: &str = "an operator or ')'";

/// Last item seen inside an open set literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetItem {
    Opened,
    Literal,
    Comma,
}

/// A set literal whose closing `]` has not been seen yet
#[derive(Debug)]
struct OpenSet {
    elements: SetValue,
    column: usize,
    last: SetItem,
}

/// State of one evaluation pass
#[derive(Debug)]
pub struct Evaluation {
    operands: OperandStack,
    scheduler: Scheduler,
    open_set: Option<OpenSet>,
    /// A set or `(` must come next
    expect_operand: bool,
    /// The previous token was this operator
    trailing_operator: Option<SetOperator>,
    /// The previous token was `(`
    after_open_paren: bool,
}

impl Default for Evaluation {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluation {
    /// Start a new pass
    pub fn new() -> Self {
        Self {
            operands: OperandStack::new(),
            scheduler: Scheduler::new(),
            open_set: None,
            expect_operand: true,
            trailing_operator: None,
            after_open_paren: false,
        }
    }

    /// Consume one token.
    pub fn feed(&mut self, token: &Token) -> EvalResult<()> {
        let column = token.location.column;
        match &token.kind {
            TokenKind::Minus => {
                warn!("ignoring '-' at column {column}: negative literals are not supported");
                return Ok(());
            }
            TokenKind::Error(message) => {
                debug!("{message}");
                return Err(EvalError::InvalidLiteral {
                    lexeme: token.lexeme.clone(),
                    column,
                });
            }
            TokenKind::LeftBracket => {
                self.outside_set(column, "'[' inside a set literal")?;
                self.require_operand(token)?;
                self.open_set = Some(OpenSet {
                    elements: SetValue::new(),
                    column,
                    last: SetItem::Opened,
                });
            }
            TokenKind::EmptySet => {
                self.outside_set(column, "'[]' inside a set literal")?;
                self.require_operand(token)?;
                self.operands.push(SetValue::new());
                self.expect_operand = false;
            }
            TokenKind::Integer(value) => {
                let open = self.open_set.as_mut().ok_or(EvalError::MalformedSet {
                    column,
                    reason: "integer literal outside of a set",
                })?;
                if open.last == SetItem::Literal {
                    return Err(EvalError::MalformedSet {
                        column,
                        reason: "two literals without a ',' between them",
                    });
                }
                open.elements.push(*value);
                open.last = SetItem::Literal;
            }
            TokenKind::Comma => {
                let open = self.open_set.as_mut().ok_or(EvalError::MalformedSet {
                    column,
                    reason: "',' outside of a set",
                })?;
                if open.last != SetItem::Literal {
                    return Err(EvalError::MalformedSet {
                        column,
                        reason: "',' must follow an integer literal",
                    });
                }
                open.last = SetItem::Comma;
            }
            TokenKind::RightBracket => match self.open_set.take() {
                Some(open) if open.last == SetItem::Comma => {
                    return Err(EvalError::MalformedSet {
                        column,
                        reason: "']' after a trailing ','",
                    })
                }
                Some(open) => {
                    debug!("set literal {} closed", open.elements);
                    self.operands.push(open.elements);
                    self.expect_operand = false;
                }
                None => {
                    return Err(EvalError::MalformedSet {
                        column,
                        reason: "']' without a matching '['",
                    })
                }
            },
            TokenKind::LeftParen => {
                self.outside_set(column, "'(' inside a set literal")?;
                self.require_operand(token)?;
                self.scheduler.open_paren(column);
            }
            TokenKind::RightParen => {
                self.outside_set(column, "')' inside a set literal")?;
                if self.expect_operand {
                    return Err(self.missing_operand(token));
                }
                self.scheduler.close_paren(&mut self.operands, column)?;
            }
            TokenKind::Operator(op) => {
                self.outside_set(column, "operator inside a set literal")?;
                if self.expect_operand {
                    return Err(self.missing_operand(token));
                }
                self.scheduler.push_operator(*op, &mut self.operands)?;
                self.expect_operand = true;
            }
        }

        self.after_open_paren = token.kind == TokenKind::LeftParen;
        self.trailing_operator = match token.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        };
        Ok(())
    }

    /// Apply the remaining operators and return the sorted result.
    pub fn finish(mut self) -> EvalResult<SetValue> {
        if let Some(open) = &self.open_set {
            return Err(EvalError::MalformedSet {
                column: open.column,
                reason: "set literal is never closed",
            });
        }
        if let Some(op) = self.trailing_operator {
            return Err(EvalError::MissingOperand { op });
        }
        self.scheduler.finish(&mut self.operands)?;
        if self.expect_operand {
            return Err(EvalError::EmptyExpression);
        }

        let result = self.operands.pop()?;
        match self.operands.size() {
            0 => Ok(result.sorted()),
            rest => Err(EvalError::LeftoverOperands { count: rest + 1 }),
        }
    }

    fn outside_set(&self, column: usize, reason: &'static str) -> EvalResult<()> {
        match self.open_set {
            Some(_) => Err(EvalError::MalformedSet { column, reason }),
            None => Ok(()),
        }
    }

    fn require_operand(&self, token: &Token) -> EvalResult<()> {
        if self.expect_operand {
            Ok(())
        } else {
            Err(unexpected(token, EXPECTED_OPERATOR))
        }
    }

    /// Error for an operator or `)` that arrives where a set was needed
    fn missing_operand(&self, token: &Token) -> EvalError {
        if self.after_open_paren && token.kind == TokenKind::RightParen {
            EvalError::EmptyExpression
        } else if let Some(op) = self.trailing_operator {
            EvalError::MissingOperand { op }
        } else {
            unexpected(token, EXPECTED_OPERAND)
        }
    }
}

fn unexpected(token: &Token, expected: &'static str) -> EvalError {
    EvalError::UnexpectedToken {
        found: token.lexeme.clone(),
        column: token.location.column,
        expected,
    }
}

/// Evaluate a validated expression and return its sorted result set.
pub fn evaluate_expression(expression: &Expression) -> EvalResult<SetValue> {
    debug!("evaluating {expression}");
    let mut evaluation = Evaluation::new();
    for token in Lexer::new(expression) {
        evaluation.feed(&token)?;
    }
    evaluation.finish()
}
