//! Operator-precedence scheduling
//!
//! The scheduler owns the operator stack of the shunting-yard algorithm. An
//! operator is applied once a later operator of lower or equal precedence, a
//! closing parenthesis, or the end of input shows its right operand is
//! complete. Inside each open parenthesis the stack holds operators in
//! strictly increasing precedence from bottom to top.

use log::{debug, trace};
use setc_lexer::SetOperator;
use setc_stack::GrowableStack;

use crate::error::{EvalError, EvalResult};
use crate::evaluator::{evaluate, OperandStack};

/// An entry on the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// `(` opened at `column`
    OpenParen { column: usize },
    /// An operator waiting for its right operand
    Operator(SetOperator),
}

/// Operator stack plus the pop-and-evaluate discipline around it
#[derive(Debug, Default)]
pub struct Scheduler {
    operators: GrowableStack<Pending>,
}

impl Scheduler {
    /// Create a scheduler with an empty operator stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries on the operator stack
    pub fn depth(&self) -> usize {
        self.operators.size()
    }

    /// Returns true if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Handle `(`
    pub fn open_paren(&mut self, column: usize) {
        trace!("open paren at column {column}");
        self.operators.push(Pending::OpenParen { column });
    }

    /// Handle `)`: apply operators down to the matching `(` and discard it.
    pub fn close_paren(&mut self, operands: &mut OperandStack, column: usize) -> EvalResult<()> {
        loop {
            match self.operators.pop() {
                Ok(Pending::OpenParen { .. }) => return Ok(()),
                Ok(Pending::Operator(op)) => evaluate(operands, op)?,
                Err(_) => return Err(EvalError::UnmatchedCloseParen { column }),
            }
        }
    }

    /// Handle a binary operator.
    ///
    /// Operators of greater or equal precedence on top of the stack are
    /// applied first, which makes equal-precedence operators left
    /// associative.
    pub fn push_operator(&mut self, op: SetOperator, operands: &mut OperandStack) -> EvalResult<()> {
        while let Some(Pending::Operator(top)) = self.operators.top().copied() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.pop_and_evaluate(operands)?;
        }
        debug!("deferring '{op}' (depth {})", self.depth() + 1);
        self.operators.push(Pending::Operator(op));
        Ok(())
    }

    /// Handle end of input: apply everything that is left.
    pub fn finish(&mut self, operands: &mut OperandStack) -> EvalResult<()> {
        while let Some(pending) = self.operators.top().copied() {
            if let Pending::OpenParen { column } = pending {
                return Err(EvalError::UnclosedParen { column });
            }
            self.pop_and_evaluate(operands)?;
        }
        Ok(())
    }

    /// Pop the top operator and apply it to the operand stack.
    pub fn pop_and_evaluate(&mut self, operands: &mut OperandStack) -> EvalResult<()> {
        match self.operators.pop()? {
            Pending::Operator(op) => evaluate(operands, op),
            Pending::OpenParen { column } => Err(EvalError::UnclosedParen { column }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::SetValue;
    use pretty_assertions::assert_eq;
    use setc_stack::StackUnderflow;

    fn set(values: &[i32]) -> SetValue {
        values.iter().copied().collect()
    }

    fn operands(sets: &[&[i32]]) -> OperandStack {
        sets.iter().map(|values| set(values)).collect()
    }

    #[test]
    fn test_lower_precedence_operator_waits() {
        let mut scheduler = Scheduler::new();
        let mut stack = operands(&[&[1], &[2]]);

        scheduler.push_operator(SetOperator::Union, &mut stack).unwrap();
        scheduler
            .push_operator(SetOperator::Intersection, &mut stack)
            .unwrap();

        assert_eq!(scheduler.depth(), 2);
        assert_eq!(stack.size(), 2);
    }

    #[test]
    fn test_equal_precedence_applies_left_first() {
        // [1,2,3] \ [1] U [1]  ==  ([1,2,3] \ [1]) U [1]
        let mut scheduler = Scheduler::new();
        let mut stack = operands(&[&[1, 2, 3]]);

        scheduler
            .push_operator(SetOperator::Difference, &mut stack)
            .unwrap();
        stack.push(set(&[1]));
        scheduler.push_operator(SetOperator::Union, &mut stack).unwrap();
        stack.push(set(&[1]));

        assert_eq!(stack.as_slice(), &[set(&[2, 3]), set(&[1])]);

        scheduler.finish(&mut stack).unwrap();
        assert_eq!(stack.as_slice(), &[set(&[2, 3, 1])]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_close_paren_stops_at_open_paren() {
        let mut scheduler = Scheduler::new();
        let mut stack = operands(&[&[5]]);

        scheduler.push_operator(SetOperator::Union, &mut stack).unwrap();
        scheduler.open_paren(4);
        stack.push(set(&[1, 2]));
        scheduler
            .push_operator(SetOperator::Intersection, &mut stack)
            .unwrap();
        stack.push(set(&[2]));

        scheduler.close_paren(&mut stack, 12).unwrap();

        assert_eq!(stack.as_slice(), &[set(&[5]), set(&[2])]);
        assert_eq!(
            scheduler.operators.top(),
            Some(&Pending::Operator(SetOperator::Union))
        );
    }

    #[test]
    fn test_unmatched_close_paren() {
        let mut scheduler = Scheduler::new();
        let mut stack = operands(&[&[1]]);
        assert_eq!(
            scheduler.close_paren(&mut stack, 4),
            Err(EvalError::UnmatchedCloseParen { column: 4 })
        );
    }

    #[test]
    fn test_unclosed_paren_at_finish() {
        let mut scheduler = Scheduler::new();
        let mut stack = operands(&[&[1]]);
        scheduler.open_paren(1);
        assert_eq!(
            scheduler.finish(&mut stack),
            Err(EvalError::UnclosedParen { column: 1 })
        );
    }

    #[test]
    fn test_pop_and_evaluate_on_empty_stack_is_internal() {
        let mut scheduler = Scheduler::new();
        let mut stack = OperandStack::new();
        assert_eq!(
            scheduler.pop_and_evaluate(&mut stack),
            Err(EvalError::StackUnderflow(StackUnderflow))
        );
    }
}
