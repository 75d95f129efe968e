//! Set-algebra evaluator
//!
//! Applies one operator to the two most recently completed sets on the
//! operand stack and pushes the result back in their place.

use log::debug;
use setc_lexer::SetOperator;
use setc_stack::GrowableStack;

use crate::error::{EvalError, EvalResult};
use crate::set::SetValue;

/// Stack of completed set values, most recent on top
pub type OperandStack = GrowableStack<SetValue>;

/// Pop the right operand, then the left, and push `left op right`.
///
/// The right operand is popped first because it was pushed last.
pub fn evaluate(operands: &mut OperandStack, op: SetOperator) -> EvalResult<()> {
    let right = operands
        .pop()
        .map_err(|_| EvalError::MissingOperand { op })?;
    let left = operands
        .pop()
        .map_err(|_| EvalError::MissingOperand { op })?;

    let result = SetValue::apply(op, &left, &right);
    debug!("{left} {op} {right} = {result}");
    operands.push(result);
    Ok(())
}
