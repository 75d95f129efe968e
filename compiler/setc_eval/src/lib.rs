//! Set-algebra expression evaluation
//!
//! Drives a validated expression through the lexer, schedules operators by
//! precedence and evaluates union, difference and intersection over set
//! values held on an operand stack.

pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod evaluator;
pub mod scheduler;
pub mod set;

pub use diagnostics::{render_snippet, Diagnostic};
pub use driver::{evaluate_expression, Evaluation};
pub use error::{EvalError, EvalResult};
pub use evaluator::{evaluate, OperandStack};
pub use scheduler::{Pending, Scheduler};
pub use set::SetValue;

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Once;

    use env_logger::Builder;
    use log::LevelFilter;

    static INIT: Once = Once::new();

    /// Initialize the logger for tests
    pub fn init_test_logger() {
        INIT.call_once(|| {
            Builder::new()
                .filter_level(LevelFilter::Debug)
                .is_test(true)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{}] {}: {}",
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .init();
            log::info!("Test logger initialized");
        });
    }

    #[test]
    fn test_evaluation_logs_without_panicking() {
        init_test_logger();
        let expression = setc_lexer::Expression::parse("([1,2]U[3])^[2,3]").unwrap();
        let result = super::evaluate_expression(&expression).unwrap();
        assert_eq!(result.elements(), &[2, 3]);
    }
}
