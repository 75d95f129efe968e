//! Set-algebra expression lexical analyzer
//!
//! This crate validates raw input against the expression alphabet and
//! converts the validated expression into a stream of tokens for the
//! evaluator.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod token;
pub mod validate;

// Re-export the main types for convenience
pub use lexer::{Lexer, LogosToken};
pub use token::{Element, Location, SetOperator, Token, TokenKind};
pub use validate::{is_valid_symbol, read_expression, Expression, InvalidInputError, ReadError};
