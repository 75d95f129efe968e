//! Lexer for set-algebra expressions using the 'logos' crate
//! Recognizes parentheses, operators, integer literals and set delimiters

use crate::token::{Element, Location, SetOperator, Token, TokenKind};
use crate::validate::Expression;
use log::trace;
use logos::Logos;

/// Raw token type used by the logos lexer.
///
/// Only validated text reaches the lexer, so it never sees whitespace.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogosToken {
    // --- Grouping ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // --- Set delimiters (empty set first) ---
    #[token("[]")]
    EmptySet,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    // --- Operators ---
    #[token("U")]
    Union,
    #[token("\\")]
    Backslash,
    #[token("^")]
    Caret,
    #[token("-")]
    Minus,

    // --- Literals ---
    #[regex(r"[0-9]+")]
    Digits,
}

/// Set-algebra expression lexer
pub struct Lexer<'source> {
    /// The logos lexer instance
    logos_lexer: logos::Lexer<'source, LogosToken>,
    /// Column lookup for token locations
    expression: &'source Expression,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer over a validated expression
    pub fn new(expression: &'source Expression) -> Self {
        Self {
            logos_lexer: LogosToken::lexer(expression.as_str()),
            expression,
        }
    }

    /// Convert a LogosToken to our semantic Token type
    fn convert_token(&self, logos_token: LogosToken, lexeme: &str, location: Location) -> Token {
        let kind = match logos_token {
            LogosToken::LParen => TokenKind::LeftParen,
            LogosToken::RParen => TokenKind::RightParen,
            LogosToken::EmptySet => TokenKind::EmptySet,
            LogosToken::LBracket => TokenKind::LeftBracket,
            LogosToken::RBracket => TokenKind::RightBracket,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Union => TokenKind::Operator(SetOperator::Union),
            LogosToken::Backslash => TokenKind::Operator(SetOperator::Difference),
            LogosToken::Caret => TokenKind::Operator(SetOperator::Intersection),
            LogosToken::Minus => TokenKind::Minus,
            LogosToken::Digits => match lexeme.parse::<Element>() {
                Ok(value) => TokenKind::Integer(value),
                Err(_) => TokenKind::Error(format!(
                    "Integer literal out of range at column {}",
                    location.column
                )),
            },
        };

        Token::new(kind, lexeme, location)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.logos_lexer.next()?;
        let lexeme = self.logos_lexer.slice();
        let offset = self.logos_lexer.span().start;
        let location = Location {
            column: self.expression.column_at(offset),
            offset,
        };
        let token = match logos_token {
            Ok(token) => self.convert_token(token, lexeme, location),
            Err(_) => Token::new(
                TokenKind::Error(format!("Invalid token at column {}", location.column)),
                lexeme,
                location,
            ),
        };
        trace!("token {:?} at offset {}", token.kind, offset);
        Some(token)
    }
}
