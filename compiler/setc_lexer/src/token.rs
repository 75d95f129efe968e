use std::fmt;

/// Value type of a set element.
pub type Element = i32;

/// Represents a token's location in the expression.
///
/// The column is 1-based and refers to the raw input line (before whitespace
/// was dropped), the offset is the 0-based byte offset into the validated
/// expression text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based column in the raw input line
    pub column: usize,
    /// The 0-based byte offset in the validated expression
    pub offset: usize,
}

/// A binary set-algebra operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    /// `U`
    Union,
    /// `\`, left minus right
    Difference,
    /// `^`
    Intersection,
}

impl SetOperator {
    /// Map an operator character to its operator
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'U' => Some(SetOperator::Union),
            '\\' => Some(SetOperator::Difference),
            '^' => Some(SetOperator::Intersection),
            _ => None,
        }
    }

    /// The character this operator is written as
    pub fn symbol(self) -> char {
        match self {
            SetOperator::Union => 'U',
            SetOperator::Difference => '\\',
            SetOperator::Intersection => '^',
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            SetOperator::Union | SetOperator::Difference => 1,
            SetOperator::Intersection => 2,
        }
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The type of a token in a set-algebra expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[` opening a non-empty set
    LeftBracket,
    /// `]`
    RightBracket,
    /// `[]`
    EmptySet,
    /// `,`
    Comma,
    /// `-`; accepted by the validator but never part of a literal
    Minus,
    /// `U`, `\` or `^`
    Operator(SetOperator),
    /// A maximal run of digits
    Integer(Element),
    /// Text that could not be turned into a token
    Error(String),
}

/// A token together with its source text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The type of the token
    pub kind: TokenKind,
    /// The original text of the token
    pub lexeme: String,
    /// Where the token starts
    pub location: Location,
}

impl Token {
    /// Creates a new token
    pub fn new<S: Into<String>>(kind: TokenKind, lexeme: S, location: Location) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    /// Returns true if this token is an error token
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at column {}", self.lexeme, self.location.column)
    }
}
