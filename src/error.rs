//! Error types for selector lexing and parsing.
//!
//! Lexing and parsing never partially succeed: a failure discards every
//! token and expression produced so far.

use std::fmt;

use crate::lexer::TokenKind;

/// A character that cannot start any token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected character {found:?} at offset {offset}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub offset: usize,
    /// The offending character
    pub found: char,
}

/// A grammar symbol: a token kind or the end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A token of the given kind
    Token(TokenKind),
    /// End of input
    End,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Token(kind) => write!(f, "{}", kind),
            Symbol::End => write!(f, "end of input"),
        }
    }
}

/// The set of symbols the parser would have accepted at a failure point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expected(pub Vec<Symbol>);

impl Expected {
    /// Check whether `symbol` would have been accepted
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.0.contains(&symbol)
    }

    /// The accepted symbols, in the order the grammar tried them
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "nothing"),
            [only] => write!(f, "{}", only),
            [init @ .., last] => {
                for (i, symbol) in init.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", symbol)?;
                }
                write!(f, " or {}", last)
            }
        }
    }
}

/// No grammar alternative matched at a token position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected {found} at offset {offset}, expected {expected}")]
pub struct ParseError {
    /// Byte offset into the source text (its length when input ran out)
    pub offset: usize,
    /// Index of the offending token
    pub position: usize,
    /// What was found instead
    pub found: Symbol,
    /// What would have been accepted
    pub expected: Expected,
}

/// Diagnostic returned by [`crate::try_parse`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// Byte offset of the failure in the source text
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::Lex(e) => e.offset,
            SyntaxError::Parse(e) => e.offset,
        }
    }
}

/// An expression whose canonical text would not parse back
///
/// Returned by the [`crate::ExpressionBuilder`] operator methods and by
/// [`crate::Expression::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// Empty, a keyword, or containing whitespace, control characters or
    /// `( ) ! = ,`
    #[error("{0:?} is not a valid label")]
    InvalidLabel(String),

    /// `in` or `notin` without values
    #[error("`{name}` needs at least one value")]
    NoValues { name: String },
}

/// User-facing parse failure, carrying the rejected text
///
/// This is the error of `str::parse::<Selector>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid label selector {input:?}: {source}")]
pub struct SelectorError {
    input: String,
    source: SyntaxError,
}

impl SelectorError {
    /// Wrap `source` together with the text it was raised for
    pub fn new(input: impl Into<String>, source: SyntaxError) -> Self {
        Self {
            input: input.into(),
            source,
        }
    }

    /// The rejected selector text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The underlying diagnostic
    pub fn syntax_error(&self) -> &SyntaxError {
        &self.source
    }

    /// Render the message with the input and a caret under the failure
    ///
    /// ```
    /// use rusty_label_selector::Selector;
    ///
    /// let err = "env in (a".parse::<Selector>().unwrap_err();
    /// assert_eq!(
    ///     err.render(),
    ///     "unexpected end of input at offset 9, expected `,` or `)`\n  env in (a\n           ^"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let offset = self.source.offset();
        let column = self
            .input
            .get(..offset)
            .unwrap_or(&self.input)
            .chars()
            .count();
        format!(
            "{}\n  {}\n  {}^",
            self.source,
            self.input,
            " ".repeat(column)
        )
    }
}
