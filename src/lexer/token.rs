//! Token model for label selectors.
//!
//! Tokens are transient: the lexer produces them, the parser consumes them,
//! and nothing else holds on to them.

use std::fmt;

/// Kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// One or more whitespace characters (never handed to the parser)
    Whitespace,
    /// `(`
    Open,
    /// `)`
    Close,
    /// `=` or `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `!`
    Not,
    /// `in`
    In,
    /// `notin`
    NotIn,
    /// `,`
    Comma,
    /// Label name or value text
    Label,
}

impl TokenKind {
    /// Human readable description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Open => "`(`",
            TokenKind::Close => "`)`",
            TokenKind::Equals => "`=`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::Not => "`!`",
            TokenKind::In => "`in`",
            TokenKind::NotIn => "`notin`",
            TokenKind::Comma => "`,`",
            TokenKind::Label => "label",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token.
///
/// Only [`TokenKind::Label`] tokens carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Label text, present only for label tokens
    pub value: Option<String>,
    /// Byte offset of the first character in the source text
    pub offset: usize,
}

impl Token {
    /// Create a token without text
    pub fn new(kind: TokenKind, offset: usize) -> Self {
        Self {
            kind,
            value: None,
            offset,
        }
    }

    /// Create a label token
    pub fn label(value: impl Into<String>, offset: usize) -> Self {
        Self {
            kind: TokenKind::Label,
            value: Some(value.into()),
            offset,
        }
    }

    /// Label text, if this is a label token
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "{}", self.kind),
        }
    }
}
