//! Token-level parsers and the grammar's failure type
//!
//! The grammar runs over `&[Token]` instead of text. Each primitive consumes
//! at most one token; on mismatch it reports the symbol it wanted and the
//! tokens left, so [`Failure::or`] can keep the failure that got furthest.

use nom::IResult;
use nom::error::{ErrorKind, ParseError};

use crate::error::Symbol;
use crate::lexer::{Token, TokenKind};

pub(crate) type Tokens<'a> = &'a [Token];

pub(crate) type PResult<'a, O> = IResult<Tokens<'a>, O, Failure<'a>>;

/// Where the grammar gave up and what it would have accepted there
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Failure<'a> {
    pub remaining: Tokens<'a>,
    pub expected: Vec<Symbol>,
}

impl<'a> Failure<'a> {
    pub fn expecting(remaining: Tokens<'a>, symbol: Symbol) -> Self {
        Self {
            remaining,
            expected: vec![symbol],
        }
    }
}

impl<'a> ParseError<Tokens<'a>> for Failure<'a> {
    fn from_error_kind(input: Tokens<'a>, _kind: ErrorKind) -> Self {
        Self {
            remaining: input,
            expected: Vec::new(),
        }
    }

    fn append(_input: Tokens<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    /// Keep the deeper failure; at equal depth, accept either's symbols
    fn or(mut self, other: Self) -> Self {
        use std::cmp::Ordering;

        match self.remaining.len().cmp(&other.remaining.len()) {
            Ordering::Less => self,
            Ordering::Greater => other,
            Ordering::Equal => {
                for symbol in other.expected {
                    if !self.expected.contains(&symbol) {
                        self.expected.push(symbol);
                    }
                }
                self
            }
        }
    }
}

/// Match one token of `kind`
pub(crate) fn token<'a>(kind: TokenKind) -> impl Fn(Tokens<'a>) -> PResult<'a, &'a Token> {
    move |input: Tokens<'a>| match input.split_first() {
        Some((first, rest)) if first.kind == kind => Ok((rest, first)),
        _ => Err(nom::Err::Error(Failure::expecting(
            input,
            Symbol::Token(kind),
        ))),
    }
}

/// Match a label token, returning its text
pub(crate) fn label(input: Tokens<'_>) -> PResult<'_, &str> {
    match input.split_first() {
        Some((first, rest)) if first.kind == TokenKind::Label => {
            Ok((rest, first.text().unwrap_or_default()))
        }
        _ => Err(nom::Err::Error(Failure::expecting(
            input,
            Symbol::Token(TokenKind::Label),
        ))),
    }
}

/// Match the end of the token stream
pub(crate) fn end(input: Tokens<'_>) -> PResult<'_, ()> {
    if input.is_empty() {
        Ok((input, ()))
    } else {
        Err(nom::Err::Error(Failure::expecting(input, Symbol::End)))
    }
}
