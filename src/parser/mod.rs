//! Label selector parser.
//!
//! Text is first split into tokens by [`crate::lexer`], then the grammar
//! below runs over the token slice:
//!
//! ```text
//! selector   := ε | expression ("," expression)*
//! expression := name "in" list | name "notin" list
//!             | name "=" value | name "!=" value
//!             | "!" name | name
//! list       := "(" value ("," value)* ")"
//! ```
//!
//! All tokens must be consumed. Blank text is the empty selector.
//!
//! # Submodules
//!
//! - [`expression`] - Single expression forms
//! - [`primitive`] - Token matchers and the failure type
//!
//! # Example
//!
//! ```rust
//! use rusty_label_selector::parser::try_parse;
//!
//! let selector = try_parse("env in (prod, staging), tier != db, !canary").unwrap();
//! assert_eq!(selector.len(), 3);
//!
//! let err = try_parse("env in (prod,)").unwrap_err();
//! assert_eq!(err.offset(), 13);
//! ```

pub(crate) mod expression;
pub(crate) mod primitive;

use std::str::FromStr;

use nom::{Parser, branch::alt, combinator::map};
use tracing::{debug, trace};

use crate::error::{Expected, ParseError, SelectorError, Symbol, SyntaxError};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::selector::Selector;

use expression::{expression, operator_expression};
use primitive::{Failure, PResult, Tokens, end, token};

/// Parse comma separated expressions up to the end of the tokens
fn selector(input: Tokens<'_>) -> PResult<'_, Selector> {
    let mut expressions = Vec::new();
    let mut input = input;

    if input.is_empty() {
        return Ok((input, Selector::new()));
    }

    loop {
        let start = input;
        let (rest, parsed) = expression(input)?;
        expressions.push(parsed);

        let separator = alt((
            map(token(TokenKind::Comma), |_| false),
            map(end, |_| true),
        ))
        .parse(rest);

        match separator {
            Ok((rest, true)) => return Ok((rest, Selector::from_expressions(expressions))),
            Ok((rest, false)) => input = rest,
            // `name` followed by junk: the longer forms were cut short too
            Err(nom::Err::Error(failure)) => {
                let failure = match operator_expression(start) {
                    Err(nom::Err::Error(longer)) => {
                        nom::error::ParseError::or(longer, failure)
                    }
                    _ => failure,
                };
                return Err(nom::Err::Error(failure));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Parse an already tokenized selector
///
/// `source_len` is the length of the text the tokens came from, reported
/// as the offset when input runs out.
pub fn parse_tokens(tokens: &[Token], source_len: usize) -> Result<Selector, ParseError> {
    match selector(tokens) {
        Ok((_, selector)) => Ok(selector),
        Err(nom::Err::Error(failure) | nom::Err::Failure(failure)) => {
            Err(to_parse_error(tokens, source_len, failure))
        }
        Err(nom::Err::Incomplete(_)) => Err(to_parse_error(
            tokens,
            source_len,
            Failure::expecting(&[], Symbol::End),
        )),
    }
}

fn to_parse_error(tokens: &[Token], source_len: usize, failure: Failure<'_>) -> ParseError {
    let position = tokens.len() - failure.remaining.len();
    let (offset, found) = match failure.remaining.first() {
        Some(token) => (token.offset, Symbol::Token(token.kind)),
        None => (source_len, Symbol::End),
    };
    ParseError {
        offset,
        position,
        found,
        expected: Expected(failure.expected),
    }
}

/// Parse selector text, returning a diagnostic on failure
///
/// # Examples
///
/// ```
/// use rusty_label_selector::{try_parse, SyntaxError};
///
/// assert_eq!(try_parse("a = b, c").unwrap().to_string(), "a = b, c");
/// assert!(try_parse("").unwrap().is_empty());
/// assert!(matches!(try_parse("a = \u{0}"), Err(SyntaxError::Lex(_))));
/// assert!(matches!(try_parse("a b"), Err(SyntaxError::Parse(_))));
/// ```
pub fn try_parse(text: &str) -> Result<Selector, SyntaxError> {
    let tokens = tokenize(text)?;
    match parse_tokens(&tokens, text.len()) {
        Ok(selector) => {
            trace!(expressions = selector.len(), "parsed label selector");
            Ok(selector)
        }
        Err(e) => {
            debug!(offset = e.offset, position = e.position, error = %e, "label selector rejected");
            Err(e.into())
        }
    }
}

/// Parse selector text, discarding the diagnostic
pub fn parse(text: &str) -> Option<Selector> {
    try_parse(text).ok()
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse(s).map_err(|e| SelectorError::new(s, e))
    }
}

impl TryFrom<&str> for Selector {
    type Error = SelectorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Selector {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        try_parse(&value).map_err(|e| SelectorError::new(value, e))
    }
}
