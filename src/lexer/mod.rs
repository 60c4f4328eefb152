//! Lexer for label selectors.
//!
//! Turns selector text into a flat sequence of [`Token`]s. Whitespace is
//! recognized and dropped; every other character must belong to a token or
//! lexing fails with a [`LexError`].
//!
//! Precedence between overlapping lexemes:
//! - `!=` before `==` before `=` before `!`
//! - `notin` before `in`, both only as whole words
//! - label text last
//!
//! # Examples
//!
//! ```rust
//! use rusty_label_selector::lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("env in (prod, staging), !deprecated").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Label,
//!         TokenKind::In,
//!         TokenKind::Open,
//!         TokenKind::Label,
//!         TokenKind::Comma,
//!         TokenKind::Label,
//!         TokenKind::Close,
//!         TokenKind::Comma,
//!         TokenKind::Not,
//!         TokenKind::Label,
//!     ]
//! );
//! ```

pub mod label;
pub mod token;
pub mod whitespace;

pub use token::{Token, TokenKind};

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, value},
};
use tracing::{debug, trace};

use crate::error::LexError;
use label::{Keyword, keyword, label_text};
use whitespace::whitespace1;

/// Parse a single lexeme, returning its kind and, for labels, its text
fn lexeme(input: &str) -> IResult<&str, (TokenKind, Option<&str>)> {
    alt((
        value((TokenKind::Whitespace, None), whitespace1),
        value((TokenKind::Open, None), char('(')),
        value((TokenKind::Close, None), char(')')),
        value((TokenKind::NotEquals, None), tag("!=")),
        value((TokenKind::Equals, None), tag("==")),
        value((TokenKind::Equals, None), char('=')),
        value((TokenKind::Not, None), char('!')),
        map(keyword, |kw| match kw {
            Keyword::In => (TokenKind::In, None),
            Keyword::NotIn => (TokenKind::NotIn, None),
        }),
        value((TokenKind::Comma, None), char(',')),
        map(label_text, |text| (TokenKind::Label, Some(text))),
    ))
    .parse(input)
}

/// Split selector text into tokens, dropping whitespace
///
/// The whole input must be consumed. The first character that cannot start
/// any lexeme produces a [`LexError`] and no tokens are returned.
///
/// # Examples
///
/// ```
/// use rusty_label_selector::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("tier == web").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].kind, TokenKind::Equals);
/// assert_eq!(tokens[2].text(), Some("web"));
/// assert_eq!(tokens[2].offset, 8);
///
/// let err = tokenize("tier=\u{7}").unwrap_err();
/// assert_eq!(err.offset, 5);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while let Some(found) = rest.chars().next() {
        let offset = source.len() - rest.len();
        match lexeme(rest) {
            Ok((remaining, (kind, text))) => {
                match (kind, text) {
                    (TokenKind::Whitespace, _) => {}
                    (_, Some(text)) => tokens.push(Token::label(text, offset)),
                    (kind, None) => tokens.push(Token::new(kind, offset)),
                }
                rest = remaining;
            }
            Err(_) => {
                debug!(offset, ?found, "unrecognized character in selector");
                return Err(LexError { offset, found });
            }
        }
    }

    trace!(tokens = tokens.len(), "tokenized selector");
    Ok(tokens)
}
