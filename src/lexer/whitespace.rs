//! Whitespace parsers for label selectors.
//!
//! Any Unicode whitespace separates tokens. Whitespace never appears in the
//! token stream handed to the parser.
//!
//! # Examples
//!
//! ```rust
//! use rusty_label_selector::lexer::whitespace::whitespace1;
//!
//! let (rest, ws) = whitespace1(" \t env").unwrap();
//! assert_eq!(ws, " \t ");
//! assert_eq!(rest, "env");
//! ```

use nom::{IResult, bytes::complete::take_while1};

/// Check if a character is whitespace.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Parse one or more whitespace characters.
pub fn whitespace1(input: &str) -> IResult<&str, &str> {
    take_while1(is_whitespace)(input)
}
