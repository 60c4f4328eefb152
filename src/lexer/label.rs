//! Label text and keyword parsing.
//!
//! A label is any maximal run of characters other than whitespace, control
//! characters and the reserved punctuation `(`, `)`, `!`, `=`, `,`. Label
//! names and label values share the same lexical form.
//!
//! Every Unicode whitespace character ends a label, not just the space, so
//! `a\tb` lexes as the two labels `a` and `b`.
//!
//! The keywords `in` and `notin` are only recognized as whole words, so
//! `index` or `notinuse` lex as labels.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::satisfy,
    combinator::{not, value},
    sequence::terminated,
};

/// Characters that terminate a label
pub const RESERVED: [char; 5] = ['(', ')', '!', '=', ','];

/// Selector keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `in`
    In,
    /// `notin`
    NotIn,
}

impl Keyword {
    /// Get the keyword as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::In => "in",
            Keyword::NotIn => "notin",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check if a character can be part of a label
#[inline]
pub fn is_label_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !RESERVED.contains(&c)
}

/// Check whether `text` survives lexing as a single label token
///
/// # Examples
///
/// ```
/// use rusty_label_selector::lexer::label::is_label;
///
/// assert!(is_label("app.kubernetes.io/name"));
/// assert!(is_label("index"));
/// assert!(!is_label("in"));
/// assert!(!is_label("a b"));
/// assert!(!is_label(""));
/// ```
pub fn is_label(text: &str) -> bool {
    matches!(label_text(text), Ok(("", _))) && keyword(text).is_err()
}

/// Parse label text
///
/// # Examples
///
/// ```
/// use rusty_label_selector::lexer::label::label_text;
///
/// let (rest, name) = label_text("tier=web").unwrap();
/// assert_eq!(name, "tier");
/// assert_eq!(rest, "=web");
///
/// let (rest, name) = label_text("app.kubernetes.io/name in (x)").unwrap();
/// assert_eq!(name, "app.kubernetes.io/name");
/// assert_eq!(rest, " in (x)");
/// ```
pub fn label_text(input: &str) -> IResult<&str, &str> {
    take_while1(is_label_char)(input)
}

/// Parse a keyword that is not immediately followed by label characters
///
/// `notin` is tried before `in`.
///
/// # Examples
///
/// ```
/// use rusty_label_selector::lexer::label::{keyword, Keyword};
///
/// assert_eq!(keyword("notin (a)").unwrap().1, Keyword::NotIn);
/// assert_eq!(keyword("in(a)").unwrap().1, Keyword::In);
/// assert!(keyword("index").is_err());
/// ```
pub fn keyword(input: &str) -> IResult<&str, Keyword> {
    terminated(
        alt((
            value(Keyword::NotIn, tag("notin")),
            value(Keyword::In, tag("in")),
        )),
        not(satisfy(is_label_char)),
    )
    .parse(input)
}
