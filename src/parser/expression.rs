//! Expression parsing for label selectors
//!
//! Syntax, tried in this order:
//! ```text
//! name in (value, ...)
//! name notin (value, ...)
//! name = value
//! name != value
//! !name
//! name
//! ```
//!
//! Value lists hold at least one value and no trailing comma.

use nom::{Parser, branch::alt, combinator::map};

use crate::ast::{Expression, Operator};
use crate::lexer::TokenKind;

use super::primitive::{PResult, Tokens, label, token};

/// Parse `(value, ...)`
pub(crate) fn value_list(input: Tokens<'_>) -> PResult<'_, Vec<String>> {
    let (input, _) = token(TokenKind::Open)(input)?;
    let (mut input, first) = label(input)?;
    let mut values = vec![first.to_string()];

    loop {
        let (rest, separator) =
            alt((token(TokenKind::Comma), token(TokenKind::Close))).parse(input)?;
        if separator.kind == TokenKind::Close {
            return Ok((rest, values));
        }
        let (rest, value) = label(rest)?;
        values.push(value.to_string());
        input = rest;
    }
}

fn in_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    map(
        (label, token(TokenKind::In), value_list),
        |(name, _, values)| Expression::new(name, Operator::In, values),
    )
    .parse(input)
}

fn not_in_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    map(
        (label, token(TokenKind::NotIn), value_list),
        |(name, _, values)| Expression::new(name, Operator::NotIn, values),
    )
    .parse(input)
}

fn equals_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    map(
        (label, token(TokenKind::Equals), label),
        |(name, _, value)| Expression::exact(name, value),
    )
    .parse(input)
}

fn not_equals_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    map(
        (label, token(TokenKind::NotEquals), label),
        |(name, _, value)| Expression::not_exact(name, value),
    )
    .parse(input)
}

fn not_exists_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    map((token(TokenKind::Not), label), |(_, name)| {
        Expression::not_exists(name)
    })
    .parse(input)
}

fn exists_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    map(label, |name| Expression::exists(name)).parse(input)
}

/// Parse one of the forms that continue past the label name
///
/// Used to report what else could have followed a bare label.
pub(crate) fn operator_expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    alt((
        in_expression,
        not_in_expression,
        equals_expression,
        not_equals_expression,
    ))
    .parse(input)
}

/// Parse a single selector expression
pub(crate) fn expression(input: Tokens<'_>) -> PResult<'_, Expression> {
    alt((
        operator_expression,
        not_exists_expression,
        exists_expression,
    ))
    .parse(input)
}
