// Selector test cases
//
// These test cases cover:
// - Every expression form and its canonical rendering
// - Whitespace and `==` normalization
// - Empty and blank selectors
// - Syntax errors with their diagnostics

use crate::common::TestCase;

/// Valid selectors
/// Format: (input, canonical rendering)
pub const VALID_SELECTORS: &[(&str, &str)] = &[
    // Equality
    ("a=b", "a = b"),
    ("a = b", "a = b"),
    ("a==b", "a = b"),
    ("a != b", "a != b"),
    ("a!=b", "a != b"),
    // Set membership
    ("a in (b)", "a = b"),
    ("a notin (b)", "a != b"),
    ("a in(b,c)", "a in (b, c)"),
    ("a in ( b , c , d )", "a in (b, c, d)"),
    ("a notin(b ,c)", "a notin (b, c)"),
    // Existence
    ("a", "a"),
    ("!a", "!a"),
    ("! a", "!a"),
    // Lists of expressions
    ("a,b", "a, b"),
    ("a=b,c!=d,e in (f),!g", "a = b, c != d, e = f, !g"),
    ("a = b, a = b", "a = b, a = b"),
    // Whitespace
    ("\tenv\n=\nprod", "env = prod"),
    ("  env  ", "env"),
    // Empty
    ("", ""),
    ("   ", ""),
    // Labels that look like keywords
    ("index in (inner)", "index = inner"),
    ("a = in-place", "a = in-place"),
    ("notinuse notin (x)", "notinuse != x"),
    // Punctuation inside labels
    (
        "app.kubernetes.io/name = web, app.kubernetes.io/part-of != shop",
        "app.kubernetes.io/name = web, app.kubernetes.io/part-of != shop",
    ),
    ("x:y = 1:2", "x:y = 1:2"),
    ("owner = o'brien", "owner = o'brien"),
];

/// Invalid selectors, with an excerpt of the expected diagnostic
pub const INVALID_SELECTORS: &[TestCase] = &[
    // Value lists
    TestCase::invalid_with_error("a in ()", "unexpected `)` at offset 6, expected label")
        .with_description("empty value list"),
    TestCase::invalid_with_error("a in (b,)", "unexpected `)` at offset 8, expected label")
        .with_description("trailing comma in value list"),
    TestCase::invalid_with_error(
        "a in (b",
        "unexpected end of input at offset 7, expected `,` or `)`",
    )
    .with_description("unclosed value list"),
    TestCase::invalid_with_error("a in (b c)", "unexpected label at offset 8, expected `,` or `)`")
        .with_description("missing comma in value list"),
    TestCase::invalid_with_error("a notin b", "unexpected label at offset 8, expected `(`")
        .with_description("value list without parentheses"),
    TestCase::invalid_with_error("a = (b)", "unexpected `(` at offset 4, expected label")
        .with_description("parenthesized single value"),
    // Separators
    TestCase::invalid_with_error(
        "a,",
        "unexpected end of input at offset 2, expected label or `!`",
    )
    .with_description("trailing comma"),
    TestCase::invalid_with_error(",a", "unexpected `,` at offset 0, expected label or `!`")
        .with_description("leading comma"),
    TestCase::invalid_with_error("a,,b", "unexpected `,` at offset 2")
        .with_description("double comma"),
    TestCase::invalid_with_error(
        "a b",
        "unexpected label at offset 2, expected `in`, `notin`, `=`, `!=`, `,` or end of input",
    )
    .with_description("missing comma"),
    TestCase::invalid_with_error(
        "a = b = c",
        "unexpected `=` at offset 6, expected `,` or end of input",
    )
    .with_description("chained equality"),
    TestCase::invalid_with_error(
        "!a = b",
        "unexpected `=` at offset 3, expected `,` or end of input",
    )
    .with_description("negated existence with a value"),
    // Incomplete expressions
    TestCase::invalid_with_error("a =", "unexpected end of input at offset 3, expected label")
        .with_description("missing value"),
    TestCase::invalid_with_error("!", "unexpected end of input at offset 1, expected label")
        .with_description("bare negation"),
    TestCase::invalid_with_error("in", "unexpected `in` at offset 0, expected label or `!`")
        .with_description("keyword as name"),
    TestCase::invalid_with_error("a = notin", "unexpected `notin` at offset 4, expected label")
        .with_description("keyword as value"),
    TestCase::invalid_with_error("(a)", "unexpected `(` at offset 0, expected label or `!`")
        .with_description("parenthesized expression"),
    TestCase::invalid("a !b").with_description("negation after a name"),
    TestCase::invalid("!!a").with_description("double negation"),
    // Lexical
    TestCase::invalid_with_error("a = \u{1}", "unexpected character '\\u{1}' at offset 4")
        .with_description("control character"),
];
