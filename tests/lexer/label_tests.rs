// Label lexing test cases
//
// These test cases cover:
// - Label text (names and values share one lexical class)
// - Keywords, which are reserved only as whole words
// - Reserved punctuation
// - Characters that cannot start any token

/// Text that lexes as exactly one label token
pub const VALID_LABELS: &[&str] = &[
    "env",
    "a",
    "A1",
    "app.kubernetes.io/name",
    "a-b_c",
    "version:1.2.3",
    "x:y",
    "team@example.com",
    "#1",
    "*",
    "'quoted'",
    "\"double\"",
    "ünïcödé",
    "日本",
    // Keyword prefixes and suffixes
    "index",
    "inner",
    "notinuse",
    "in-place",
    "in.x",
    "within",
    "notin_",
    "Notin",
    "IN",
];

/// Whole-word keywords, never labels
pub const KEYWORDS: &[&str] = &["in", "notin"];

/// Characters that end a label
pub const RESERVED_CHARS: &[char] = &['(', ')', '!', '=', ','];

/// Inputs with a character no token can start with, and its byte offset
pub const INVALID_CHARACTERS: &[(&str, usize)] = &[
    ("\u{0}", 0),
    ("a\u{0}", 1),
    ("\u{7}", 0),
    ("env = \u{1b}[31m", 6),
    ("a\u{7f}b", 1),
    ("é\u{1}", 2),
    ("a in (b, \u{8})", 9),
];
