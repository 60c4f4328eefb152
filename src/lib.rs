//! # Rusty Label Selector
//!
//! A small language for selecting entities by their labels, built on the
//! [nom](https://github.com/rust-bakery/nom) parser combinator library.
//!
//! A selector is a comma separated list of expressions, all of which must
//! hold:
//!
//! ```text
//! env in (prod, staging), tier = web, release != canary, team, !deprecated
//! ```
//!
//! The crate covers the whole path from text to a filter:
//! parsing with positional diagnostics, building selectors in code,
//! combining them, matching them in memory, and compiling them into
//! predicates that can be pushed down to a storage engine.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use rusty_label_selector::{parse, LabelSelectorExt};
//!
//! let selector = parse("env in (prod, staging), !deprecated").expect("valid selector");
//! let labels = HashMap::from([("env", "prod"), ("tier", "web")]);
//! assert!(selector.matches(&labels));
//! ```
//!
//! ## Examples
//!
//! ### Reporting syntax errors
//!
//! ```rust
//! use rusty_label_selector::Selector;
//!
//! let err = "env in (prod,)".parse::<Selector>().unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "invalid label selector \"env in (prod,)\": unexpected `)` at offset 13, expected label"
//! );
//! ```
//!
//! ### Building selectors in code
//!
//! ```rust
//! use rusty_label_selector::{parse, Selector};
//!
//! let mut selector = Selector::new();
//! selector
//!     .matching("env")
//!     .is_in(["prod", "staging"])?
//!     .matching("deprecated")
//!     .not_exists()?;
//!
//! assert_eq!(selector.to_string(), "env in (prod, staging), !deprecated");
//! assert_eq!(parse(&selector.to_string()), Some(selector));
//!
//! // text that would not parse back is rejected
//! assert!(Selector::new().matching("env").exact("prod east").is_err());
//! # Ok::<(), rusty_label_selector::ExpressionError>(())
//! ```
//!
//! ### Combining selectors
//!
//! ```rust
//! use rusty_label_selector::{combine, merge, parse, LabelSelectorExt};
//!
//! let base = parse("env = prod, tier").unwrap();
//! let extra = parse("tier, team = a").unwrap();
//!
//! assert_eq!(combine(&[&base, &extra]).render(), "env = prod, tier, tier, team = a");
//! assert_eq!(merge(&[&base, &extra]).to_string(), "env = prod, tier, team = a");
//! ```
//!
//! ### Compiling to a push-down predicate
//!
//! ```rust
//! use rusty_label_selector::parse;
//! use rusty_label_selector::predicate::{Backend, JsonBackend};
//! use serde_json::json;
//!
//! let filter = JsonBackend::postgres().compile(&parse("env = prod, !canary").unwrap());
//! assert_eq!(
//!     filter.to_sql("labels"),
//!     r#"(labels @> '{"env":"prod"}'::jsonb AND NOT (labels ? 'canary'))"#
//! );
//! assert!(filter.matches(&json!({"env": "prod"})));
//! ```
//!
//! ## Modules
//!
//! - [`ast`] - Expression and operator types
//! - [`lexer`] - Tokenizer
//! - [`parser`] - Grammar and parse entry points
//! - [`selector`] - Selector model, builder and algebra
//! - [`matcher`] - In-memory matching
//! - [`predicate`] - Predicate compiler and backends
//! - [`query`] - Filtering collections of labelled entities
//! - [`config`] - Backend settings
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level and
//! never installs a subscriber.

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod predicate;
pub mod query;
pub mod selector;

// Re-export commonly used types and entry points
pub use ast::{Expression, Operator};
pub use error::{ExpressionError, LexError, ParseError, SelectorError, SyntaxError};
pub use matcher::{Labels, matches, matches_delimited};
pub use parser::{parse, try_parse};
pub use selector::{
    Combined, ExpressionBuilder, LabelSelector, LabelSelectorExt, Selector, combine, merge,
};
