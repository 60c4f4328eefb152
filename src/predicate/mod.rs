//! Compiling selectors into backend predicates
//!
//! A selector compiles into a [`Predicate`]: a boolean tree over the
//! primitive tests of a [`Backend`]. The tree is the same for every backend,
//! only the primitives differ:
//!
//! 1. one batch containment test for all exact matches,
//! 2. multi-value `in`: OR of per-value containment,
//! 3. `notin` and `!=`: AND of per-value non-containment,
//! 4. `name` / `!name`: name presence and its negation.
//!
//! The resulting [`Filter`] evaluates in memory or renders a SQL fragment.
//!
//! # Examples
//!
//! ```rust
//! use rusty_label_selector::parse;
//! use rusty_label_selector::predicate::{Backend, CollectionBackend};
//!
//! let selector = parse("env = prod, tier in (web, api)").unwrap();
//! let filter = CollectionBackend::default().compile(&selector);
//!
//! let labels = vec!["env:prod".to_string(), "tier:api".to_string()];
//! assert!(filter.matches(&labels));
//! assert_eq!(
//!     filter.to_sql("labels"),
//!     "('env:prod' = ANY(labels) AND ('tier:web' = ANY(labels) OR 'tier:api' = ANY(labels)))"
//! );
//! ```

mod collection;
mod json;

pub use collection::{CollectionBackend, CollectionTest};
pub use json::{JsonBackend, JsonDialect, JsonTest, json_contains};

use std::fmt;
use std::ops;

use tracing::debug;

use crate::ast::Operator;
use crate::selector::{LabelSelector, LabelSelectorExt};

/// A boolean tree over backend tests
///
/// The combinators fold constants and flatten nested groups of the same
/// kind, so `always().and(p) == p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<T> {
    Const(bool),
    Test(T),
    Not(Box<Predicate<T>>),
    And(Vec<Predicate<T>>),
    Or(Vec<Predicate<T>>),
}

impl<T> Predicate<T> {
    /// The predicate every label set satisfies
    pub fn always() -> Self {
        Predicate::Const(true)
    }

    /// The predicate no label set satisfies
    pub fn never() -> Self {
        Predicate::Const(false)
    }

    /// A single backend test
    pub fn test(test: T) -> Self {
        Predicate::Test(test)
    }

    /// Conjunction of every predicate, `true` when there are none
    pub fn all(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut items = Vec::new();
        for p in predicates {
            match p {
                Predicate::Const(true) => {}
                Predicate::Const(false) => return Predicate::never(),
                Predicate::And(inner) => items.extend(inner),
                p => items.push(p),
            }
        }
        Self::group(items, true, Predicate::And)
    }

    /// Disjunction of every predicate, `false` when there are none
    pub fn any(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut items = Vec::new();
        for p in predicates {
            match p {
                Predicate::Const(false) => {}
                Predicate::Const(true) => return Predicate::always(),
                Predicate::Or(inner) => items.extend(inner),
                p => items.push(p),
            }
        }
        Self::group(items, false, Predicate::Or)
    }

    fn group(mut items: Vec<Self>, empty: bool, build: fn(Vec<Self>) -> Self) -> Self {
        match items.len() {
            0 => Predicate::Const(empty),
            1 => items.remove(0),
            _ => build(items),
        }
    }

    /// `self AND other`, folded like [`Predicate::all`]
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_label_selector::predicate::Predicate;
    ///
    /// assert_eq!(Predicate::always().and(Predicate::test("a")), Predicate::test("a"));
    /// assert_eq!(Predicate::never().and(Predicate::test("a")), Predicate::never());
    /// ```
    pub fn and(self, other: Self) -> Self {
        Self::all([self, other])
    }

    /// `self OR other`, folded like [`Predicate::any`]
    pub fn or(self, other: Self) -> Self {
        Self::any([self, other])
    }

    /// Logical negation; constants flip and double negation cancels
    pub fn negate(self) -> Self {
        match self {
            Predicate::Const(value) => Predicate::Const(!value),
            Predicate::Not(inner) => *inner,
            p => Predicate::Not(Box::new(p)),
        }
    }

    /// Number of primitive tests in the tree
    pub fn test_count(&self) -> usize {
        match self {
            Predicate::Const(_) => 0,
            Predicate::Test(_) => 1,
            Predicate::Not(inner) => inner.test_count(),
            Predicate::And(items) | Predicate::Or(items) => {
                items.iter().map(Predicate::test_count).sum()
            }
        }
    }

    /// Evaluate the tree, deciding each test with `decide`
    ///
    /// Groups short-circuit in order.
    pub fn evaluate<F>(&self, decide: &mut F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        match self {
            Predicate::Const(value) => *value,
            Predicate::Test(test) => decide(test),
            Predicate::Not(inner) => !inner.evaluate(decide),
            Predicate::And(items) => items.iter().all(|p| p.evaluate(decide)),
            Predicate::Or(items) => items.iter().any(|p| p.evaluate(decide)),
        }
    }

    /// Render the tree as a SQL boolean expression, each test through `render`
    pub fn render<F>(&self, render: &mut F) -> String
    where
        F: FnMut(&T) -> String,
    {
        match self {
            Predicate::Const(true) => "TRUE".to_string(),
            Predicate::Const(false) => "FALSE".to_string(),
            Predicate::Test(test) => render(test),
            Predicate::Not(inner) => match inner.as_ref() {
                Predicate::And(_) | Predicate::Or(_) => format!("NOT {}", inner.render(render)),
                _ => format!("NOT ({})", inner.render(render)),
            },
            Predicate::And(items) => Self::render_group(items, " AND ", render),
            Predicate::Or(items) => Self::render_group(items, " OR ", render),
        }
    }

    fn render_group<F>(items: &[Self], separator: &str, render: &mut F) -> String
    where
        F: FnMut(&T) -> String,
    {
        let parts: Vec<_> = items.iter().map(|p| p.render(render)).collect();
        format!("({})", parts.join(separator))
    }
}

impl<T> ops::Not for Predicate<T> {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}

/// Primitive operations of a label representation
pub trait Backend {
    /// The label set a compiled filter is evaluated against
    type Labels: ?Sized;
    /// A primitive test
    type Test: Clone + fmt::Debug + PartialEq;

    /// Test that label `name` has `value`
    fn contains(&self, name: &str, value: &str) -> Self::Test;

    /// Test that every `(name, value)` pair is present
    ///
    /// Defaults to an AND of [`Backend::contains`]; backends with a native
    /// batch test override it.
    fn contains_all(&self, pairs: &[(String, String)]) -> Predicate<Self::Test> {
        Predicate::all(
            pairs
                .iter()
                .map(|(name, value)| Predicate::Test(self.contains(name, value))),
        )
    }

    /// Test that a label called `name` is present
    fn exists(&self, name: &str) -> Self::Test;

    /// Decide a test against an in-memory label set
    fn evaluate(&self, test: &Self::Test, labels: &Self::Labels) -> bool;

    /// Render a test against `column` as a SQL fragment
    fn render(&self, test: &Self::Test, column: &str) -> String;

    /// Compile `selector` into a filter bound to this backend
    fn compile<S>(&self, selector: &S) -> Filter<Self>
    where
        S: LabelSelector + ?Sized,
        Self: Clone + Sized,
    {
        Filter::new(self.clone(), build_predicate(self, selector))
    }
}

/// Build the predicate for `selector` out of `backend` primitives
pub fn build_predicate<B, S>(backend: &B, selector: &S) -> Predicate<B::Test>
where
    B: Backend + ?Sized,
    S: LabelSelector + ?Sized,
{
    let exact = selector.exact_matches();
    let mut clauses = vec![backend.contains_all(&exact)];

    selector.for_each_expression(|e| {
        let name = e.name.as_str();
        let clause = match (e.operator, e.values.as_slice()) {
            // exact matches are in the batch; valueless lists match everything
            (Operator::In | Operator::NotIn, []) | (Operator::In, [_]) => return,
            (Operator::In, values) => Predicate::any(
                values
                    .iter()
                    .map(|v| Predicate::Test(backend.contains(name, v))),
            ),
            (Operator::NotIn, values) => Predicate::all(
                values
                    .iter()
                    .map(|v| !Predicate::Test(backend.contains(name, v))),
            ),
            (Operator::Exists, _) => Predicate::Test(backend.exists(name)),
            (Operator::NotExists, _) => !Predicate::Test(backend.exists(name)),
        };
        clauses.push(clause);
    });

    let predicate = Predicate::all(clauses);
    debug!(
        exact_matches = exact.len(),
        tests = predicate.test_count(),
        "compiled label selector"
    );
    predicate
}

/// A compiled selector bound to its backend
#[derive(Debug, Clone)]
pub struct Filter<B: Backend> {
    backend: B,
    predicate: Predicate<B::Test>,
}

impl<B: Backend> Filter<B> {
    /// Bind an already built predicate to `backend`
    pub fn new(backend: B, predicate: Predicate<B::Test>) -> Self {
        Self { backend, predicate }
    }

    /// The backend deciding and rendering tests
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The compiled predicate tree
    pub fn predicate(&self) -> &Predicate<B::Test> {
        &self.predicate
    }

    /// Drop the backend, keeping the predicate
    pub fn into_predicate(self) -> Predicate<B::Test> {
        self.predicate
    }

    /// Check whether `labels` pass the filter
    pub fn matches(&self, labels: &B::Labels) -> bool {
        self.predicate
            .evaluate(&mut |test: &B::Test| self.backend.evaluate(test, labels))
    }

    /// Render the filter against `column` as a SQL boolean expression
    pub fn to_sql(&self, column: &str) -> String {
        self.predicate
            .render(&mut |test: &B::Test| self.backend.render(test, column))
    }
}

/// Quote `text` as a standard SQL string literal
pub(crate) fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Quote `text` as a MySQL string literal, where `\` is an escape character
pub(crate) fn quote_mysql(text: &str) -> String {
    quote(&text.replace('\\', "\\\\"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;
    use crate::selector::Selector;

    fn t(name: &str) -> Predicate<String> {
        Predicate::Test(name.to_string())
    }

    fn show(p: &Predicate<String>) -> String {
        p.render(&mut |s: &String| s.clone())
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!(Predicate::always().and(t("a")), t("a"));
        assert_eq!(t("a").and(Predicate::never()), Predicate::never());
        assert_eq!(Predicate::never().or(t("a")), t("a"));
        assert_eq!(t("a").or(Predicate::always()), Predicate::always());
        assert_eq!(Predicate::<String>::all([]), Predicate::always());
        assert_eq!(Predicate::<String>::any([]), Predicate::never());
    }

    #[test]
    fn test_flattening() {
        let p = t("a").and(t("b")).and(t("c"));
        assert_eq!(p, Predicate::And(vec![t("a"), t("b"), t("c")]));
        let p = t("a").or(t("b").or(t("c")));
        assert_eq!(p, Predicate::Or(vec![t("a"), t("b"), t("c")]));
    }

    #[test]
    fn test_negation() {
        assert_eq!(!!t("a"), t("a"));
        assert_eq!(!Predicate::<String>::always(), Predicate::never());
        assert_eq!(!t("a"), Predicate::Not(Box::new(t("a"))));
    }

    #[test]
    fn test_render() {
        assert_eq!(show(&Predicate::always()), "TRUE");
        assert_eq!(show(&t("a").and(t("b").or(t("c")))), "(a AND (b OR c))");
        assert_eq!(show(&!t("a")), "NOT (a)");
        assert_eq!(show(&!(t("a").or(t("b")))), "NOT (a OR b)");
    }

    #[test]
    fn test_evaluate_short_circuits() {
        let p = t("no").and(t("yes"));
        let mut asked = Vec::new();
        let result = p.evaluate(&mut |s: &String| {
            asked.push(s.clone());
            s == "yes"
        });
        assert!(!result);
        assert_eq!(asked, vec!["no"]);
    }

    /// Records primitives by name so the compiled shape is easy to assert
    #[derive(Clone)]
    struct Names;

    impl Backend for Names {
        type Labels = [(String, String)];
        type Test = String;

        fn contains(&self, name: &str, value: &str) -> String {
            format!("{name}:{value}")
        }

        fn contains_all(&self, pairs: &[(String, String)]) -> Predicate<String> {
            if pairs.is_empty() {
                return Predicate::always();
            }
            let all: Vec<_> = pairs.iter().map(|(n, v)| format!("{n}:{v}")).collect();
            Predicate::Test(format!("all[{}]", all.join(",")))
        }

        fn exists(&self, name: &str) -> String {
            format!("has {name}")
        }

        fn evaluate(&self, test: &String, labels: &[(String, String)]) -> bool {
            labels.iter().any(|(n, v)| &format!("{n}:{v}") == test)
        }

        fn render(&self, test: &String, _column: &str) -> String {
            test.clone()
        }
    }

    #[test]
    fn test_compile_shape() {
        let selector: Selector = "a = 1, b in (2, 3), c != 4, d notin (5, 6), e, !f, g = 7"
            .parse()
            .unwrap();
        let filter = Names.compile(&selector);
        assert_eq!(
            filter.to_sql("col"),
            "(all[a:1,g:7] AND (b:2 OR b:3) AND NOT (c:4) AND NOT (d:5) AND NOT (d:6) \
             AND has e AND NOT (has f))"
        );
    }

    #[test]
    fn test_compile_empty_selector() {
        let filter = Names.compile(&Selector::new());
        assert_eq!(filter.predicate(), &Predicate::always());
        assert!(filter.matches(&[]));
    }

    #[test]
    fn test_compile_skips_valueless_lists() {
        let selector = Selector::from_expressions([
            Expression::new("a", Operator::In, Vec::<String>::new()),
            Expression::new("b", Operator::NotIn, Vec::<String>::new()),
        ]);
        assert_eq!(Names.compile(&selector).into_predicate(), Predicate::always());
    }

    #[test]
    fn test_default_contains_all() {
        #[derive(Clone)]
        struct Plain;
        impl Backend for Plain {
            type Labels = ();
            type Test = (String, String);
            fn contains(&self, name: &str, value: &str) -> Self::Test {
                (name.into(), value.into())
            }
            fn exists(&self, name: &str) -> Self::Test {
                (name.into(), String::new())
            }
            fn evaluate(&self, _: &Self::Test, _: &()) -> bool {
                true
            }
            fn render(&self, (n, v): &Self::Test, _: &str) -> String {
                format!("{n}={v}")
            }
        }
        let selector: Selector = "a = 1, b = 2".parse().unwrap();
        assert_eq!(Plain.compile(&selector).to_sql("x"), "(a=1 AND b=2)");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("it's"), "'it''s'");
    }

    #[test]
    fn test_quote_mysql_escapes_backslashes() {
        assert_eq!(quote(r"a\b"), r"'a\b'");
        assert_eq!(quote_mysql(r"a\b"), r"'a\\b'");
        assert_eq!(quote_mysql(r#"{"k":"a\"b'"}"#), r#"'{"k":"a\\"b''"}'"#);
    }
}
