//! Selector model
//!
//! - [`LabelSelector`] is the read-only capability every selector shape
//!   implements: visiting its expressions in order.
//! - [`Selector`] owns its expressions and is extended through an
//!   [`ExpressionBuilder`].
//! - [`Combined`] is a lazy view over other selectors, see [`combine`].
//!
//! Matching a selector is the conjunction of its expressions.
//!
//! # Example
//!
//! ```rust
//! use rusty_label_selector::{LabelSelectorExt, Selector};
//!
//! let mut selector = Selector::new();
//! selector
//!     .matching("env")
//!     .is_in(["prod", "staging"])?
//!     .matching("tier")
//!     .exact("web")?
//!     .matching("deprecated")
//!     .not_exists()?;
//!
//! assert_eq!(
//!     selector.to_string(),
//!     "env in (prod, staging), tier = web, !deprecated"
//! );
//! assert_eq!(selector.labels(), vec!["env", "tier", "deprecated"]);
//! # Ok::<(), rusty_label_selector::ExpressionError>(())
//! ```

mod builder;
mod combined;

pub use builder::{Built, ExpressionBuilder};
pub use combined::{Combined, combine, merge};

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize, Serializer};

use crate::ast::Expression;
use crate::matcher::{self, Labels};

/// Read-only access to an ordered sequence of expressions
///
/// Implemented by owned selectors, combined views, and by the usual
/// pointer and lock wrappers around them. Visiting never mutates.
pub trait LabelSelector {
    /// Visit the expressions in order until `visit` breaks
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()>;
}

/// Queries available on every [`LabelSelector`]
pub trait LabelSelectorExt: LabelSelector {
    /// Call `f` on every expression in order
    fn for_each_expression(&self, mut f: impl FnMut(&Expression)) {
        let _ = self.try_visit(&mut |e| {
            f(e);
            ControlFlow::Continue(())
        });
    }

    /// Check that `predicate` holds for every expression, stopping at the
    /// first failure
    fn all_expressions(&self, mut predicate: impl FnMut(&Expression) -> bool) -> bool {
        self.try_visit(&mut |e| {
            if predicate(e) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
        .is_continue()
    }

    /// Number of expressions
    fn expression_count(&self) -> usize {
        let mut count = 0;
        self.for_each_expression(|_| count += 1);
        count
    }

    /// Materialize into an owned selector, copying every expression
    fn to_selector(&self) -> Selector {
        let mut expressions = Vec::new();
        self.for_each_expression(|e| expressions.push(e.clone()));
        Selector { expressions }
    }

    /// `(name, value)` of every exact match, in order
    fn exact_matches(&self) -> Vec<(String, String)> {
        let mut matches = Vec::new();
        self.for_each_expression(|e| {
            if let Some(value) = e.exact_value() {
                matches.push((e.name.clone(), value.to_string()));
            }
        });
        matches
    }

    /// Distinct label names, in order of first appearance
    fn labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        self.for_each_expression(|e| {
            if seen.insert(e.name.clone()) {
                names.push(e.name.clone());
            }
        });
        names
    }

    /// Expressions targeting the label `name`
    fn for_label(&self, name: &str) -> Vec<Expression> {
        let mut found = Vec::new();
        self.for_each_expression(|e| {
            if e.name == name {
                found.push(e.clone());
            }
        });
        found
    }

    /// Canonical text: expressions joined by `", "`
    fn render(&self) -> String {
        let mut out = String::new();
        self.for_each_expression(|e| {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&e.to_string());
        });
        out
    }

    /// Element-wise, order-sensitive comparison with another selector
    fn sequence_eq<S: LabelSelector + ?Sized>(&self, other: &S) -> bool {
        self.to_selector() == other.to_selector()
    }

    /// Check whether `labels` satisfy this selector
    fn matches<L: Labels + ?Sized>(&self, labels: &L) -> bool {
        matcher::matches(self, labels)
    }

    /// Check whether `name<delimiter>value` label strings satisfy this selector
    fn matches_delimited<T: AsRef<str>>(&self, labels: &[T], delimiter: &str) -> bool {
        matcher::matches_delimited(self, labels, delimiter)
    }

    /// Lazily AND this selector with `other`
    fn combine<'a>(&'a self, other: &'a dyn LabelSelector) -> Combined<'a>
    where
        Self: Sized,
    {
        combine(&[self, other])
    }

    /// AND this selector with `other` into a new, deduplicated selector
    fn merge(&self, other: &dyn LabelSelector) -> Selector
    where
        Self: Sized,
    {
        merge(&[self, other])
    }
}

impl<T: LabelSelector + ?Sized> LabelSelectorExt for T {}

/// A materialized, ordered list of expressions
///
/// Only grows, through [`Selector::matching`]. Cloning copies every
/// expression. Equality is order-sensitive even though matching is not.
///
/// Serializes as its canonical text. Serializing fails when an expression
/// built with [`Selector::from_expressions`] would not parse back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Selector {
    expressions: Vec<Expression>,
}

impl Selector {
    /// Create an empty selector, which matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector from existing expressions
    pub fn from_expressions(expressions: impl IntoIterator<Item = Expression>) -> Self {
        Self {
            expressions: expressions.into_iter().collect(),
        }
    }

    /// Start a new expression on the label `name`
    ///
    /// The builder is finished by one of its operator methods, which append
    /// the expression and hand the selector back for chaining.
    pub fn matching(&mut self, name: impl Into<String>) -> ExpressionBuilder<'_> {
        ExpressionBuilder::new(self, name.into())
    }

    /// The expressions in insertion order
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expression> {
        self.expressions.iter()
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    fn push(&mut self, expression: Expression) {
        self.expressions.push(expression);
    }
}

impl LabelSelector for Selector {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.expressions.iter().try_for_each(visit)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.expressions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}

impl FromIterator<Expression> for Selector {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Self::from_expressions(iter)
    }
}

impl IntoIterator for Selector {
    type Item = Expression;
    type IntoIter = std::vec::IntoIter<Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.expressions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Selector {
    type Item = &'a Expression;
    type IntoIter = std::slice::Iter<'a, Expression>;

    fn into_iter(self) -> Self::IntoIter {
        self.expressions.iter()
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        for expression in &self.expressions {
            expression.validate().map_err(serde::ser::Error::custom)?;
        }
        serializer.collect_str(self)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

impl LabelSelector for [Expression] {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.iter().try_for_each(visit)
    }
}

impl<S: LabelSelector + ?Sized> LabelSelector for &S {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).try_visit(visit)
    }
}

impl<S: LabelSelector + ?Sized> LabelSelector for Box<S> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).try_visit(visit)
    }
}

impl<S: LabelSelector + ?Sized> LabelSelector for Rc<S> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).try_visit(visit)
    }
}

impl<S: LabelSelector + ?Sized> LabelSelector for Arc<S> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        (**self).try_visit(visit)
    }
}

/// Panics if the selector is currently mutably borrowed.
impl<S: LabelSelector + ?Sized> LabelSelector for RefCell<S> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.borrow().try_visit(visit)
    }
}

impl<S: LabelSelector + ?Sized> LabelSelector for RwLock<S> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        // Expressions are only ever appended whole, so a poisoned lock still
        // holds a consistent list.
        self.read()
            .unwrap_or_else(PoisonError::into_inner)
            .try_visit(visit)
    }
}

impl<S: LabelSelector + ?Sized> LabelSelector for Mutex<S> {
    fn try_visit(
        &self,
        visit: &mut dyn FnMut(&Expression) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_visit(visit)
    }
}
