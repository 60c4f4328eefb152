//! Fluent construction of selector expressions.

use crate::ast::{Expression, Operator};
use crate::error::ExpressionError;

use super::Selector;

/// Appends one expression on a fixed label to a [`Selector`]
///
/// Obtained from [`Selector::matching`]. Holds the selector by exclusive
/// borrow for its whole life, so it cannot be shared between writers.
/// Every operator method consumes the builder and returns the selector, or
/// an [`ExpressionError`] when the expression could not be written back as
/// selector text. A rejected expression leaves the selector unchanged.
///
/// # Examples
///
/// ```
/// use rusty_label_selector::Selector;
///
/// let mut selector = Selector::new();
/// selector.matching("env").exact("prod")?.matching("canary").not_exists()?;
/// assert_eq!(selector.to_string(), "env = prod, !canary");
///
/// assert!(selector.matching("zone").exact("eu west").is_err());
/// assert_eq!(selector.len(), 2);
/// # Ok::<(), rusty_label_selector::error::ExpressionError>(())
/// ```
#[must_use = "an expression is only added by calling one of the operator methods"]
pub struct ExpressionBuilder<'a> {
    selector: &'a mut Selector,
    name: String,
}

/// Result of an [`ExpressionBuilder`] operator method
pub type Built<'a> = Result<&'a mut Selector, ExpressionError>;

impl<'a> ExpressionBuilder<'a> {
    pub(super) fn new(selector: &'a mut Selector, name: String) -> Self {
        Self { selector, name }
    }

    /// The label this builder targets
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name in (values...)`: any of the values matches
    pub fn is_in<I, V>(self, values: I) -> Built<'a>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.finish(Operator::In, values)
    }

    /// `name notin (values...)`: none of the values matches
    pub fn not_in<I, V>(self, values: I) -> Built<'a>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.finish(Operator::NotIn, values)
    }

    /// `name = value`
    pub fn exact(self, value: impl Into<String>) -> Built<'a> {
        self.is_in([value])
    }

    /// `name != value`
    pub fn not(self, value: impl Into<String>) -> Built<'a> {
        self.not_in([value])
    }

    /// `name`: the label is present
    pub fn exists(self) -> Built<'a> {
        self.finish(Operator::Exists, std::iter::empty::<String>())
    }

    /// `!name`: the label is absent
    pub fn not_exists(self) -> Built<'a> {
        self.finish(Operator::NotExists, std::iter::empty::<String>())
    }

    fn finish<I, V>(self, operator: Operator, values: I) -> Built<'a>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let expression = Expression::new(self.name, operator, values);
        expression.validate()?;
        self.selector.push(expression);
        Ok(self.selector)
    }
}
