//! AST type definitions for label selectors
//!
//! A selector is a conjunction of [`Expression`]s. Each expression names a
//! label and applies one [`Operator`] to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExpressionError;
use crate::lexer::label::is_label;

/// Label selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// The label has any of the values (`=` with a single value)
    In,
    /// The label has none of the values (`!=` with a single value)
    NotIn,
    /// The label is present, whatever its value
    Exists,
    /// The label is absent
    NotExists,
}

impl Operator {
    /// Check if this operator takes a value list
    pub fn takes_values(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Check if this is a negative operator (`notin`, `!=`, `!`)
    pub fn is_negative(&self) -> bool {
        matches!(self, Operator::NotIn | Operator::NotExists)
    }
}

/// A single selector clause
///
/// Equality is structural and sensitive to the order of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    /// Label name
    pub name: String,
    /// Matching operator
    pub operator: Operator,
    /// Candidate values, empty for `Exists` and `NotExists`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Expression {
    /// Create a new expression
    pub fn new<I, V>(name: impl Into<String>, operator: Operator, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `name = value`
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Operator::In, [value])
    }

    /// `name != value`
    pub fn not_exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Operator::NotIn, [value])
    }

    /// `name`
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: Operator::Exists,
            values: Vec::new(),
        }
    }

    /// `!name`
    pub fn not_exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: Operator::NotExists,
            values: Vec::new(),
        }
    }

    /// Check if this is an exact match: `In` with exactly one value
    pub fn is_exact_match(&self) -> bool {
        self.exact_value().is_some()
    }

    /// The single value of an exact match
    pub fn exact_value(&self) -> Option<&str> {
        match (self.operator, self.values.as_slice()) {
            (Operator::In, [value]) => Some(value),
            _ => None,
        }
    }

    /// Check that the canonical text of this expression parses back to it
    ///
    /// The name and every value must lex as a single label, and `In` and
    /// `NotIn` need at least one value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusty_label_selector::{Expression, Operator};
    /// use rusty_label_selector::error::ExpressionError;
    ///
    /// assert!(Expression::exact("env", "prod").validate().is_ok());
    /// assert_eq!(
    ///     Expression::exact("env", "prod east").validate(),
    ///     Err(ExpressionError::InvalidLabel("prod east".into()))
    /// );
    /// assert!(Expression::new("env", Operator::In, Vec::<String>::new()).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ExpressionError> {
        if let Some(bad) = std::iter::once(&self.name)
            .chain(&self.values)
            .find(|text| !is_label(text))
        {
            return Err(ExpressionError::InvalidLabel(bad.clone()));
        }
        if self.operator.takes_values() && self.values.is_empty() {
            return Err(ExpressionError::NoValues {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operator, self.values.as_slice()) {
            (Operator::Exists, _) => write!(f, "{}", self.name),
            (Operator::NotExists, _) => write!(f, "!{}", self.name),
            (Operator::In, [value]) => write!(f, "{} = {}", self.name, value),
            (Operator::NotIn, [value]) => write!(f, "{} != {}", self.name, value),
            (Operator::In, values) => write!(f, "{} in ({})", self.name, values.join(", ")),
            (Operator::NotIn, values) => {
                write!(f, "{} notin ({})", self.name, values.join(", "))
            }
        }
    }
}
