//! In-memory matching of selectors against label sets
//!
//! A selector matches when every expression matches:
//! - `In`: the label has any of the values
//! - `NotIn`: the label has none of the values
//! - `Exists` / `NotExists`: the label name is present / absent
//!
//! Label sets are anything implementing [`Labels`]: maps and JSON objects
//! answer by lookup, slices of pairs by linear scan, and [`Delimited`] wraps
//! `name<delimiter>value` strings.
//!
//! # Examples
//!
//! ```rust
//! use std::collections::HashMap;
//! use rusty_label_selector::{matcher, parse};
//!
//! let selector = parse("env in (prod, staging), !deprecated").unwrap();
//!
//! let labels = HashMap::from([("env", "prod"), ("tier", "web")]);
//! assert!(matcher::matches(&selector, &labels));
//!
//! assert!(matcher::matches_delimited(&selector, &["env:staging"], ":"));
//! assert!(!matcher::matches_delimited(&selector, &["env:dev"], ":"));
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde_json::{Map, Value};

use crate::ast::{Expression, Operator};
use crate::selector::{LabelSelector, LabelSelectorExt};

/// Delimiter between name and value in delimited label strings
pub const DEFAULT_DELIMITER: &str = ":";

/// A label set that can answer presence queries
pub trait Labels {
    /// Check whether a label called `name` is present
    fn contains_name(&self, name: &str) -> bool;

    /// Check whether the label `name` has the value `value`
    fn contains_pair(&self, name: &str, value: &str) -> bool;
}

impl<K, V, S> Labels for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.get(name).is_some_and(|v| v.as_ref() == value)
    }
}

impl<K, V> Labels for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.get(name).is_some_and(|v| v.as_ref() == value)
    }
}

impl<K, V> Labels for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn contains_name(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k.as_ref() == name)
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.iter()
            .any(|(k, v)| k.as_ref() == name && v.as_ref() == value)
    }
}

impl<K, V> Labels for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn contains_name(&self, name: &str) -> bool {
        self.as_slice().contains_name(name)
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.as_slice().contains_pair(name, value)
    }
}

/// JSON objects: only string values can equal a selector value
impl Labels for Map<String, Value> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.get(name).and_then(Value::as_str) == Some(value)
    }
}

/// Non-object JSON values contain no labels
impl Labels for Value {
    fn contains_name(&self, name: &str) -> bool {
        self.as_object().is_some_and(|o| o.contains_name(name))
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.as_object().is_some_and(|o| o.contains_pair(name, value))
    }
}

/// Label strings of the form `name<delimiter>value`
///
/// A string without the delimiter is a label with a name and no value: it
/// satisfies `Exists` but no `In`.
#[derive(Debug, Clone, Copy)]
pub struct Delimited<'a, T> {
    labels: &'a [T],
    delimiter: &'a str,
}

impl<'a, T: AsRef<str>> Delimited<'a, T> {
    /// View `labels` as pairs split on `delimiter`
    pub fn new(labels: &'a [T], delimiter: &'a str) -> Self {
        Self { labels, delimiter }
    }

    /// Split a label string into name and value on the first delimiter
    pub fn split<'s>(&self, label: &'s str) -> (&'s str, Option<&'s str>) {
        match label.split_once(self.delimiter) {
            Some((name, value)) => (name, Some(value)),
            None => (label, None),
        }
    }
}

impl<T: AsRef<str>> Labels for Delimited<'_, T> {
    fn contains_name(&self, name: &str) -> bool {
        self.labels.iter().any(|label| {
            let label = label.as_ref();
            label == name
                || label
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.starts_with(self.delimiter))
        })
    }

    fn contains_pair(&self, name: &str, value: &str) -> bool {
        self.labels.iter().any(|label| {
            label
                .as_ref()
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix(self.delimiter))
                == Some(value)
        })
    }
}

/// Check whether one expression matches `labels`
///
/// `In` and `NotIn` without values fall outside the operator table and
/// always match.
pub fn expression_matches<L: Labels + ?Sized>(expression: &Expression, labels: &L) -> bool {
    let name = expression.name.as_str();
    match (expression.operator, expression.values.as_slice()) {
        (Operator::In, values @ [_, ..]) => values.iter().any(|v| labels.contains_pair(name, v)),
        (Operator::NotIn, values @ [_, ..]) => {
            values.iter().all(|v| !labels.contains_pair(name, v))
        }
        (Operator::Exists, _) => labels.contains_name(name),
        (Operator::NotExists, _) => !labels.contains_name(name),
        _ => true,
    }
}

/// Check whether `labels` satisfy every expression of `selector`
pub fn matches<S, L>(selector: &S, labels: &L) -> bool
where
    S: LabelSelector + ?Sized,
    L: Labels + ?Sized,
{
    selector.all_expressions(|e| expression_matches(e, labels))
}

/// Check whether `name<delimiter>value` strings satisfy every expression
pub fn matches_delimited<S, T>(selector: &S, labels: &[T], delimiter: &str) -> bool
where
    S: LabelSelector + ?Sized,
    T: AsRef<str>,
{
    matches(selector, &Delimited::new(labels, delimiter))
}
