//! Backend for labels stored as a collection of `name<delimiter>value` strings
//!
//! In memory the labels are a `[String]`; in SQL they are a text array
//! column, tested with `@>`, `ANY` and `unnest`.

use crate::matcher::{DEFAULT_DELIMITER, Delimited, Labels};

use super::{Backend, Predicate, quote};

/// Compiles selectors against a column of `name<delimiter>value` strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionBackend {
    delimiter: String,
}

impl CollectionBackend {
    /// Backend for labels joined with `delimiter`
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Separator between name and value
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// The collection element for a label pair
    pub fn element(&self, name: &str, value: &str) -> String {
        format!("{}{}{}", name, self.delimiter, value)
    }
}

impl Default for CollectionBackend {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

/// A primitive test on a label collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionTest {
    /// Every element is in the collection
    ContainsAll(Vec<String>),
    /// The element is in the collection
    Contains(String),
    /// Some element names the label, with or without a value
    HasName(String),
}

impl Backend for CollectionBackend {
    type Labels = [String];
    type Test = CollectionTest;

    fn contains(&self, name: &str, value: &str) -> CollectionTest {
        CollectionTest::Contains(self.element(name, value))
    }

    fn contains_all(&self, pairs: &[(String, String)]) -> Predicate<CollectionTest> {
        match pairs {
            [] => Predicate::always(),
            [(name, value)] => Predicate::Test(self.contains(name, value)),
            pairs => Predicate::Test(CollectionTest::ContainsAll(
                pairs
                    .iter()
                    .map(|(name, value)| self.element(name, value))
                    .collect(),
            )),
        }
    }

    fn exists(&self, name: &str) -> CollectionTest {
        CollectionTest::HasName(name.to_string())
    }

    fn evaluate(&self, test: &CollectionTest, labels: &[String]) -> bool {
        match test {
            CollectionTest::ContainsAll(elements) => elements.iter().all(|e| labels.contains(e)),
            CollectionTest::Contains(element) => labels.contains(element),
            CollectionTest::HasName(name) => {
                Delimited::new(labels, &self.delimiter).contains_name(name)
            }
        }
    }

    fn render(&self, test: &CollectionTest, column: &str) -> String {
        match test {
            CollectionTest::ContainsAll(elements) => {
                let elements: Vec<_> = elements.iter().map(|e| quote(e)).collect();
                format!("{} @> ARRAY[{}]", column, elements.join(", "))
            }
            CollectionTest::Contains(element) => format!("{} = ANY({})", quote(element), column),
            CollectionTest::HasName(name) => {
                let prefix = format!("{}{}", escape_like(name), escape_like(&self.delimiter));
                format!(
                    "EXISTS (SELECT 1 FROM unnest({}) AS label WHERE label = {} OR label LIKE {})",
                    column,
                    quote(name),
                    quote(&format!("{prefix}%"))
                )
            }
        }
    }
}

/// Escape LIKE wildcards with the default backslash escape
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
