//! Backend for labels stored as a JSON object of string values
//!
//! Both dialects test pairs by JSON containment of `{"name": "value"}`. They
//! differ in the existence test: PostgreSQL asks for a top-level key with
//! `?`, MySQL for a path with `JSON_CONTAINS_PATH`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Backend, Predicate, quote, quote_mysql};

/// SQL dialect used to render JSON tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonDialect {
    /// `jsonb` operators
    #[default]
    Postgres,
    /// `JSON_*` functions
    MySql,
}

/// Compiles selectors against a JSON object column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonBackend {
    dialect: JsonDialect,
}

impl JsonBackend {
    /// Backend rendering for `dialect`
    pub fn new(dialect: JsonDialect) -> Self {
        Self { dialect }
    }

    /// Backend rendering `jsonb` operators
    pub fn postgres() -> Self {
        Self::new(JsonDialect::Postgres)
    }

    /// Backend rendering MySQL `JSON_*` functions
    pub fn mysql() -> Self {
        Self::new(JsonDialect::MySql)
    }

    /// The dialect used by [`Backend::render`]
    pub fn dialect(&self) -> JsonDialect {
        self.dialect
    }
}

/// A primitive test on a JSON label document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonTest {
    /// The document contains this JSON value
    Contains(Value),
    /// The document has this top-level key
    KeyExists(String),
    /// The document has a value at `$."name"`
    PathExists(String),
}

impl Backend for JsonBackend {
    type Labels = Value;
    type Test = JsonTest;

    fn contains(&self, name: &str, value: &str) -> JsonTest {
        let mut object = Map::new();
        object.insert(name.to_string(), Value::String(value.to_string()));
        JsonTest::Contains(Value::Object(object))
    }

    /// One containment test against an object of every pair
    ///
    /// A name given twice cannot be expressed as one object, so those
    /// pairs are tested one by one.
    fn contains_all(&self, pairs: &[(String, String)]) -> Predicate<JsonTest> {
        let mut object = Map::new();
        for (name, value) in pairs {
            if object.contains_key(name) {
                return Predicate::all(
                    pairs
                        .iter()
                        .map(|(name, value)| Predicate::Test(self.contains(name, value))),
                );
            }
            object.insert(name.clone(), Value::String(value.clone()));
        }
        if object.is_empty() {
            Predicate::always()
        } else {
            Predicate::Test(JsonTest::Contains(Value::Object(object)))
        }
    }

    fn exists(&self, name: &str) -> JsonTest {
        match self.dialect {
            JsonDialect::Postgres => JsonTest::KeyExists(name.to_string()),
            JsonDialect::MySql => JsonTest::PathExists(name.to_string()),
        }
    }

    fn evaluate(&self, test: &JsonTest, labels: &Value) -> bool {
        match test {
            JsonTest::Contains(pattern) => json_contains(labels, pattern),
            JsonTest::KeyExists(name) | JsonTest::PathExists(name) => {
                labels.as_object().is_some_and(|o| o.contains_key(name))
            }
        }
    }

    fn render(&self, test: &JsonTest, column: &str) -> String {
        match (self.dialect, test) {
            (JsonDialect::Postgres, JsonTest::Contains(pattern)) => {
                format!("{} @> {}::jsonb", column, quote(&pattern.to_string()))
            }
            (JsonDialect::MySql, JsonTest::Contains(pattern)) => format!(
                "JSON_CONTAINS({}, {})",
                column,
                quote_mysql(&pattern.to_string())
            ),
            (_, JsonTest::KeyExists(name)) => format!("{} ? {}", column, quote(name)),
            (_, JsonTest::PathExists(name)) => format!(
                "JSON_CONTAINS_PATH({}, 'one', {})",
                column,
                quote_mysql(&json_path(name))
            ),
        }
    }
}

/// `$."name"` with the key JSON-escaped
fn json_path(name: &str) -> String {
    format!("$.{}", Value::String(name.to_string()))
}

/// `jsonb @>` containment: objects by key subset, arrays by element
/// subset, scalars by equality
pub fn json_contains(document: &Value, pattern: &Value) -> bool {
    match (document, pattern) {
        (Value::Object(document), Value::Object(pattern)) => pattern
            .iter()
            .all(|(key, p)| document.get(key).is_some_and(|d| json_contains(d, p))),
        (Value::Array(document), Value::Array(pattern)) => pattern
            .iter()
            .all(|p| document.iter().any(|d| json_contains(d, p))),
        (document, pattern) => document == pattern,
    }
}
