//! Backend configuration
//!
//! ```rust
//! use rusty_label_selector::config::Settings;
//! use rusty_label_selector::predicate::JsonDialect;
//!
//! let settings = Settings::from_json(r#"{"delimiter": "=", "json_dialect": "mysql"}"#).unwrap();
//! assert_eq!(settings.collection_backend().delimiter(), "=");
//! assert_eq!(settings.json_backend().dialect(), JsonDialect::MySql);
//!
//! assert!(Settings::from_json(r#"{"delimiter": ""}"#).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::matcher::DEFAULT_DELIMITER;
use crate::predicate::{CollectionBackend, JsonBackend, JsonDialect};

/// Failure to load [`Settings`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("label delimiter must not be empty")]
    EmptyDelimiter,
}

/// How labels are laid out in storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Separator between name and value in delimited labels
    pub delimiter: String,
    /// Dialect for JSON label documents
    pub json_dialect: JsonDialect,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            json_dialect: JsonDialect::default(),
        }
    }
}

impl Settings {
    /// Load settings from JSON, missing fields taking their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings no backend can work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(())
    }

    /// Backend for delimited label collections
    pub fn collection_backend(&self) -> CollectionBackend {
        CollectionBackend::new(self.delimiter.clone())
    }

    /// Backend for JSON label documents
    pub fn json_backend(&self) -> JsonBackend {
        JsonBackend::new(self.json_dialect)
    }
}
