//! Validation outcomes and fault types

use serde::{Deserialize, Serialize};
use thiserror::Error;
use std::collections::HashMap;
use std::fmt;

pub type ValidationResult<T> = Result<T, ValidationFault>;

/// Ordered list of human-readable error messages for one field.
///
/// An empty list means the value is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<String>);

impl ErrorList {
    /// Create an empty (valid) error list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an error list holding a single message
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// Append a message after the existing ones
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Same as [`ErrorList::is_valid`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the list carries no errors
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Messages in the order the rules produced them
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the messages as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume the list, returning the messages
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for ErrorList {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

impl IntoIterator for ErrorList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("; "))
    }
}

/// Collection of failed fields after validating a whole form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormErrors {
    /// Map of field names to their (non-empty) error lists
    pub errors: HashMap<String, ErrorList>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Record the outcome for a field. Empty lists are not stored.
    pub fn add(&mut self, field: impl Into<String>, errors: ErrorList) {
        if errors.is_empty() {
            return;
        }
        let field = field.into();
        match self.errors.get_mut(&field) {
            Some(existing) => existing.0.extend(errors.0),
            None => {
                self.errors.insert(field, errors);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Total number of messages across all fields
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(ErrorList::len).sum()
    }

    pub fn get_field_errors(&self, field: &str) -> Option<&ErrorList> {
        self.errors.get(field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.get(field).map_or(false, |e| !e.is_empty())
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (field, errors) in other.errors {
            self.add(field, errors);
        }
    }

    /// Convert to the JSON envelope used by API responses
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            let mut fields: Vec<_> = self.errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            for (field, field_errors) in fields {
                for message in field_errors.iter() {
                    write!(f, "\n  {}: {}", field, message)?;
                }
            }
            Ok(())
        }
    }
}

/// Configuration or localization fault.
///
/// Never used for an invalid value; those are reported through [`ErrorList`].
#[derive(Debug, Error)]
pub enum ValidationFault {
    #[error("text lookup failed for '{key}' in scope '{scope}': {message}")]
    Lookup {
        key: String,
        scope: String,
        message: String,
    },

    #[error("text lookup for '{key}' in scope '{scope}' timed out after {timeout_ms} ms")]
    LookupTimeout {
        key: String,
        scope: String,
        timeout_ms: u64,
    },

    #[error("no message defined for '{specific}' nor for fallback '{generic}'")]
    MissingMessage { specific: String, generic: String },

    #[error("invalid format pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("message catalog error: {0}")]
    Catalog(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
