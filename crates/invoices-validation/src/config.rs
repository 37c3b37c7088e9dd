//! Validator configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Scope id of the shared rule vocabulary
pub const DEFAULT_SHARED_SCOPE: &str = "Validation";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// What to do when neither the field-specific nor the generic message exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingMessagePolicy {
    /// Show the generic key itself (the lookup's own not-found text)
    #[default]
    ReturnKey,
    /// Raise [`crate::ValidationFault::MissingMessage`]
    Fail,
}

impl FromStr for MissingMessagePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "return_key" | "key" => Ok(MissingMessagePolicy::ReturnKey),
            "fail" | "strict" => Ok(MissingMessagePolicy::Fail),
            _ => Err(ConfigError::InvalidValue {
                field: "missing_messages".to_string(),
                value: s.to_string(),
                expected: "return_key or fail".to_string(),
            }),
        }
    }
}

/// Settings for one form validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Culture passed to every text lookup (e.g. "cs-CZ")
    pub culture: String,
    /// Scope of the hosting form's own texts
    pub form_scope: String,
    /// Scope of the generic rule vocabulary
    pub shared_scope: String,
    pub missing_messages: MissingMessagePolicy,
    /// Upper bound for a single text lookup, in milliseconds
    pub lookup_timeout_ms: Option<u64>,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self {
            culture: "cs-CZ".to_string(),
            form_scope: "Form".to_string(),
            shared_scope: DEFAULT_SHARED_SCOPE.to_string(),
            missing_messages: MissingMessagePolicy::ReturnKey,
            lookup_timeout_ms: None,
        }
    }

    /// Missing messages fail loudly during development
    pub fn development() -> Self {
        Self {
            missing_messages: MissingMessagePolicy::Fail,
            ..Self::new()
        }
    }

    /// Invariant culture, strict messages and a short lookup bound
    pub fn testing() -> Self {
        Self {
            culture: String::new(),
            missing_messages: MissingMessagePolicy::Fail,
            lookup_timeout_ms: Some(1_000),
            ..Self::new()
        }
    }

    pub fn with_form_scope(mut self, scope: impl Into<String>) -> Self {
        self.form_scope = scope.into();
        self
    }

    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = culture.into();
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(culture) = env::var("INVOICES_CULTURE") {
            config.culture = culture;
        }

        if let Ok(scope) = env::var("INVOICES_SHARED_SCOPE") {
            config.shared_scope = scope;
        }

        if let Ok(policy) = env::var("INVOICES_MISSING_MESSAGES") {
            config.missing_messages = policy.parse()?;
        }

        if let Ok(timeout) = env::var("INVOICES_LOOKUP_TIMEOUT_MS") {
            let millis = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                field: "lookup_timeout_ms".to_string(),
                value: timeout.clone(),
                expected: "number of milliseconds".to_string(),
            })?;
            config.lookup_timeout_ms = Some(millis);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shared_scope.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "shared_scope".to_string(),
                value: self.shared_scope.clone(),
                expected: "non-empty scope id".to_string(),
            });
        }

        if self.form_scope.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "form_scope".to_string(),
                value: self.form_scope.clone(),
                expected: "non-empty scope id".to_string(),
            });
        }

        if self.lookup_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "lookup_timeout_ms".to_string(),
                value: "0".to_string(),
                expected: "positive number of milliseconds".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
