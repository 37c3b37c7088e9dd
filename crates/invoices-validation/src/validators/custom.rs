//! Custom validation functions and closures

use super::is_absent;
use crate::error::{ErrorList, ValidationResult};
use crate::messages::MessageResolver;
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Synchronous check returning the errors for a value
pub type SyncCheckFn = Arc<dyn Fn(&Value) -> ErrorList + Send + Sync>;

/// Synchronous predicate, `true` meaning valid
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Clone)]
enum Check {
    Direct(SyncCheckFn),
    Localized {
        field: String,
        messages: Arc<MessageResolver>,
        predicate: PredicateFn,
    },
}

/// Rule backed by a user-supplied closure.
///
/// Synchronous checks resolve immediately, so they slot into the same async
/// chains as the built-in rules. Absent values are skipped unless
/// [`CustomRule::include_absent`] is set.
#[derive(Clone)]
pub struct CustomRule {
    name: String,
    check: Check,
    include_absent: bool,
}

impl CustomRule {
    /// Closure producing the error list directly
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> ErrorList + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Check::Direct(Arc::new(check)),
            include_absent: false,
        }
    }

    /// Predicate whose failure message resolves as `{field}{name}`, then `{name}`
    pub fn localized<F>(
        name: impl Into<String>,
        field: impl Into<String>,
        messages: Arc<MessageResolver>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Check::Localized {
                field: field.into(),
                messages,
                predicate: Arc::new(predicate),
            },
            include_absent: false,
        }
    }

    /// Also run the check for null/blank values
    pub fn include_absent(mut self, include: bool) -> Self {
        self.include_absent = include;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .field("localized", &matches!(self.check, Check::Localized { .. }))
            .field("include_absent", &self.include_absent)
            .finish()
    }
}

#[async_trait]
impl ValidationRule for CustomRule {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        if !self.include_absent && is_absent(value) {
            return Ok(ErrorList::new());
        }

        match &self.check {
            Check::Direct(check) => Ok(check(value)),
            Check::Localized {
                field,
                messages,
                predicate,
            } => {
                if predicate(value) {
                    return Ok(ErrorList::new());
                }
                let message = messages.resolve(field, &self.name, &[]).await?;
                Ok(ErrorList::single(message))
            }
        }
    }

    fn rule_name(&self) -> &'static str {
        "Custom"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "name": self.name,
            "include_absent": self.include_absent,
        }))
    }
}
