//! Length-based validators for text fields

use super::text_of;
use crate::error::{ErrorList, ValidationResult};
use crate::messages::MessageResolver;
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthConstraint {
    Exact(usize),
    Min(usize),
    Max(usize),
}

impl LengthConstraint {
    /// Rule name, also the message key suffix
    pub fn rule_name(&self) -> &'static str {
        match self {
            LengthConstraint::Exact(_) => "Length",
            LengthConstraint::Min(_) => "MinLength",
            LengthConstraint::Max(_) => "MaxLength",
        }
    }

    pub fn limit(&self) -> usize {
        match *self {
            LengthConstraint::Exact(n) | LengthConstraint::Min(n) | LengthConstraint::Max(n) => n,
        }
    }

    fn accepts(&self, length: usize) -> bool {
        match *self {
            LengthConstraint::Exact(n) => length == n,
            LengthConstraint::Min(n) => length >= n,
            LengthConstraint::Max(n) => length <= n,
        }
    }
}

/// Character-count constraint on a present value. Absent values pass.
#[derive(Debug, Clone)]
pub struct LengthRule {
    field: String,
    constraint: LengthConstraint,
    messages: Arc<MessageResolver>,
}

impl LengthRule {
    pub fn new(
        field: impl Into<String>,
        constraint: LengthConstraint,
        messages: Arc<MessageResolver>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint,
            messages,
        }
    }

    pub fn exact(field: impl Into<String>, length: usize, messages: Arc<MessageResolver>) -> Self {
        Self::new(field, LengthConstraint::Exact(length), messages)
    }

    pub fn min(field: impl Into<String>, length: usize, messages: Arc<MessageResolver>) -> Self {
        Self::new(field, LengthConstraint::Min(length), messages)
    }

    pub fn max(field: impl Into<String>, length: usize, messages: Arc<MessageResolver>) -> Self {
        Self::new(field, LengthConstraint::Max(length), messages)
    }

    pub fn constraint(&self) -> LengthConstraint {
        self.constraint
    }
}

#[async_trait]
impl ValidationRule for LengthRule {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        let text = match text_of(value) {
            Some(text) => text,
            None => return Ok(ErrorList::new()),
        };

        // Unicode-aware length
        if self.constraint.accepts(text.chars().count()) {
            return Ok(ErrorList::new());
        }

        let message = self
            .messages
            .resolve(
                &self.field,
                self.constraint.rule_name(),
                &[Value::from(self.constraint.limit())],
            )
            .await?;
        Ok(ErrorList::single(message))
    }

    fn rule_name(&self) -> &'static str {
        self.constraint.rule_name()
    }

    fn parameters(&self) -> Option<Value> {
        let key = match self.constraint {
            LengthConstraint::Exact(_) => "exact",
            LengthConstraint::Min(_) => "min",
            LengthConstraint::Max(_) => "max",
        };
        let mut params = serde_json::Map::new();
        params.insert("field".to_string(), Value::String(self.field.clone()));
        params.insert(key.to_string(), Value::from(self.constraint.limit()));
        Some(Value::Object(params))
    }
}
