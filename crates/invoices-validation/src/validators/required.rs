//! Required field validator

use super::is_absent;
use crate::error::{ErrorList, ValidationResult};
use crate::messages::MessageResolver;
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Fails when the value is null, or text that is empty or whitespace-only.
///
/// Any other value (a selected option, a number, `false`) counts as present.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    field: String,
    messages: Arc<MessageResolver>,
}

impl RequiredRule {
    pub const NAME: &'static str = "Required";

    pub fn new(field: impl Into<String>, messages: Arc<MessageResolver>) -> Self {
        Self {
            field: field.into(),
            messages,
        }
    }
}

#[async_trait]
impl ValidationRule for RequiredRule {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        if !is_absent(value) {
            return Ok(ErrorList::new());
        }

        let message = self.messages.resolve(&self.field, Self::NAME, &[]).await?;
        Ok(ErrorList::single(message))
    }

    fn rule_name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "field": self.field }))
    }
}
