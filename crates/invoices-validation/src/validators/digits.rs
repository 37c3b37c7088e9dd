//! Exact digit-count validator

use super::text_of;
use crate::blur::BlurTracker;
use crate::error::{ErrorList, ValidationResult};
use crate::messages::MessageResolver;
use crate::normalize::digit_count;
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Requires exactly `exact_digits` digits, ignoring separators.
///
/// Gated like [`super::PatternRule`]: silent until the digit count reaches
/// the target or the field is blurred.
#[derive(Debug, Clone)]
pub struct DigitsRule {
    field: String,
    exact_digits: usize,
    messages: Arc<MessageResolver>,
    blur: Arc<BlurTracker>,
}

impl DigitsRule {
    pub const NAME: &'static str = "DigitsExactLength";

    pub fn new(
        field: impl Into<String>,
        exact_digits: usize,
        messages: Arc<MessageResolver>,
        blur: Arc<BlurTracker>,
    ) -> Self {
        Self {
            field: field.into(),
            exact_digits,
            messages,
            blur,
        }
    }
}

#[async_trait]
impl ValidationRule for DigitsRule {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        let text = match text_of(value) {
            Some(text) => text,
            None => return Ok(ErrorList::new()),
        };

        let digits = digit_count(&text);
        let should_validate = digits >= self.exact_digits || self.blur.is_blurred(&self.field);
        if !should_validate || digits == self.exact_digits {
            return Ok(ErrorList::new());
        }

        let message = self
            .messages
            .resolve(&self.field, Self::NAME, &[Value::from(self.exact_digits)])
            .await?;
        Ok(ErrorList::single(message))
    }

    fn rule_name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "field": self.field, "exact_digits": self.exact_digits }))
    }
}
