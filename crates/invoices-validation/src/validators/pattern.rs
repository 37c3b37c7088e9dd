//! Format validator using regular expressions, gated on typing progress

use super::text_of;
use crate::blur::BlurTracker;
use crate::error::{ErrorList, ValidationFault, ValidationResult};
use crate::messages::MessageResolver;
use crate::normalize::digit_count;
use crate::traits::ValidationRule;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// Checks a present value against a pattern.
///
/// The check only runs once the user plausibly finished typing: the value
/// holds at least `required_digits` digits, or the field has been blurred.
/// The pattern is searched in the value, so anchor it (`^...$`) to require a
/// full match.
#[derive(Debug, Clone)]
pub struct PatternRule {
    field: String,
    pattern: Regex,
    required_digits: usize,
    messages: Arc<MessageResolver>,
    blur: Arc<BlurTracker>,
}

impl PatternRule {
    pub const NAME: &'static str = "Format";

    pub fn new(
        field: impl Into<String>,
        pattern: &str,
        required_digits: usize,
        messages: Arc<MessageResolver>,
        blur: Arc<BlurTracker>,
    ) -> ValidationResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| ValidationFault::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::from_regex(field, regex, required_digits, messages, blur))
    }

    /// Create a rule from an already compiled Regex
    pub fn from_regex(
        field: impl Into<String>,
        pattern: Regex,
        required_digits: usize,
        messages: Arc<MessageResolver>,
        blur: Arc<BlurTracker>,
    ) -> Self {
        Self {
            field: field.into(),
            pattern,
            required_digits,
            messages,
            blur,
        }
    }

    pub fn pattern_string(&self) -> &str {
        self.pattern.as_str()
    }

    fn should_validate(&self, text: &str) -> bool {
        digit_count(text) >= self.required_digits || self.blur.is_blurred(&self.field)
    }
}

#[async_trait]
impl ValidationRule for PatternRule {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        let text = match text_of(value) {
            Some(text) => text,
            None => return Ok(ErrorList::new()),
        };

        if !self.should_validate(&text) || self.pattern.is_match(&text) {
            return Ok(ErrorList::new());
        }

        let message = self.messages.resolve(&self.field, Self::NAME, &[]).await?;
        Ok(ErrorList::single(message))
    }

    fn rule_name(&self) -> &'static str {
        Self::NAME
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "field": self.field,
            "pattern": self.pattern.as_str(),
            "required_digits": self.required_digits,
        }))
    }
}
