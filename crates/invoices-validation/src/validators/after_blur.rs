//! Blur gate for arbitrary rules

use crate::blur::BlurTracker;
use crate::error::{ErrorList, ValidationResult};
use crate::traits::{SharedRule, ValidationRule};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Runs the wrapped rule only once `field` has been blurred.
#[derive(Clone)]
pub struct AfterBlur {
    field: String,
    inner: SharedRule,
    blur: Arc<BlurTracker>,
}

impl AfterBlur {
    pub fn new(field: impl Into<String>, inner: SharedRule, blur: Arc<BlurTracker>) -> Self {
        Self {
            field: field.into(),
            inner,
            blur,
        }
    }
}

impl std::fmt::Debug for AfterBlur {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AfterBlur")
            .field("field", &self.field)
            .field("inner", &self.inner.rule_name())
            .finish()
    }
}

#[async_trait]
impl ValidationRule for AfterBlur {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        if !self.blur.is_blurred(&self.field) {
            return Ok(ErrorList::new());
        }
        self.inner.validate(value).await
    }

    fn rule_name(&self) -> &'static str {
        self.inner.rule_name()
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "field": self.field,
            "after_blur": true,
            "inner": self.inner.parameters(),
        }))
    }
}
