//! Core traits: validation rules, text lookup collaborators and value conversion

use crate::error::{ErrorList, ValidationResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A single validation rule bound to a field.
///
/// Rules report invalid values through a non-empty [`ErrorList`]. An `Err` is
/// reserved for localization and configuration faults.
#[async_trait]
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Shared handle to a rule, as stored by registries and chains
pub type SharedRule = Arc<dyn ValidationRule>;

/// Result of a single text lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    /// Interpolated text, or the key itself when not found
    pub text: String,
    /// Whether the key was defined in the source
    pub found: bool,
}

impl LocalizedText {
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            found: true,
        }
    }

    pub fn missing(key: impl Into<String>) -> Self {
        Self {
            text: key.into(),
            found: false,
        }
    }
}

/// External source of localized texts.
///
/// `scope` identifies the resource set (the hosting form, or the shared rule
/// vocabulary) and `culture` is passed explicitly on every call.
#[async_trait]
pub trait TextLookup: Send + Sync {
    async fn lookup(
        &self,
        key: &str,
        scope: &str,
        culture: &str,
        args: &[Value],
    ) -> ValidationResult<LocalizedText>;
}

/// Trait for types that can be converted to a field value
pub trait ToFieldValue {
    fn to_field_value(&self) -> Value;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToFieldValue for &str {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToFieldValue for i32 {
    fn to_field_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToFieldValue for u32 {
    fn to_field_value(&self) -> Value {
        Value::Number(serde_json::Number::from(*self))
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToFieldValue for Value {
    fn to_field_value(&self) -> Value {
        self.clone()
    }
}

impl ToFieldValue for &Value {
    fn to_field_value(&self) -> Value {
        (*self).clone()
    }
}

impl<T> ToFieldValue for Option<T>
where
    T: ToFieldValue,
{
    fn to_field_value(&self) -> Value {
        match self {
            Some(value) => value.to_field_value(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_field_value() {
        assert_eq!("hello".to_field_value(), Value::String("hello".to_string()));
        assert_eq!(42i32.to_field_value(), Value::Number(serde_json::Number::from(42)));
        assert_eq!(true.to_field_value(), Value::Bool(true));

        let selected: Option<String> = Some("CZ".to_string());
        assert_eq!(selected.to_field_value(), Value::String("CZ".to_string()));

        let none: Option<String> = None;
        assert_eq!(none.to_field_value(), Value::Null);
    }

    #[test]
    fn test_localized_text_missing_uses_key() {
        let text = LocalizedText::missing("TelephoneFormat");
        assert!(!text.found);
        assert_eq!(text.text, "TelephoneFormat");
    }
}
