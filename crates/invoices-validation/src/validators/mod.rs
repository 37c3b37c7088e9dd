//! Built-in validation rules

pub mod after_blur;
pub mod custom;
pub mod digits;
pub mod length;
pub mod modulo11;
pub mod pattern;
pub mod required;

pub use after_blur::AfterBlur;
pub use custom::CustomRule;
pub use digits::DigitsRule;
pub use length::{LengthConstraint, LengthRule};
pub use modulo11::{is_valid_modulo11, Modulo11Rule};
pub use pattern::PatternRule;
pub use required::RequiredRule;

use serde_json::Value;
use std::borrow::Cow;

/// Null, empty and whitespace-only text count as "no value".
pub(crate) fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text seen by shape rules. `None` when the value is absent or has no
/// textual form (arrays, objects).
pub(crate) fn text_of(value: &Value) -> Option<Cow<'_, str>> {
    if is_absent(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}
