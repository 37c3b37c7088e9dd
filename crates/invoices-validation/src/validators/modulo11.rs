//! Modulo-11 checksum for Czech/Slovak bank account numbers

use super::text_of;
use crate::blur::BlurTracker;
use crate::error::{ErrorList, ValidationResult};
use crate::messages::MessageResolver;
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Weighted modulo-11 check.
///
/// Digits are weighted 1, 2, 3, ... from the rightmost digit. Six-digit
/// numbers accept a remainder of 0 or 1, seven to ten digits accept 0, 1 or
/// 10. Anything that is not 2–10 ASCII digits is rejected, and so are lengths
/// 2–5, which have no defined accept set.
pub fn is_valid_modulo11(account_number: &str) -> bool {
    if account_number.is_empty() || !account_number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let length = account_number.len();
    if !(2..=10).contains(&length) {
        return false;
    }

    let sum: u32 = account_number
        .bytes()
        .rev()
        .zip(1u32..)
        .map(|(digit, weight)| u32::from(digit - b'0') * weight)
        .sum();

    let remainder = sum % 11;

    match length {
        6 => matches!(remainder, 0 | 1),
        7..=10 => matches!(remainder, 0 | 1 | 10),
        // TODO: lengths 2-5 fail closed until product confirms which remainders they accept
        _ => false,
    }
}

/// Runs [`is_valid_modulo11`] on a present value once the field is blurred
#[derive(Debug, Clone)]
pub struct Modulo11Rule {
    field: String,
    messages: Arc<MessageResolver>,
    blur: Arc<BlurTracker>,
}

impl Modulo11Rule {
    pub const NAME: &'static str = "InvalidModulo11";

    pub fn new(
        field: impl Into<String>,
        messages: Arc<MessageResolver>,
        blur: Arc<BlurTracker>,
    ) -> Self {
        Self {
            field: field.into(),
            messages,
            blur,
        }
    }
}

#[async_trait]
impl ValidationRule for Modulo11Rule {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        if !self.blur.is_blurred(&self.field) {
            return Ok(ErrorList::new());
        }

        let text = match text_of(value) {
            Some(text) => text,
            None => return Ok(ErrorList::new()),
        };

        if is_valid_modulo11(&text) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resolver;

    #[test]
    fn test_six_digit_accepts_remainder_zero_or_one() {
        // 1*6 + 2*5 + 3*4 + 4*3 + 5*2 + 6*1 = 56, 56 % 11 = 1
        assert!(is_valid_modulo11("123456"));
        // 1*6 + 2*5 + 3*4 + 4*3 + 5*2 + 5*1 = 55, 55 % 11 = 0
        assert!(is_valid_modulo11("123455"));
        // 1*6 + 2*5 + 3*4 + 4*3 + 5*2 + 7*1 = 57, 57 % 11 = 2
        assert!(!is_valid_modulo11("123457"));
    }

    #[test]
    fn test_longer_numbers_accept_remainder_ten() {
        // 1*7 + 2*6 + 3*5 + 4*4 + 5*3 + 6*2 + 1*1 = 78, 78 % 11 = 1
        assert!(is_valid_modulo11("1234561"));
        // 77 % 11 = 0
        assert!(is_valid_modulo11("1234560"));
        // 5*3 + 0*2 + 6*1 = 21, 21 % 11 = 10
        assert!(is_valid_modulo11("0000506"));
        // 219 % 11 = 10
        assert!(is_valid_modulo11("1234567899"));
        // 84 % 11 = 7
        assert!(!is_valid_modulo11("1234567"));
        // 292 % 11 = 6
        assert!(!is_valid_modulo11("2896194253"));
    }

    #[test]
    fn test_six_digits_reject_remainder_ten() {
        // 1*6 + 0*5 + 0*4 + 0*3 + 0*2 + 4*1 = 10
        assert!(!is_valid_modulo11("100004"));
    }

    #[test]
    fn test_eight_digits_with_remainder_five_is_invalid() {
        // 5*1 = 5, 5 % 11 = 5
        assert!(!is_valid_modulo11("00000005"));
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(!is_valid_modulo11(""));
        assert!(!is_valid_modulo11("1"));
        assert!(!is_valid_modulo11("12345678901"));
        assert!(!is_valid_modulo11("12345a"));
        assert!(!is_valid_modulo11("123 456"));
    }

    #[test]
    fn test_short_lengths_fail_closed() {
        // "00" has a zero sum and would pass any accept set
        assert!(!is_valid_modulo11("00"));
        assert!(!is_valid_modulo11("11"));
        assert!(!is_valid_modulo11("12345"));
    }

    #[tokio::test]
    async fn test_rule_waits_for_blur() {
        let blur = Arc::new(BlurTracker::new());
        let rule = Modulo11Rule::new("AccountNumber", resolver(), blur.clone());

        assert!(rule.validate(&Value::from("123457")).await.unwrap().is_valid());

        blur.mark_blurred("AccountNumber");
        let errors = rule.validate(&Value::from("123457")).await.unwrap();
        assert_eq!(errors.first(), Some("Account number fails the checksum."));

        assert!(rule.validate(&Value::from("123456")).await.unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_rule_generic_fallback_and_absent_value() {
        let blur = Arc::new(BlurTracker::new());
        let rule = Modulo11Rule::new("PrefixNumber", resolver(), blur.clone());
        blur.mark_blurred("PrefixNumber");

        assert!(rule.validate(&Value::Null).await.unwrap().is_valid());
        let errors = rule.validate(&Value::from("99")).await.unwrap();
        assert_eq!(errors.first(), Some("Invalid account number."));
    }
}
