use async_trait::async_trait;
use invoices_validation::normalize::{group_digits, normalize_text, TextOptions};
use invoices_validation::{
    is_valid_modulo11, validate_all, BlurTracker, ErrorList, FormValidator, MessageCatalog,
    MessageResolver, SharedRule, TextLookup, TextSource, ValidationResult, ValidationRule,
};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct StubRule {
    outcome: Option<&'static str>,
    calls: AtomicUsize,
}

impl StubRule {
    fn new(outcome: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ValidationRule for StubRule {
    async fn validate(&self, _value: &Value) -> ValidationResult<ErrorList> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.map(ErrorList::single).unwrap_or_default())
    }

    fn rule_name(&self) -> &'static str {
        "StubRule"
    }
}

fn validator() -> FormValidator {
    let lookup: Arc<dyn TextLookup> = Arc::new(MessageCatalog::with_default_messages());
    let resolver = MessageResolver::new(
        TextSource::new(lookup.clone(), "InvoiceForm"),
        TextSource::new(lookup, "Validation"),
        "",
    );
    FormValidator::new(Arc::new(resolver), Arc::new(BlurTracker::new()))
}

#[tokio::test]
async fn later_rules_never_run_after_a_failure() {
    let rules = [
        StubRule::new(None),
        StubRule::new(Some("second")),
        StubRule::new(Some("third")),
    ];
    let chain = validate_all(rules.iter().map(|r| r.clone() as SharedRule));

    let errors = chain.validate(&Value::from("x")).await.unwrap();

    assert_eq!(errors.first(), Some("second"));
    let calls: Vec<usize> = rules.iter().map(|r| r.calls.load(Ordering::SeqCst)).collect();
    assert_eq!(calls, vec![1, 1, 0]);
}

#[tokio::test]
async fn registered_chain_short_circuits_too() {
    let validator = validator();
    let tail = StubRule::new(None);
    validator.required("Buyer");
    validator.register_validator("buyer", tail.clone());

    let errors = validator.validate_field("BUYER", "").await.unwrap();
    assert_eq!(errors.first(), Some("This field is required."));
    assert_eq!(tail.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn digit_grouping() {
    assert_eq!(group_digits("1234567890", &[3, 3, 4]), "123 456 7890");
    assert_eq!(group_digits("123", &[3, 3, 4]), "123");
    assert_eq!(group_digits("", &[3]), "");
    assert_eq!(group_digits("12345678901", &[3, 3, 4]), "123 456 7890 1");
}

#[test]
fn text_trim_and_collapse() {
    assert_eq!(normalize_text(Some("  Hello   World  "), &TextOptions::default()), "Hello World");
    assert_eq!(normalize_text(None, &TextOptions::default()), "");
}

#[test]
fn modulo11_reference_values() {
    assert!(is_valid_modulo11("123456"));
    assert!(!is_valid_modulo11("00000005"));
}

#[tokio::test]
async fn format_and_digit_gating_with_nine_required_digits() {
    let validator = validator();
    let format = validator.format("Telephone", r"^\d{3} \d{3} \d{3}$", 9).unwrap();
    let digits = validator.digits_exact_length("Phone", 9);

    assert!(format.validate(&Value::from("12345")).await.unwrap().is_valid());
    assert!(digits.validate(&Value::from("12345")).await.unwrap().is_valid());

    assert!(!format.validate(&Value::from("123456789")).await.unwrap().is_valid());
    assert!(digits.validate(&Value::from("123456789")).await.unwrap().is_valid());

    assert!(!digits.validate(&Value::from("1234567890")).await.unwrap().is_valid());

    validator.blur_tracker().mark_blurred("Telephone");
    validator.blur_tracker().mark_blurred("Phone");
    assert!(!format.validate(&Value::from("12345")).await.unwrap().is_valid());
    let errors = digits.validate(&Value::from("12345")).await.unwrap();
    assert_eq!(errors.first(), Some("Must contain exactly 9 digits."));
}

#[test]
fn blur_tracking_lifecycle() {
    let blur = BlurTracker::new();
    blur.mark_blurred("SellerName");
    blur.mark_blurred("SellerName");
    blur.mark_blurred("BuyerName");
    assert_eq!(blur.blurred_count(), 2);

    blur.mark_focused("SellerName");
    blur.mark_focused("NeverSeen");
    assert!(!blur.is_blurred("SellerName"));

    blur.mark_blurred("SellerCity");
    blur.reset_form("Seller");
    assert!(!blur.is_blurred("SellerCity"));
    assert!(blur.is_blurred("buyername"));

    blur.reset_form("");
    assert!(blur.is_empty());
}

#[tokio::test]
async fn resolver_falls_back_to_generic_text() {
    let catalog = MessageCatalog::with_default_messages().with_message(
        "InvoiceForm",
        "",
        "TelephoneFormat",
        "Bad phone.",
    );
    let lookup: Arc<dyn TextLookup> = Arc::new(catalog);
    let resolver = MessageResolver::new(
        TextSource::new(lookup.clone(), "InvoiceForm"),
        TextSource::new(lookup, "Validation"),
        "",
    );

    assert_eq!(resolver.resolve("Telephone", "Format", &[]).await.unwrap(), "Bad phone.");
    assert_eq!(resolver.resolve("Zip", "Format", &[]).await.unwrap(), "Invalid format.");
    assert_eq!(resolver.resolve("Zip", "Unknown", &[]).await.unwrap(), "Unknown");
}
