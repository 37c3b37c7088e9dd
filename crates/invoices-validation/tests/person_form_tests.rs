use invoices_validation::forms::person::{ACCOUNT_NUMBER, CITY, COUNTRY, TELEPHONE, ZIP};
use invoices_validation::{
    BlurTracker, FormValidator, MessageCatalog, MissingMessagePolicy, PersonDraft, PersonForm,
    TextLookup, ValidationFault, ValidatorConfig,
};
use std::sync::Arc;

fn catalog() -> MessageCatalog {
    MessageCatalog::from_yaml_str(
        r#"
PersonForm:
  "":
    TelephoneFormat: "Use the format 123 456 789."
    AccountNumberInvalidModulo11: "The account number checksum does not match."
  cs:
    TelephoneFormat: "Zadejte telefon ve tvaru 123 456 789."
"#,
    )
    .unwrap()
}

fn person_form(config: &ValidatorConfig) -> PersonForm {
    let mut messages = MessageCatalog::with_default_messages();
    messages.merge(catalog());
    let lookup: Arc<dyn TextLookup> = Arc::new(messages);

    let validator = FormValidator::from_config(config, lookup, Arc::new(BlurTracker::new()));
    PersonForm::new(Arc::new(validator)).unwrap()
}

fn config(culture: &str) -> ValidatorConfig {
    ValidatorConfig::new()
        .with_form_scope("PersonForm")
        .with_culture(culture)
}

fn valid_draft() -> PersonDraft {
    PersonDraft {
        person_id: 1,
        name: "Jan Novák".to_string(),
        identification_number: "27074358".to_string(),
        tax_number: "CZ27074358".to_string(),
        account_number: "123456".to_string(),
        bank_code: "0800".to_string(),
        iban: "CZ6508000000192000145399".to_string(),
        telephone: "777 123 456".to_string(),
        mail: "jan.novak@example.cz".to_string(),
        street: "Dlouhá 12".to_string(),
        zip: "110 00".to_string(),
        city: "Praha".to_string(),
        country: Some("CzechRepublic".to_string()),
        note: String::new(),
    }
}

#[tokio::test]
async fn valid_person_passes_submit_validation() {
    let form = person_form(&config("en"));

    let errors = form.validate(&valid_draft()).await.unwrap();
    assert!(errors.is_empty(), "unexpected errors: {}", errors);
    assert!(form.validator().is_valid());
}

#[tokio::test]
async fn empty_person_reports_every_required_field() {
    let form = person_form(&config("en"));

    let errors = form.validate(&PersonDraft::default()).await.unwrap();

    for field in [
        "Name",
        "IdentificationNumber",
        "AccountNumber",
        "BankCode",
        "Telephone",
        "Mail",
        "Street",
        "Zip",
        "City",
        "Country",
    ] {
        assert_eq!(
            errors.get_field_errors(field).and_then(|e| e.first()),
            Some("This field is required."),
            "{}",
            field
        );
    }
    assert_eq!(errors.len(), 10);
    assert_eq!(errors.total_errors(), 10);
}

#[tokio::test]
async fn field_specific_messages_win_over_generic_ones() {
    let form = person_form(&config("en"));
    let draft = PersonDraft {
        telephone: "777123456".to_string(),
        account_number: "123457".to_string(),
        zip: "11000".to_string(),
        ..valid_draft()
    };

    let errors = form.validate(&draft).await.unwrap();

    assert_eq!(
        errors.get_field_errors(TELEPHONE).and_then(|e| e.first()),
        Some("Use the format 123 456 789.")
    );
    assert_eq!(
        errors.get_field_errors(ACCOUNT_NUMBER).and_then(|e| e.first()),
        Some("The account number checksum does not match.")
    );
    assert_eq!(
        errors.get_field_errors(ZIP).and_then(|e| e.first()),
        Some("Invalid format.")
    );
}

#[tokio::test]
async fn normalized_draft_is_valid() {
    let form = person_form(&config("en"));
    let typed = PersonDraft {
        telephone: "+777123456".to_string(),
        zip: "11000".to_string(),
        city: "  praha ".to_string(),
        iban: "cz65 0800 0000 1920 0014 5399".to_string(),
        ..valid_draft()
    };

    let normalized = typed.normalized();
    assert_eq!(normalized.telephone, "777 123 456");
    assert_eq!(normalized.zip, "110 00");
    assert_eq!(normalized.city, "Praha");

    let errors = form.validate(&normalized).await.unwrap();
    assert!(errors.is_empty(), "unexpected errors: {}", errors);
}

#[tokio::test]
async fn czech_culture_uses_czech_texts() {
    let form = person_form(&config("cs-CZ"));
    let draft = PersonDraft {
        telephone: "777".to_string(),
        city: String::new(),
        ..valid_draft()
    };

    let errors = form.validate(&draft).await.unwrap();
    assert_eq!(
        errors.get_field_errors(TELEPHONE).and_then(|e| e.first()),
        Some("Zadejte telefon ve tvaru 123 456 789.")
    );
    assert_eq!(
        errors.get_field_errors(CITY).and_then(|e| e.first()),
        Some("Toto pole je povinné.")
    );
}

#[tokio::test]
async fn language_switch_applies_to_next_validation() {
    let form = person_form(&config("en"));
    let draft = PersonDraft {
        country: None,
        ..valid_draft()
    };

    let errors = form.validate(&draft).await.unwrap();
    assert_eq!(
        errors.get_field_errors(COUNTRY).and_then(|e| e.first()),
        Some("This field is required.")
    );

    form.validator().set_culture("cs");
    let errors = form.validate(&draft).await.unwrap();
    assert_eq!(
        errors.get_field_errors(COUNTRY).and_then(|e| e.first()),
        Some("Toto pole je povinné.")
    );
}

#[tokio::test]
async fn typing_does_not_report_unfinished_input() {
    let form = person_form(&config("en"));
    let validator = form.validator();

    assert!(validator.validate_field(TELEPHONE, "777 12").await.unwrap().is_valid());
    assert!(validator.validate_field(ACCOUNT_NUMBER, "123457").await.unwrap().is_valid());

    form.blur(ACCOUNT_NUMBER);
    assert!(!validator.validate_field(ACCOUNT_NUMBER, "123457").await.unwrap().is_valid());

    form.focus(ACCOUNT_NUMBER);
    assert!(validator.validate_field(ACCOUNT_NUMBER, "123457").await.unwrap().is_valid());
}

#[tokio::test]
async fn reset_forgets_blur_and_results() {
    let form = person_form(&config("en"));
    form.validate(&PersonDraft::default()).await.unwrap();
    assert!(!form.validator().is_valid());

    form.reset();

    assert!(form.validator().is_valid());
    assert!(form.validator().blur_tracker().is_empty());
}

#[tokio::test]
async fn strict_policy_surfaces_missing_texts() {
    let config = config("en").with_form_scope("InvoiceForm");
    let config = ValidatorConfig {
        missing_messages: MissingMessagePolicy::Fail,
        shared_scope: "NoSuchScope".to_string(),
        ..config
    };
    let form = person_form(&config);

    let result = form.validate(&PersonDraft::default()).await;
    assert!(matches!(result, Err(ValidationFault::MissingMessage { .. })));
}

#[test]
fn draft_deserializes_from_api_json() {
    let draft: PersonDraft = serde_json::from_str(
        r#"{"_id": 7, "name": "Jana", "identificationNumber": "12345678", "country": "Slovakia"}"#,
    )
    .unwrap();

    assert_eq!(draft.person_id, 7);
    assert_eq!(draft.identification_number, "12345678");
    assert_eq!(draft.country.as_deref(), Some("Slovakia"));
    assert!(draft.telephone.is_empty());
}
