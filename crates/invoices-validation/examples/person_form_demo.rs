//! Walk through a person form: typing, blur, submit and a language switch

use invoices_validation::forms::person::{ACCOUNT_NUMBER, TELEPHONE, ZIP};
use invoices_validation::{
    BlurTracker, FormValidator, MessageCatalog, PersonDraft, PersonForm, TextLookup,
    ValidatorConfig,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("invoices-validation demo");
    println!("========================\n");

    let config = ValidatorConfig::new().with_form_scope("PersonForm").with_culture("en");
    let catalog = MessageCatalog::with_default_messages().with_message(
        "PersonForm",
        "",
        "TelephoneFormat",
        "Use the format 123 456 789.",
    );
    let lookup: Arc<dyn TextLookup> = Arc::new(catalog);
    let validator = FormValidator::from_config(&config, lookup, Arc::new(BlurTracker::new()));
    let form = PersonForm::new(Arc::new(validator))?;
    let validator = form.validator();

    println!("1. Typing a telephone number");
    for typed in ["7", "777 1", "777123456"] {
        let value = PersonForm::normalize(TELEPHONE, typed);
        let errors = validator.validate_field(TELEPHONE, value.as_str()).await?;
        println!("   {:<12} -> {:<14} {}", typed, value, describe(&errors.to_string()));
    }

    println!("\n2. Account number checksum waits for blur");
    let errors = validator.validate_field(ACCOUNT_NUMBER, "123457").await?;
    println!("   typing  123457 -> {}", describe(&errors.to_string()));
    form.blur(ACCOUNT_NUMBER);
    let errors = validator.validate_field(ACCOUNT_NUMBER, "123457").await?;
    println!("   blurred 123457 -> {}", describe(&errors.to_string()));

    println!("\n3. Submitting an incomplete person");
    let draft = PersonDraft {
        name: "Jan Novák".to_string(),
        zip: "11000".to_string(),
        ..Default::default()
    };
    let errors = form.validate(&draft).await?;
    println!("{}", errors);
    println!("   zip: {}", describe(&validator.get_errors(ZIP).to_string()));

    println!("\n4. Same submit in Czech");
    validator.set_culture("cs-CZ");
    let errors = form.validate(&draft.normalized()).await?;
    println!("{}", serde_json::to_string_pretty(&errors.to_json())?);

    Ok(())
}

fn describe(errors: &str) -> String {
    if errors.is_empty() {
        "ok".to_string()
    } else {
        errors.to_string()
    }
}
