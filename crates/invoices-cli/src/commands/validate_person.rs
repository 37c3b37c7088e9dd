use anyhow::Context;
use invoices_validation::{
    BlurTracker, FormErrors, FormValidator, MessageCatalog, PersonDraft, PersonForm, TextLookup,
    ValidatorConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const FORM_SCOPE: &str = "PersonForm";

pub struct ValidatePersonArgs {
    pub file: PathBuf,
    pub messages: Option<PathBuf>,
    pub culture: Option<String>,
    pub normalize: bool,
}

/// Validate the person record in `args.file` with submit semantics and print
/// the error envelope. Returns whether the record is valid.
pub async fn run(args: &ValidatePersonArgs) -> anyhow::Result<bool> {
    let mut draft = load_draft(&args.file)?;
    if args.normalize {
        draft = draft.normalized();
    }

    let mut catalog = MessageCatalog::with_default_messages();
    if let Some(path) = &args.messages {
        let extra = MessageCatalog::from_file(path)
            .with_context(|| format!("failed to load messages from {}", path.display()))?;
        catalog.merge(extra);
    }

    let mut config = ValidatorConfig::from_env()?.with_form_scope(FORM_SCOPE);
    if let Some(culture) = &args.culture {
        config = config.with_culture(culture.clone());
    }
    config.validate()?;

    let errors = validate(&draft, catalog, &config).await?;
    info!(
        file = %args.file.display(),
        invalid_fields = errors.len(),
        "person validated"
    );

    if errors.is_empty() {
        println!("{}", serde_json::json!({ "valid": true }));
    } else {
        println!("{}", serde_json::to_string_pretty(&errors.to_json())?);
    }
    Ok(errors.is_empty())
}

pub async fn validate(
    draft: &PersonDraft,
    catalog: MessageCatalog,
    config: &ValidatorConfig,
) -> anyhow::Result<FormErrors> {
    let lookup: Arc<dyn TextLookup> = Arc::new(catalog);
    let validator = FormValidator::from_config(config, lookup, Arc::new(BlurTracker::new()));
    let form = PersonForm::new(Arc::new(validator))?;
    Ok(form.validate(draft).await?)
}

/// Read a person record; `.json` files are parsed as JSON, anything else as YAML
pub fn load_draft(path: &Path) -> anyhow::Result<PersonDraft> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let draft: PersonDraft = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&source)
            .with_context(|| format!("invalid person JSON in {}", path.display()))?,
        _ => serde_yaml::from_str(&source)
            .with_context(|| format!("invalid person YAML in {}", path.display()))?,
    };
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const VALID_PERSON: &str = r#"
name: Jan Novák
identificationNumber: "27074358"
accountNumber: "123456"
bankCode: "0800"
telephone: 777 123 456
mail: jan@example.cz
street: Dlouhá 12
zip: 110 00
city: Praha
country: CzechRepublic
"#;

    #[test]
    fn test_load_yaml_and_json() {
        let yaml = write_file(".yaml", VALID_PERSON);
        let draft = load_draft(yaml.path()).unwrap();
        assert_eq!(draft.bank_code, "0800");

        let json = write_file(".json", r#"{"_id": 3, "name": "Jana"}"#);
        let draft = load_draft(json.path()).unwrap();
        assert_eq!(draft.person_id, 3);
        assert_eq!(draft.name, "Jana");
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let error = load_draft(Path::new("/nonexistent/person.yaml")).unwrap_err();
        assert!(error.to_string().contains("failed to read"));
    }

    #[tokio::test]
    async fn test_valid_record() {
        let yaml = write_file(".yaml", VALID_PERSON);
        let args = ValidatePersonArgs {
            file: yaml.path().to_path_buf(),
            messages: None,
            culture: Some("en".to_string()),
            normalize: false,
        };
        assert!(run(&args).await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_messages_and_normalization() {
        let person = write_file(".yaml", &VALID_PERSON.replace("777 123 456", "777123456"));
        let messages = write_file(
            ".yaml",
            "PersonForm:\n  \"\":\n    TelephoneFormat: \"Phone as 123 456 789\"\n",
        );

        let draft = load_draft(person.path()).unwrap();
        let mut catalog = MessageCatalog::with_default_messages();
        catalog.merge(MessageCatalog::from_file(messages.path()).unwrap());
        let config = ValidatorConfig::new().with_form_scope(FORM_SCOPE).with_culture("en");

        let errors = validate(&draft, catalog.clone(), &config).await.unwrap();
        assert_eq!(
            errors.get_field_errors("Telephone").and_then(|e| e.first()),
            Some("Phone as 123 456 789")
        );

        let errors = validate(&draft.normalized(), catalog, &config).await.unwrap();
        assert!(errors.is_empty());
    }
}
