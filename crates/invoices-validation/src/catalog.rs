//! In-memory message catalog implementing [`TextLookup`]
//!
//! Texts are organised as `scope -> culture -> key -> template`. Lookups fall
//! back from a specific culture (`cs-CZ`) to its language (`cs`) and finally
//! to the invariant culture (`""`). Templates use positional placeholders
//! (`{0}`, `{1}`, ...).

use crate::config::DEFAULT_SHARED_SCOPE;
use crate::error::{ValidationFault, ValidationResult};
use crate::traits::{LocalizedText, TextLookup};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder pattern"));

type CultureTable = HashMap<String, HashMap<String, String>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    scopes: HashMap<String, CultureTable>,
}

impl MessageCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the generic text of every built-in rule
    pub fn with_default_messages() -> Self {
        let mut catalog = Self::new();
        let scope = DEFAULT_SHARED_SCOPE;

        for (key, text) in [
            ("Required", "This field is required."),
            ("Length", "Must be exactly {0} characters long."),
            ("MinLength", "Must be at least {0} characters long."),
            ("MaxLength", "Must be at most {0} characters long."),
            ("Format", "Invalid format."),
            ("DigitsExactLength", "Must contain exactly {0} digits."),
            ("InvalidModulo11", "Invalid account number."),
        ] {
            catalog.insert(scope, "", key, text);
        }

        for (key, text) in [
            ("Required", "Toto pole je povinné."),
            ("Length", "Musí mít přesně {0} znaků."),
            ("MinLength", "Musí mít alespoň {0} znaků."),
            ("MaxLength", "Může mít nejvýše {0} znaků."),
            ("Format", "Neplatný formát."),
            ("DigitsExactLength", "Musí obsahovat přesně {0} číslic."),
            ("InvalidModulo11", "Neplatné číslo účtu."),
        ] {
            catalog.insert(scope, "cs", key, text);
        }

        catalog
    }

    /// Parse a catalog from YAML (`scope: { culture: { key: text } }`)
    pub fn from_yaml_str(source: &str) -> ValidationResult<Self> {
        let parsed: Self = serde_yaml::from_str(source)?;
        Ok(Self::new().merged(parsed))
    }

    /// Parse a catalog from JSON, same layout as [`MessageCatalog::from_yaml_str`]
    pub fn from_json_str(source: &str) -> ValidationResult<Self> {
        let parsed: Self = serde_json::from_str(source)?;
        Ok(Self::new().merged(parsed))
    }

    /// Read a catalog file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ValidationResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ValidationFault::Catalog(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    /// Add or replace one template. Culture keys are stored lowercase.
    pub fn insert(&mut self, scope: &str, culture: &str, key: &str, template: &str) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .entry(culture.to_lowercase())
            .or_default()
            .insert(key.to_string(), template.to_string());
    }

    /// Builder form of [`MessageCatalog::insert`]
    pub fn with_message(mut self, scope: &str, culture: &str, key: &str, template: &str) -> Self {
        self.insert(scope, culture, key, template);
        self
    }

    /// Merge `other` into this catalog; entries of `other` win
    pub fn merge(&mut self, other: MessageCatalog) {
        for (scope, cultures) in other.scopes {
            let target = self.scopes.entry(scope).or_default();
            for (culture, texts) in cultures {
                target.entry(culture.to_lowercase()).or_default().extend(texts);
            }
        }
    }

    /// Builder form of [`MessageCatalog::merge`]
    pub fn merged(mut self, other: MessageCatalog) -> Self {
        self.merge(other);
        self
    }

    /// Number of scopes with at least one entry
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Find the raw template, walking the culture fallback chain
    pub fn template(&self, scope: &str, culture: &str, key: &str) -> Option<&str> {
        let cultures = self.scopes.get(scope)?;
        culture_chain(culture)
            .iter()
            .filter_map(|c| cultures.get(c.as_str()))
            .filter_map(|texts| texts.get(key))
            .map(String::as_str)
            .find(|text| !text.is_empty())
    }
}

fn culture_chain(culture: &str) -> Vec<String> {
    let culture = culture.to_lowercase();
    let mut chain = Vec::with_capacity(3);
    if !culture.is_empty() {
        chain.push(culture.clone());
        if let Some((language, _)) = culture.split_once('-') {
            chain.push(language.to_string());
        }
    }
    chain.push(String::new());
    chain
}

/// Replace `{n}` placeholders with the n-th argument
pub fn interpolate(template: &str, args: &[Value]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| {
            let index: usize = caps[1].parse().unwrap_or(usize::MAX);
            match args.get(index) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[async_trait]
impl TextLookup for MessageCatalog {
    async fn lookup(
        &self,
        key: &str,
        scope: &str,
        culture: &str,
        args: &[Value],
    ) -> ValidationResult<LocalizedText> {
        Ok(match self.template(scope, culture, key) {
            Some(template) => LocalizedText::found(interpolate(template, args)),
            None => LocalizedText::missing(key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_fallback_chain() {
        let catalog = MessageCatalog::new()
            .with_message("Validation", "", "Required", "Required")
            .with_message("Validation", "cs", "Required", "Povinné");

        assert_eq!(catalog.template("Validation", "cs-CZ", "Required"), Some("Povinné"));
        assert_eq!(catalog.template("Validation", "CS", "Required"), Some("Povinné"));
        assert_eq!(catalog.template("Validation", "en-US", "Required"), Some("Required"));
        assert_eq!(catalog.template("Other", "en-US", "Required"), None);
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(
            interpolate("Must have {0} of {1}", &[Value::from(4), Value::from("digits")]),
            "Must have 4 of digits"
        );
        // unknown placeholders are left untouched
        assert_eq!(interpolate("Value {2}", &[Value::from(1)]), "Value {2}");
    }

    #[tokio::test]
    async fn test_lookup_found_and_missing() {
        let catalog = MessageCatalog::with_default_messages();

        let found = catalog
            .lookup("Length", DEFAULT_SHARED_SCOPE, "en", &[Value::from(4)])
            .await
            .unwrap();
        assert!(found.found);
        assert_eq!(found.text, "Must be exactly 4 characters long.");

        let missing = catalog
            .lookup("TelephoneFormat", "PersonForm", "en", &[])
            .await
            .unwrap();
        assert!(!missing.found);
        assert_eq!(missing.text, "TelephoneFormat");
    }

    #[test]
    fn test_empty_text_counts_as_missing() {
        let catalog = MessageCatalog::new().with_message("PersonForm", "", "NameRequired", "");
        assert_eq!(catalog.template("PersonForm", "en", "NameRequired"), None);
    }

    #[test]
    fn test_yaml_loading_and_merge() {
        let yaml = r#"
PersonForm:
  cs:
    TelephoneFormat: "Telefon musí být ve tvaru 123 456 789."
  "":
    TelephoneFormat: "Telephone must look like 123 456 789."
"#;
        let mut catalog = MessageCatalog::with_default_messages();
        catalog.merge(MessageCatalog::from_yaml_str(yaml).unwrap());

        assert_eq!(catalog.scope_count(), 2);
        assert_eq!(
            catalog.template("PersonForm", "cs-CZ", "TelephoneFormat"),
            Some("Telefon musí být ve tvaru 123 456 789.")
        );
        assert_eq!(catalog.template("Validation", "cs-CZ", "Format"), Some("Neplatný formát."));
    }

    #[test]
    fn test_loaded_culture_keys_are_case_insensitive() {
        let catalog = MessageCatalog::from_json_str(
            r#"{"PersonForm": {"cs-CZ": {"ZipFormat": "PSČ ve tvaru 123 45."}}}"#,
        )
        .unwrap();

        assert_eq!(
            catalog.template("PersonForm", "CS-cz", "ZipFormat"),
            Some("PSČ ve tvaru 123 45.")
        );
    }
}
