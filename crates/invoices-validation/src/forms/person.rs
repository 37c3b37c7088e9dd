//! Person (seller/buyer) form: field rules, input normalizers and submit validation

use crate::error::{FormErrors, ValidationResult};
use crate::normalize::{
    digits_only, format_postal_code, format_telephone, normalize_text, TextCasing, TextOptions,
};
use crate::validator::FormValidator;
use crate::validators::{AfterBlur, PatternRule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const NAME: &str = "Name";
pub const IDENTIFICATION_NUMBER: &str = "IdentificationNumber";
pub const TAX_NUMBER: &str = "TaxNumber";
pub const ACCOUNT_NUMBER: &str = "AccountNumber";
pub const BANK_CODE: &str = "BankCode";
pub const IBAN: &str = "Iban";
pub const TELEPHONE: &str = "Telephone";
pub const MAIL: &str = "Mail";
pub const STREET: &str = "Street";
pub const ZIP: &str = "Zip";
pub const CITY: &str = "City";
pub const COUNTRY: &str = "Country";
pub const NOTE: &str = "Note";

/// Every field of the form, in display order
pub const FIELDS: [&str; 13] = [
    NAME,
    IDENTIFICATION_NUMBER,
    TAX_NUMBER,
    ACCOUNT_NUMBER,
    BANK_CODE,
    IBAN,
    TELEPHONE,
    MAIL,
    STREET,
    ZIP,
    CITY,
    COUNTRY,
    NOTE,
];

const TELEPHONE_PATTERN: &str = r"^\d{3} \d{3} \d{3}$";
const ZIP_PATTERN: &str = r"^\d{3} \d{2}$";
const TAX_NUMBER_PATTERN: &str = r"^[A-Z]{2}\d{8,10}$";
const IBAN_PATTERN: &str = r"^[A-Z]{2}\d{2}[A-Z0-9]{10,30}$";
const MAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Person record as edited in the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonDraft {
    #[serde(rename = "_id")]
    pub person_id: i64,
    pub name: String,
    pub identification_number: String,
    pub tax_number: String,
    pub account_number: String,
    pub bank_code: String,
    pub iban: String,
    pub telephone: String,
    pub mail: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    /// Selected country; `None` until the user picks one
    pub country: Option<String>,
    pub note: String,
}

impl PersonDraft {
    /// Field name → value map, keyed like the registered rules
    pub fn to_values(&self) -> HashMap<String, Value> {
        let text_fields = [
            (NAME, &self.name),
            (IDENTIFICATION_NUMBER, &self.identification_number),
            (TAX_NUMBER, &self.tax_number),
            (ACCOUNT_NUMBER, &self.account_number),
            (BANK_CODE, &self.bank_code),
            (IBAN, &self.iban),
            (TELEPHONE, &self.telephone),
            (MAIL, &self.mail),
            (STREET, &self.street),
            (ZIP, &self.zip),
            (CITY, &self.city),
            (NOTE, &self.note),
        ];

        let mut values: HashMap<String, Value> = text_fields
            .into_iter()
            .map(|(field, value)| (field.to_string(), Value::String(value.clone())))
            .collect();
        values.insert(
            COUNTRY.to_string(),
            self.country.clone().map_or(Value::Null, Value::String),
        );
        values
    }

    /// Copy with every text field passed through [`PersonForm::normalize`]
    pub fn normalized(&self) -> Self {
        Self {
            person_id: self.person_id,
            name: PersonForm::normalize(NAME, &self.name),
            identification_number: PersonForm::normalize(
                IDENTIFICATION_NUMBER,
                &self.identification_number,
            ),
            tax_number: PersonForm::normalize(TAX_NUMBER, &self.tax_number),
            account_number: PersonForm::normalize(ACCOUNT_NUMBER, &self.account_number),
            bank_code: PersonForm::normalize(BANK_CODE, &self.bank_code),
            iban: PersonForm::normalize(IBAN, &self.iban),
            telephone: PersonForm::normalize(TELEPHONE, &self.telephone),
            mail: PersonForm::normalize(MAIL, &self.mail),
            street: PersonForm::normalize(STREET, &self.street),
            zip: PersonForm::normalize(ZIP, &self.zip),
            city: PersonForm::normalize(CITY, &self.city),
            country: self
                .country
                .as_deref()
                .map(|country| PersonForm::normalize(COUNTRY, country))
                .filter(|country| !country.is_empty()),
            note: PersonForm::normalize(NOTE, &self.note),
        }
    }
}

/// Person form bound to a [`FormValidator`]
#[derive(Debug, Clone)]
pub struct PersonForm {
    validator: Arc<FormValidator>,
}

impl PersonForm {
    /// Register the person field rules on `validator`
    pub fn new(validator: Arc<FormValidator>) -> ValidationResult<Self> {
        let v = &validator;

        v.required(NAME);
        v.max_length(NAME, 100);

        v.required(IDENTIFICATION_NUMBER);
        v.digits_exact_length(IDENTIFICATION_NUMBER, 8);

        v.max_length(TAX_NUMBER, 12);
        v.format(TAX_NUMBER, TAX_NUMBER_PATTERN, 8)?;

        v.required(ACCOUNT_NUMBER);
        v.max_length(ACCOUNT_NUMBER, 10);
        v.account_number_modulo11(ACCOUNT_NUMBER);

        v.required(BANK_CODE);
        v.digits_exact_length(BANK_CODE, 4);

        v.max_length(IBAN, 34);
        v.format(IBAN, IBAN_PATTERN, 22)?;

        v.required(TELEPHONE);
        v.format(TELEPHONE, TELEPHONE_PATTERN, 9)?;

        v.required(MAIL);
        v.max_length(MAIL, 100);
        let mail_format = PatternRule::new(
            MAIL,
            MAIL_PATTERN,
            0,
            v.messages().clone(),
            v.blur_tracker().clone(),
        )?;
        v.register_validator(
            MAIL,
            Arc::new(AfterBlur::new(MAIL, Arc::new(mail_format), v.blur_tracker().clone())),
        );

        v.required(STREET);
        v.max_length(STREET, 100);

        v.required(ZIP);
        v.format(ZIP, ZIP_PATTERN, 5)?;

        v.required(CITY);
        v.max_length(CITY, 50);

        v.required(COUNTRY);

        v.max_length(NOTE, 500);

        debug!(fields = FIELDS.len(), "person form rules registered");
        Ok(Self { validator })
    }

    pub fn validator(&self) -> &Arc<FormValidator> {
        &self.validator
    }

    /// Apply the input normalizer of `field` to raw user input.
    ///
    /// Field keys are matched case-insensitively. Unknown fields get the
    /// default text normalization.
    pub fn normalize(field: &str, raw: &str) -> String {
        let field = FIELDS
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(field))
            .unwrap_or(field);

        match field {
            NAME | STREET => normalize_text(Some(raw), &TextOptions::default().max_length(100)),
            CITY => normalize_text(
                Some(raw),
                &TextOptions::default().casing(TextCasing::Title).max_length(50),
            ),
            IDENTIFICATION_NUMBER | ACCOUNT_NUMBER | BANK_CODE => digits_only(raw),
            TAX_NUMBER | IBAN => {
                let options = TextOptions::default().casing(TextCasing::Upper);
                normalize_text(Some(raw), &options).split_whitespace().collect()
            }
            TELEPHONE => format_telephone(raw),
            ZIP => format_postal_code(raw),
            MAIL => normalize_text(Some(raw), &TextOptions::default().casing(TextCasing::Lower)),
            NOTE => normalize_text(
                Some(raw),
                &TextOptions {
                    collapse_whitespace: false,
                    ..TextOptions::default()
                }
                .max_length(500),
            ),
            _ => normalize_text(Some(raw), &TextOptions::default()),
        }
    }

    /// The user blurred `field`
    pub fn blur(&self, field: &str) {
        self.validator.blur_tracker().mark_blurred(field);
    }

    /// The user focused `field` again
    pub fn focus(&self, field: &str) {
        self.validator.blur_tracker().mark_focused(field);
    }

    /// Submit validation: every field counts as visited, then the whole form runs
    pub async fn validate(&self, draft: &PersonDraft) -> ValidationResult<FormErrors> {
        for field in FIELDS {
            self.validator.blur_tracker().mark_blurred(field);
        }
        self.validator.validate_form(&draft.to_values()).await
    }

    /// Forget blur state and results, e.g. when the form is reopened
    pub fn reset(&self) {
        self.validator.reset("");
    }
}
