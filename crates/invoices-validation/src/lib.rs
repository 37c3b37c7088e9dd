//! # invoices-validation
//!
//! Form validation engine for the invoices application. Asynchronous rules are
//! attached to named fields and run as short-circuiting chains; some rules wait
//! until the user has left the field (blur). Failure texts are resolved through
//! a two-tier localized lookup, and input normalizers clean up typed values.
//!
//! ## Quick start
//!
//! ```rust
//! use invoices_validation::{
//!     BlurTracker, FormValidator, MessageCatalog, TextLookup, ValidatorConfig,
//! };
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let config = ValidatorConfig::new().with_form_scope("PersonForm").with_culture("en");
//! let lookup: Arc<dyn TextLookup> = Arc::new(MessageCatalog::with_default_messages());
//! let validator = FormValidator::from_config(&config, lookup, Arc::new(BlurTracker::new()));
//!
//! validator.required("Telephone");
//! validator.format("Telephone", r"^\d{3} \d{3} \d{3}$", 9)?;
//!
//! // still typing: the format is not checked yet
//! assert!(validator.validate_field("Telephone", "777 1").await?.is_valid());
//!
//! let errors = validator.validate_field("Telephone", "777123456").await?;
//! assert_eq!(errors.first(), Some("Invalid format."));
//! # Ok::<(), invoices_validation::ValidationFault>(())
//! # }).unwrap();
//! ```

pub mod blur;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod messages;
pub mod normalize;
pub mod rules;
pub mod traits;
pub mod validator;
pub mod validators;

// Re-exports for easy access
pub use blur::BlurTracker;
pub use catalog::MessageCatalog;
pub use config::{ConfigError, MissingMessagePolicy, ValidatorConfig};
pub use error::{ErrorList, FormErrors, ValidationFault, ValidationResult};
pub use forms::{PersonDraft, PersonForm};
pub use messages::{MessageResolver, TextSource};
pub use normalize::{group_digits, normalize_text, TextCasing, TextOptions};
pub use rules::{run_chain, validate_all, RuleChain, Rules};
pub use traits::{LocalizedText, SharedRule, TextLookup, ToFieldValue, ValidationRule};
pub use validator::FormValidator;

// Built-in validators
pub use validators::{
    is_valid_modulo11, AfterBlur, CustomRule, DigitsRule, LengthRule, Modulo11Rule, PatternRule,
    RequiredRule,
};
