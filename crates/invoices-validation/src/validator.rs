//! Per-form field validator registry

use crate::blur::BlurTracker;
use crate::config::ValidatorConfig;
use crate::error::{ErrorList, FormErrors, ValidationResult};
use crate::messages::MessageResolver;
use crate::rules::{self, run_chain, Rules};
use crate::traits::{SharedRule, TextLookup, ToFieldValue};
use crate::validators::{DigitsRule, LengthRule, Modulo11Rule, PatternRule, RequiredRule};
use futures::future::join_all;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct FieldState {
    /// Ticket of the most recent validation started for the field
    ticket: u64,
    errors: ErrorList,
}

/// Field validator registry for one form session.
///
/// Owns the field → rule chains, the last result per field and the handles
/// (message resolver, blur tracker) the built-in rule factories need.
pub struct FormValidator {
    messages: Arc<MessageResolver>,
    blur: Arc<BlurTracker>,
    rules: RwLock<Rules>,
    state: RwLock<HashMap<String, FieldState>>,
    tickets: AtomicU64,
}

impl std::fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValidator")
            .field("rules", &*self.rules.read())
            .field("cached_fields", &self.state.read().len())
            .field("blurred_fields", &self.blur.blurred_count())
            .finish()
    }
}

impl FormValidator {
    /// Empty registry sharing the given resolver and blur tracker
    pub fn new(messages: Arc<MessageResolver>, blur: Arc<BlurTracker>) -> Self {
        Self {
            messages,
            blur,
            rules: RwLock::new(Rules::new()),
            state: RwLock::new(HashMap::new()),
            tickets: AtomicU64::new(0),
        }
    }

    /// Build the resolver from `config` and wrap it in an empty registry
    pub fn from_config(
        config: &ValidatorConfig,
        lookup: Arc<dyn TextLookup>,
        blur: Arc<BlurTracker>,
    ) -> Self {
        Self::new(Arc::new(MessageResolver::from_config(config, lookup)), blur)
    }

    /// Resolver shared by the built-in rules
    pub fn messages(&self) -> &Arc<MessageResolver> {
        &self.messages
    }

    /// Blur state consulted by the gated rules
    pub fn blur_tracker(&self) -> &Arc<BlurTracker> {
        &self.blur
    }

    /// Append `rule` to the field's chain
    pub fn register_validator(&self, field: &str, rule: SharedRule) {
        debug!(field, rule = rule.rule_name(), "validator registered");
        self.rules.write().add(field, rule);
    }

    /// Number of rules registered for `field`
    pub fn rule_count(&self, field: &str) -> usize {
        self.rules.read().rule_count(field)
    }

    /// Registered fields, as first spelled
    pub fn fields(&self) -> Vec<String> {
        self.rules
            .read()
            .validated_fields()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn register(&self, field: &str, rule: SharedRule) -> SharedRule {
        self.register_validator(field, rule.clone());
        rule
    }

    /// Register a rule failing on empty values
    pub fn required(&self, field: &str) -> SharedRule {
        self.register(field, Arc::new(RequiredRule::new(field, self.messages.clone())))
    }

    /// Register an exact length rule
    pub fn length(&self, field: &str, length: usize) -> SharedRule {
        self.register(field, Arc::new(LengthRule::exact(field, length, self.messages.clone())))
    }

    /// Register a minimum length rule
    pub fn min_length(&self, field: &str, length: usize) -> SharedRule {
        self.register(field, Arc::new(LengthRule::min(field, length, self.messages.clone())))
    }

    /// Register a maximum length rule
    pub fn max_length(&self, field: &str, length: usize) -> SharedRule {
        self.register(field, Arc::new(LengthRule::max(field, length, self.messages.clone())))
    }

    /// Register a blur-gated format rule. Fails if `pattern` does not compile.
    pub fn format(
        &self,
        field: &str,
        pattern: &str,
        required_digits: usize,
    ) -> ValidationResult<SharedRule> {
        let rule = PatternRule::new(
            field,
            pattern,
            required_digits,
            self.messages.clone(),
            self.blur.clone(),
        )?;
        Ok(self.register(field, Arc::new(rule)))
    }

    /// Register a blur-gated rule requiring exactly `digits` digits
    pub fn digits_exact_length(&self, field: &str, digits: usize) -> SharedRule {
        let rule = DigitsRule::new(field, digits, self.messages.clone(), self.blur.clone());
        self.register(field, Arc::new(rule))
    }

    /// Register a blur-gated bank account checksum rule
    pub fn account_number_modulo11(&self, field: &str) -> SharedRule {
        let rule = Modulo11Rule::new(field, self.messages.clone(), self.blur.clone());
        self.register(field, Arc::new(rule))
    }

    /// Compose rules into one short-circuiting rule without registering it
    pub fn validate_all(rules: impl IntoIterator<Item = SharedRule>) -> SharedRule {
        rules::validate_all(rules)
    }

    /// Run the field's chain and cache the result.
    ///
    /// A run overtaken by a newer run for the same field still returns its
    /// errors, but only the newest run updates the cache.
    pub async fn validate_field<V: ToFieldValue>(
        &self,
        field: &str,
        value: V,
    ) -> ValidationResult<ErrorList> {
        let value = value.to_field_value();
        let chain: Vec<SharedRule> = match self.rules.read().get_field_rules(field) {
            Some(chain) => chain.to_vec(),
            None => Vec::new(),
        };

        let key = field.to_lowercase();
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().entry(key.clone()).or_default().ticket = ticket;

        let errors = run_chain(&chain, &value).await?;

        let mut state = self.state.write();
        match state.get_mut(&key) {
            Some(entry) if entry.ticket == ticket => {
                entry.errors = errors.clone();
                debug!(field, valid = errors.is_empty(), errors = errors.len(), "field validated");
            }
            _ => {
                debug!(field, ticket, "stale validation result discarded");
            }
        }

        Ok(errors)
    }

    /// Last stored result for the field, empty if never validated
    pub fn get_errors(&self, field: &str) -> ErrorList {
        self.state
            .read()
            .get(&field.to_lowercase())
            .map(|entry| entry.errors.clone())
            .unwrap_or_default()
    }

    /// Validate every registered field concurrently.
    ///
    /// Values are matched to fields case-insensitively; a field with no value
    /// is validated as `null`.
    pub async fn validate_form(
        &self,
        values: &HashMap<String, Value>,
    ) -> ValidationResult<FormErrors> {
        let by_key: HashMap<String, &Value> = values
            .iter()
            .map(|(field, value)| (field.to_lowercase(), value))
            .collect();

        let fields = self.fields();
        let runs = fields.iter().map(|field| {
            let value = by_key
                .get(&field.to_lowercase())
                .map(|value| (*value).clone())
                .unwrap_or(Value::Null);
            async move { (field.as_str(), self.validate_field(field, value).await) }
        });

        let mut form_errors = FormErrors::new();
        for (field, result) in join_all(runs).await {
            form_errors.add(field, result?);
        }

        debug!(
            fields = fields.len(),
            invalid = form_errors.len(),
            "form validated"
        );
        Ok(form_errors)
    }

    /// Whether every cached result is empty
    pub fn is_valid(&self) -> bool {
        self.state.read().values().all(|entry| entry.errors.is_empty())
    }

    /// Cached results of fields that currently have errors
    pub fn errors(&self) -> FormErrors {
        let rules = self.rules.read();
        let mut form_errors = FormErrors::new();
        for field in rules.validated_fields() {
            form_errors.add(field, self.get_errors(field));
        }
        form_errors
    }

    /// Forget blur state and cached results for fields starting with `prefix`
    /// (all fields when empty). Registered rules are kept.
    pub fn reset(&self, prefix: &str) {
        self.blur.reset_form(prefix);
        let prefix = prefix.to_lowercase();
        self.state.write().retain(|key, _| !key.starts_with(&prefix));
        debug!(prefix = %prefix, "form state reset");
    }

    /// Switch the language of subsequently resolved messages
    pub fn set_culture(&self, culture: &str) {
        self.messages.set_culture(culture);
    }
}
