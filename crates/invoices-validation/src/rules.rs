//! Rule composition: ordered chains with short-circuit and per-field rule sets

use crate::error::{ErrorList, ValidationResult};
use crate::traits::{SharedRule, ValidationRule};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Run `rules` in order, awaiting each one, and stop at the first rule that
/// reports errors. Returns an empty list when every rule passes.
pub async fn run_chain(rules: &[SharedRule], value: &Value) -> ValidationResult<ErrorList> {
    for rule in rules {
        let errors = rule.validate(value).await?;
        if !errors.is_empty() {
            return Ok(errors);
        }
    }
    Ok(ErrorList::new())
}

/// Ad hoc composite of rules that are not registered on any field
#[derive(Clone, Default)]
pub struct RuleChain {
    rules: Vec<SharedRule>,
}

impl RuleChain {
    /// Chain the given rules in order
    pub fn new(rules: Vec<SharedRule>) -> Self {
        Self { rules }
    }

    /// Append a rule that runs only if every earlier rule passed
    pub fn then<R>(mut self, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Number of rules in the chain
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// An empty chain always passes
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.rules.iter().map(|r| r.rule_name()).collect();
        f.debug_struct("RuleChain").field("rules", &names).finish()
    }
}

#[async_trait]
impl ValidationRule for RuleChain {
    async fn validate(&self, value: &Value) -> ValidationResult<ErrorList> {
        run_chain(&self.rules, value).await
    }

    fn rule_name(&self) -> &'static str {
        "ValidateAll"
    }

    fn parameters(&self) -> Option<Value> {
        let rules: Vec<Value> = self
            .rules
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "rule": rule.rule_name(),
                    "parameters": rule.parameters(),
                })
            })
            .collect();
        Some(Value::Array(rules))
    }
}

/// Compose already-built rules into one rule with short-circuit semantics
pub fn validate_all(rules: impl IntoIterator<Item = SharedRule>) -> SharedRule {
    Arc::new(RuleChain::new(rules.into_iter().collect()))
}

/// Append-only map of fields to their ordered rules.
///
/// Field keys are case-insensitive; the first spelling registered is kept for
/// reporting.
#[derive(Clone, Default)]
pub struct Rules {
    field_rules: HashMap<String, FieldRules>,
}

#[derive(Clone)]
struct FieldRules {
    display_name: String,
    rules: Vec<SharedRule>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("field_rules_count", &self.field_rules.len())
            .field("validated_fields", &self.validated_fields())
            .finish()
    }
}

impl Rules {
    /// Empty rule set with no fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation rule for a specific field (builder style)
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.add(field, Arc::new(rule));
        self
    }

    /// Append a rule to the field's list, creating the list if needed
    pub fn add(&mut self, field: impl Into<String>, rule: SharedRule) {
        let field = field.into();
        self.field_rules
            .entry(field.to_lowercase())
            .or_insert_with(|| FieldRules {
                display_name: field,
                rules: Vec::new(),
            })
            .rules
            .push(rule);
    }

    /// Rules registered for a field, in registration order
    pub fn get_field_rules(&self, field: &str) -> Option<&[SharedRule]> {
        self.field_rules
            .get(&field.to_lowercase())
            .map(|entry| entry.rules.as_slice())
    }

    /// Number of rules for a field, 0 if the field is unknown
    pub fn rule_count(&self, field: &str) -> usize {
        self.get_field_rules(field).map_or(0, <[SharedRule]>::len)
    }

    /// True when no field has rules
    pub fn is_empty(&self) -> bool {
        self.field_rules.is_empty()
    }

    /// Field names as first registered
    pub fn validated_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self
            .field_rules
            .values()
            .map(|entry| entry.display_name.as_str())
            .collect();
        fields.sort_unstable();
        fields
    }

    /// Validate a value against the field's chain. Fields without rules are valid.
    pub async fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<ErrorList> {
        match self.get_field_rules(field) {
            Some(rules) => run_chain(rules, value).await,
            None => Ok(ErrorList::new()),
        }
    }
}
