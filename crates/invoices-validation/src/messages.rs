//! Two-tier message resolution: field-specific text first, generic rule text second

use crate::config::{MissingMessagePolicy, ValidatorConfig};
use crate::error::{ValidationFault, ValidationResult};
use crate::traits::{LocalizedText, TextLookup};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A text lookup collaborator bound to one scope
#[derive(Clone)]
pub struct TextSource {
    lookup: Arc<dyn TextLookup>,
    scope: String,
}

impl TextSource {
    pub fn new(lookup: Arc<dyn TextLookup>, scope: impl Into<String>) -> Self {
        Self {
            lookup,
            scope: scope.into(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl std::fmt::Debug for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSource").field("scope", &self.scope).finish()
    }
}

/// Resolves validation messages for `(field, rule)` pairs.
///
/// `{field}{rule}` is looked up in the specific (form) source; when that key
/// is not defined, `{rule}` is looked up in the generic source with the same
/// arguments.
#[derive(Debug)]
pub struct MessageResolver {
    specific: TextSource,
    generic: TextSource,
    culture: RwLock<String>,
    policy: MissingMessagePolicy,
    lookup_timeout: Option<Duration>,
}

impl MessageResolver {
    pub fn new(specific: TextSource, generic: TextSource, culture: impl Into<String>) -> Self {
        Self {
            specific,
            generic,
            culture: RwLock::new(culture.into()),
            policy: MissingMessagePolicy::default(),
            lookup_timeout: None,
        }
    }

    /// Build a resolver whose two tiers are scopes of the same lookup
    pub fn from_config(config: &ValidatorConfig, lookup: Arc<dyn TextLookup>) -> Self {
        Self::new(
            TextSource::new(lookup.clone(), config.form_scope.clone()),
            TextSource::new(lookup, config.shared_scope.clone()),
            config.culture.clone(),
        )
        .with_policy(config.missing_messages)
        .with_lookup_timeout(config.lookup_timeout())
    }

    pub fn with_policy(mut self, policy: MissingMessagePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn culture(&self) -> String {
        self.culture.read().clone()
    }

    /// Switch the language used by subsequent lookups
    pub fn set_culture(&self, culture: impl Into<String>) {
        let culture = culture.into();
        debug!(culture = %culture, "message culture changed");
        *self.culture.write() = culture;
    }

    pub fn policy(&self) -> MissingMessagePolicy {
        self.policy
    }

    /// Resolve the message for `rule` on `field`, interpolating `args`.
    ///
    /// When neither tier defines a text, the default policy shows the
    /// lookup's fallback text, or the rule name if that is empty.
    pub async fn resolve(
        &self,
        field: &str,
        rule: &str,
        args: &[Value],
    ) -> ValidationResult<String> {
        let culture = self.culture();
        let specific_key = format!("{}{}", field, rule);

        let specific = self.lookup(&self.specific, &specific_key, &culture, args).await?;
        if specific.found {
            return Ok(specific.text);
        }

        let generic = self.lookup(&self.generic, rule, &culture, args).await?;
        if generic.found {
            return Ok(generic.text);
        }

        match self.policy {
            MissingMessagePolicy::ReturnKey => {
                warn!(
                    specific = %specific_key,
                    generic = rule,
                    culture = %culture,
                    "validation message not defined, showing key"
                );
                if generic.text.is_empty() {
                    Ok(rule.to_string())
                } else {
                    Ok(generic.text)
                }
            }
            MissingMessagePolicy::Fail => Err(ValidationFault::MissingMessage {
                specific: specific_key,
                generic: rule.to_string(),
            }),
        }
    }

    async fn lookup(
        &self,
        source: &TextSource,
        key: &str,
        culture: &str,
        args: &[Value],
    ) -> ValidationResult<LocalizedText> {
        let pending = source.lookup.lookup(key, &source.scope, culture, args);
        let text = match self.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                ValidationFault::LookupTimeout {
                    key: key.to_string(),
                    scope: source.scope.clone(),
                    timeout_ms: limit.as_millis() as u64,
                }
            })??,
            None => pending.await?,
        };

        // A found-but-empty entry counts as missing, the text falls back to the key
        if text.found && text.text.is_empty() {
            return Ok(LocalizedText::missing(key));
        }
        Ok(text)
    }
}
